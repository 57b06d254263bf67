//! Position sizing and scoring
//!
//! Pure calculations over a broker snapshot: selection preference, maximum
//! admissible lot size, drawdown and the composite risk score.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::{BrokerStatus, RiskLimits};

/// Selection score for spreading trades across brokers.
///
/// Rewards low current risk, few open positions (even distribution) and
/// deep free margin. Higher is better.
pub fn broker_preference(status: &BrokerStatus) -> Decimal {
    let risk_term = Decimal::ONE_HUNDRED - status.risk_percent;
    let position_term =
        (dec!(50) - Decimal::from(status.open_positions) * dec!(5)).max(Decimal::ZERO);
    let margin_term = (status.free_margin / dec!(1000)).min(dec!(50));

    risk_term + position_term + margin_term
}

/// Largest lot size the broker can absorb within its remaining risk budget.
///
/// The budget is the balance share left below the portfolio ceiling; free
/// margin and the hard per-position cap bound it further. Floored to two
/// decimals, never below the broker's minimum lot.
pub fn max_lot_size(status: &BrokerStatus, limits: &RiskLimits) -> Decimal {
    let remaining_risk_pct =
        (limits.max_portfolio_risk_pct - status.risk_percent).max(Decimal::ZERO);
    let risk_budget = status.balance * remaining_risk_pct / Decimal::ONE_HUNDRED;

    let from_risk = risk_budget / limits.margin_per_lot;
    let from_margin = status.free_margin / limits.margin_per_lot;

    from_risk
        .min(from_margin)
        .min(limits.max_lot_size)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
        .max(limits.min_lot_size)
}

/// Drawdown from `baseline` to `equity`, as a percentage, clamped to >= 0.
pub fn drawdown_pct(baseline: Decimal, equity: Decimal) -> Decimal {
    if baseline <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((baseline - equity) / baseline * Decimal::ONE_HUNDRED).max(Decimal::ZERO)
}

/// Composite risk score in [0, 100].
///
/// 40 points for portfolio risk relative to the ceiling, 30 for how much of
/// the admissible size the request consumes, 2 per open position up to 20,
/// and up to 10 for a thin margin level.
pub fn composite_risk_score(
    status: &BrokerStatus,
    requested_lot: Decimal,
    max_lot: Decimal,
    limits: &RiskLimits,
) -> Decimal {
    let mut score = status.risk_percent / limits.max_portfolio_risk_pct * dec!(40);

    if max_lot > Decimal::ZERO {
        let lot_ratio = (requested_lot / max_lot).min(Decimal::ONE);
        score += lot_ratio * dec!(30);
    }

    score += (Decimal::from(status.open_positions) * dec!(2)).min(dec!(20));

    if status.balance > Decimal::ZERO {
        let margin_level = status.free_margin / status.balance * Decimal::ONE_HUNDRED;
        if margin_level < dec!(50) {
            score += dec!(10);
        } else if margin_level < dec!(70) {
            score += dec!(5);
        }
    }

    score.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED)
}
