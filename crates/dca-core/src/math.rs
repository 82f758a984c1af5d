//! Money arithmetic shared by both engines.
//!
//! Percentages travel as `f64` in the 0-100 range and become 0-1 fractions
//! right before they multiply into a `Decimal` amount. Final monetary
//! amounts are rounded to 2 decimal places with half-down semantics (ties
//! toward zero), matching the service's historical rounding.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

pub const HUNDRED_PERCENT: f64 = 100.0;

const MONEY_SCALE: u32 = 2;

/// `amount * fraction`, rounded to a final monetary value.
pub fn calculate_distribution(amount: Decimal, fraction: f64) -> Decimal {
    let factor = Decimal::from_f64(fraction).unwrap_or_default();
    (amount * factor).round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointTowardZero)
}

/// Round an already-computed monetary value to its final scale.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointTowardZero)
}

/// Convert a 0-100 percentage into a 0-1 fraction.
pub fn to_decimal_representation(percentage: f64) -> f64 {
    percentage / HUNDRED_PERCENT
}

/// New weight percentage of a position after `invested` money is added to it.
/// `portfolio_value` must be positive; callers guard the degenerate case.
pub fn calculate_adjusted_weight(
    portfolio_value: Decimal,
    invested: Decimal,
    weight: f64,
) -> f64 {
    let held = portfolio_value
        * Decimal::from_f64(to_decimal_representation(weight)).unwrap_or_default();
    ((held + invested) / portfolio_value).to_f64().unwrap_or(0.0) * HUNDRED_PERCENT
}
