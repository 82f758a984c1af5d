use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const DEFAULT_CAP: Decimal = dec!(2000.0);
const SAFETY_MARGIN_FACTOR: Decimal = dec!(0.99);

/// Allowance limits passed explicitly into every optimizer call.
///
/// `safety_margin` is the cushion below the cap: once cumulative profit
/// reaches it, no further whole lots are added.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxAllowanceParameters {
    pub cap: Decimal,
    pub safety_margin: Decimal,
}

impl TaxAllowanceParameters {
    pub fn with_cap(cap: Decimal) -> Self {
        Self {
            cap,
            safety_margin: cap * SAFETY_MARGIN_FACTOR,
        }
    }

    /// Read the cap from `TAX_ALLOWANCE_CAP`, falling back to the default.
    pub fn from_env() -> Self {
        let cap = std::env::var("TAX_ALLOWANCE_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CAP);
        Self::with_cap(cap)
    }
}

impl Default for TaxAllowanceParameters {
    fn default() -> Self {
        Self::with_cap(DEFAULT_CAP)
    }
}
