use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ATH_THRESHOLD: f64 = 5.0;
pub const DEFAULT_OVER_TARGET_THRESHOLD: f64 = 0.0;

/// Per-ticker monetary amounts, rounded to 2 decimal places.
pub type Distribution = BTreeMap<String, Decimal>;

/// A portfolio position as submitted by the caller. Percentages are in the
/// 0-100 range; `from_ath` of zero means the decline is unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub ticker: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub from_ath: f64,
    #[serde(default)]
    pub rating: u32,
}

/// Eligibility tolerances for the filter-based strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    pub from_ath: f64,
    pub over_target: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            from_ath: DEFAULT_ATH_THRESHOLD,
            over_target: DEFAULT_OVER_TARGET_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyType {
    Target,
    Weight,
    Portfolio,
    Rating,
    /// Declared on the wire but not implemented; dispatch rejects it.
    Dividend,
}

impl std::fmt::Display for StrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyType::Target => write!(f, "TARGET"),
            StrategyType::Weight => write!(f, "WEIGHT"),
            StrategyType::Portfolio => write!(f, "PORTFOLIO"),
            StrategyType::Rating => write!(f, "RATING"),
            StrategyType::Dividend => write!(f, "DIVIDEND"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DcaStrategy {
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub thresholds: Thresholds,
}

impl Default for DcaStrategy {
    fn default() -> Self {
        Self {
            strategy_type: StrategyType::Target,
            thresholds: Thresholds::default(),
        }
    }
}

/// One investment request. `portfolio_value` is only needed by the WEIGHT
/// strategy's gap-funding branch; when absent the engine falls back to
/// proportional distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub strategy: Option<DcaStrategy>,
    #[serde(default)]
    pub portfolio_value: Option<Decimal>,
    pub assets: Vec<Asset>,
}

impl DcaRequest {
    pub fn strategy_or_default(&self) -> DcaStrategy {
        self.strategy.unwrap_or_default()
    }

    pub fn portfolio_value_or_zero(&self) -> Decimal {
        self.portfolio_value.unwrap_or_default()
    }
}
