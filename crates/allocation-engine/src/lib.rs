//! Allocation Engine
//!
//! Turns an investment amount plus a set of assets into a per-ticker
//! monetary distribution. Four strategies are implemented; all of them are
//! pure functions over the request with no retained state.

pub mod filter;
pub mod portfolio;
pub mod rating;
pub mod target;
pub mod weight;

use dca_core::{DcaError, DcaRequest, Distribution, StrategyType};
use tracing::debug;

pub use filter::{filter_assets, is_past_ath_threshold, is_under_target};
pub use portfolio::distribute_by_portfolio;
pub use rating::distribute_by_rating;
pub use target::distribute_by_target;
pub use weight::distribute_by_weight;

/// Dispatch a request to its strategy. Placeholder strategy types fail
/// explicitly instead of falling back to a default.
pub fn optimize(request: &DcaRequest) -> Result<Distribution, DcaError> {
    let strategy = request.strategy_or_default();
    debug!(
        strategy = %strategy.strategy_type,
        assets = request.assets.len(),
        "running allocation"
    );

    match strategy.strategy_type {
        StrategyType::Target => target::distribute_by_target(request),
        StrategyType::Weight => weight::distribute_by_weight(request),
        StrategyType::Portfolio => portfolio::distribute_by_portfolio(request),
        StrategyType::Rating => rating::distribute_by_rating(request),
        StrategyType::Dividend => Err(DcaError::UnsupportedStrategy(
            StrategyType::Dividend.to_string(),
        )),
    }
}
