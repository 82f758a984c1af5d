//! PORTFOLIO strategy: rebalance targets across the whole portfolio by
//! moving the surplus of over-weighted assets onto the under-weighted ones.

use crate::filter::is_under_target;
use dca_core::math::{calculate_distribution, to_decimal_representation};
use dca_core::{Asset, DcaError, DcaRequest, Distribution, Thresholds};

pub fn distribute_by_portfolio(request: &DcaRequest) -> Result<Distribution, DcaError> {
    let thresholds = request.strategy_or_default().thresholds;
    let adjusted = calculate_target_by_portfolio(&request.assets, &thresholds)?;

    Ok(adjusted
        .into_iter()
        .map(|(ticker, fraction)| {
            (ticker, calculate_distribution(request.amount, fraction))
        })
        .collect())
}

/// Adjusted allocation fraction per ticker, input order preserved.
///
/// The total over-target surplus is split evenly across the under-target
/// assets; over-target assets give up exactly their surplus.
pub(crate) fn calculate_target_by_portfolio(
    assets: &[Asset],
    thresholds: &Thresholds,
) -> Result<Vec<(String, f64)>, DcaError> {
    let under_count = assets
        .iter()
        .filter(|asset| is_under_target(asset, thresholds))
        .count();
    if under_count == 0 {
        return Err(DcaError::DegenerateStrategy(
            "no assets under target to receive the surplus".to_string(),
        ));
    }

    let over_share_total: f64 = assets
        .iter()
        .filter(|asset| !is_under_target(asset, thresholds))
        .map(|asset| asset.weight - asset.target)
        .sum();
    let target_factor = over_share_total / under_count as f64;

    Ok(assets
        .iter()
        .map(|asset| {
            let adjusted_target = if is_under_target(asset, thresholds) {
                asset.target + target_factor
            } else {
                asset.target - (asset.weight - asset.target)
            };
            (asset.ticker.clone(), to_decimal_representation(adjusted_target))
        })
        .collect())
}
