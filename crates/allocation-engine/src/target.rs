//! TARGET strategy: give each eligible asset its target share of the
//! investment, with the percentage mass of excluded assets redistributed
//! proportionally across the eligible ones.

use crate::filter::filter_assets;
use dca_core::math::{calculate_distribution, to_decimal_representation, HUNDRED_PERCENT};
use dca_core::{DcaError, DcaRequest, Distribution};

pub fn distribute_by_target(request: &DcaRequest) -> Result<Distribution, DcaError> {
    let thresholds = request.strategy_or_default().thresholds;
    let filtered = filter_assets(&request.assets, &thresholds);
    if filtered.is_empty() {
        return Err(DcaError::NoEligibleAssets);
    }

    let target_sum: f64 = filtered.iter().map(|asset| asset.target).sum();
    if target_sum == 0.0 {
        return Err(DcaError::DegenerateStrategy(
            "eligible assets have a zero target sum".to_string(),
        ));
    }

    // The share of the 100% pie held by excluded assets, spread across the
    // eligible ones in proportion to their own targets.
    let target_left = HUNDRED_PERCENT - target_sum;
    let target_factor = target_left / (HUNDRED_PERCENT - target_left);

    Ok(filtered
        .iter()
        .map(|asset| {
            let fraction =
                to_decimal_representation(asset.target + asset.target * target_factor);
            (
                asset.ticker.clone(),
                calculate_distribution(request.amount, fraction),
            )
        })
        .collect())
}
