//! RATING strategy: split the amount in proportion to analyst ratings.
//! The eligibility filter does not apply; a zero rating simply earns zero.

use dca_core::math::calculate_distribution;
use dca_core::{DcaError, DcaRequest, Distribution};

pub fn distribute_by_rating(request: &DcaRequest) -> Result<Distribution, DcaError> {
    let rating_sum: f64 = request.assets.iter().map(|asset| asset.rating as f64).sum();
    if rating_sum == 0.0 {
        return Err(DcaError::DegenerateStrategy(
            "total rating across assets is zero".to_string(),
        ));
    }

    Ok(request
        .assets
        .iter()
        .map(|asset| {
            let fraction = asset.rating as f64 / rating_sum;
            (
                asset.ticker.clone(),
                calculate_distribution(request.amount, fraction),
            )
        })
        .collect())
}
