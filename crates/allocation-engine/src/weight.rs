//! WEIGHT strategy: close the monetary gap between current and target
//! weights. When the investment exceeds the total gap, every gap is funded
//! and the remainder is spread over the whole portfolio with the PORTFOLIO
//! target adjustment, recomputed against the just-funded weights.

use crate::filter::filter_assets;
use crate::portfolio::calculate_target_by_portfolio;
use dca_core::math::{
    calculate_adjusted_weight, calculate_distribution, round_money, to_decimal_representation,
};
use dca_core::{Asset, DcaError, DcaRequest, Distribution, Thresholds};
use rust_decimal::prelude::*;
use std::collections::HashMap;
use tracing::debug;

pub fn distribute_by_weight(request: &DcaRequest) -> Result<Distribution, DcaError> {
    let thresholds = request.strategy_or_default().thresholds;
    let filtered = filter_assets(&request.assets, &thresholds);
    if filtered.is_empty() {
        return Err(DcaError::NoEligibleAssets);
    }

    let portfolio_value = request.portfolio_value_or_zero();
    let under_weight_amounts: HashMap<String, Decimal> = filtered
        .iter()
        .map(|asset| {
            let gap = Decimal::from_f64(to_decimal_representation(asset.target - asset.weight))
                .unwrap_or_default();
            (asset.ticker.clone(), portfolio_value * gap)
        })
        .collect();
    let total_need: Decimal = under_weight_amounts.values().copied().sum();

    // Funding every gap and redistributing the surplus only makes sense with
    // a known portfolio value; without one all gaps are zero and the amount
    // is simply split across the under-weighted assets.
    if portfolio_value > Decimal::ZERO && request.amount > total_need {
        debug!(%total_need, "investment exceeds rebalancing need, funding all gaps");
        rebalance_whole_portfolio(request, &thresholds, total_need, &under_weight_amounts)
    } else {
        rebalance_under_weighted_assets(&filtered, request)
    }
}

fn rebalance_under_weighted_assets(
    filtered: &[&Asset],
    request: &DcaRequest,
) -> Result<Distribution, DcaError> {
    let total_weight_gap: f64 = filtered
        .iter()
        .map(|asset| asset.target - asset.weight)
        .sum();
    if total_weight_gap == 0.0 {
        return Err(DcaError::DegenerateStrategy(
            "eligible assets have no weight gap to fill".to_string(),
        ));
    }

    Ok(filtered
        .iter()
        .map(|asset| {
            let fraction = (asset.target - asset.weight) / total_weight_gap;
            (
                asset.ticker.clone(),
                calculate_distribution(request.amount, fraction),
            )
        })
        .collect())
}

fn rebalance_whole_portfolio(
    request: &DcaRequest,
    thresholds: &Thresholds,
    total_need: Decimal,
    under_weight_amounts: &HashMap<String, Decimal>,
) -> Result<Distribution, DcaError> {
    let amount_gap = request.amount - total_need;
    let portfolio_value = request.portfolio_value_or_zero();

    // Weights as they will stand once every gap has been funded.
    let updated_assets: Vec<Asset> = request
        .assets
        .iter()
        .map(|asset| Asset {
            ticker: asset.ticker.clone(),
            weight: calculate_adjusted_weight(
                portfolio_value,
                under_weight_amounts
                    .get(&asset.ticker)
                    .copied()
                    .unwrap_or_default(),
                asset.weight,
            ),
            target: asset.target,
            from_ath: 0.0,
            rating: 0,
        })
        .collect();

    let adjusted_targets = calculate_target_by_portfolio(&updated_assets, thresholds)?;

    Ok(adjusted_targets
        .into_iter()
        .map(|(ticker, adjusted_target)| {
            let funded = under_weight_amounts
                .get(&ticker)
                .copied()
                .unwrap_or_default();
            let share = amount_gap * Decimal::from_f64(adjusted_target).unwrap_or_default();
            (ticker, round_money(share + funded))
        })
        .collect())
}
