//! Eligibility tests shared by the filter-based strategies.

use dca_core::{Asset, Thresholds};

/// An asset is still worth buying while its current weight sits at or below
/// its target, plus the configured tolerance.
pub fn is_under_target(asset: &Asset, thresholds: &Thresholds) -> bool {
    asset.weight <= asset.target + thresholds.over_target
}

/// A zero decline means the all-time-high data is unknown, so the asset is
/// included anyway.
pub fn is_past_ath_threshold(asset: &Asset, thresholds: &Thresholds) -> bool {
    asset.from_ath == 0.0 || asset.from_ath >= thresholds.from_ath
}

/// Keep assets passing both tests, input order preserved.
pub fn filter_assets<'a>(assets: &'a [Asset], thresholds: &Thresholds) -> Vec<&'a Asset> {
    assets
        .iter()
        .filter(|asset| is_under_target(asset, thresholds))
        .filter(|asset| is_past_ath_threshold(asset, thresholds))
        .collect()
}
