use thiserror::Error;

#[derive(Error, Debug)]
pub enum DcaError {
    #[error("No eligible assets after filtering; nothing to distribute")]
    NoEligibleAssets,

    #[error("Degenerate strategy input: {0}")]
    DegenerateStrategy(String),

    #[error("Unsupported strategy type: {0}")]
    UnsupportedStrategy(String),
}
