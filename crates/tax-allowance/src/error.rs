use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxError {
    #[error("Ticker {0} has sell transactions but no buy history")]
    MissingBuyHistory(String),

    #[error("Quote lookup failed: {0}")]
    QuoteLookup(String),
}
