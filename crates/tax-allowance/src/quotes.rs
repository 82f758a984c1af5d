use crate::error::TaxError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Current market prices for a set of tickers. Tickers missing from the
/// result are treated as priced at zero by the optimizer, which makes
/// their lots unprofitable and therefore skipped.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn get_quotes(
        &self,
        tickers: &HashSet<String>,
    ) -> Result<HashMap<String, Decimal>, TaxError>;
}
