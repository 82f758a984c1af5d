//! HTTP quote lookup backing the tax-allowance optimizer.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tax_allowance::{QuoteSource, TaxError};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.marketdata.app/v1";

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    quotes: HashMap<String, Decimal>,
}

/// Thin client over a batch quote endpoint. Tickers the provider does not
/// know are simply absent from the result, which the optimizer treats as a
/// zero price.
#[derive(Clone)]
pub struct HttpQuoteClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl HttpQuoteClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url,
            client,
        }
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteClient {
    async fn get_quotes(
        &self,
        tickers: &HashSet<String>,
    ) -> Result<HashMap<String, Decimal>, TaxError> {
        if tickers.is_empty() {
            return Ok(HashMap::new());
        }

        let mut symbols: Vec<&str> = tickers.iter().map(String::as_str).collect();
        symbols.sort_unstable();
        let url = format!("{}/quotes", self.base_url);
        debug!(count = symbols.len(), "fetching quotes");

        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbols.join(",")), ("apiKey", self.api_key.clone())])
            .send()
            .await
            .map_err(|e| TaxError::QuoteLookup(e.to_string()))?
            .error_for_status()
            .map_err(|e| TaxError::QuoteLookup(e.to_string()))?;

        let payload: QuotesResponse = response
            .json()
            .await
            .map_err(|e| TaxError::QuoteLookup(e.to_string()))?;
        Ok(payload.quotes)
    }
}
