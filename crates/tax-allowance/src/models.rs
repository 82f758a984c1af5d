use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

/// One historical trade. Dates order the FIFO matching; ties keep input
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub ticker: String,
    pub shares: Decimal,
    pub direction: Direction,
    pub price: Decimal,
    pub date: NaiveDate,
}

/// The optimizer's output: sell this many shares of the ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerShares {
    pub ticker: String,
    pub shares: Decimal,
}

impl TickerShares {
    pub fn new(ticker: impl Into<String>, shares: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            shares,
        }
    }
}
