//! Tax Allowance Optimizer
//!
//! Consolidates buy/sell transaction history into open FIFO lots, then
//! picks the lots (and partial lots) whose realized profit makes the most
//! of a capped annual tax-free allowance.

pub mod consolidation;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod parameters;
pub mod quotes;

pub use consolidation::consolidate_transaction_history;
pub use error::TaxError;
pub use models::{Direction, TickerShares, Transaction};
pub use optimizer::find_sell_candidates;
pub use parameters::TaxAllowanceParameters;
pub use quotes::QuoteSource;
