//! Greedy, allowance-capped selection of lots to sell.

use crate::consolidation::consolidate_transaction_history;
use crate::error::TaxError;
use crate::models::{TickerShares, Transaction};
use crate::parameters::TaxAllowanceParameters;
use crate::quotes::QuoteSource;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use tracing::debug;

const FRACTIONAL_INCREMENT: Decimal = dec!(0.01);

/// Walk the consolidated open lots in date order and pick the shares whose
/// realized profit fills the allowance without breaching the cap.
///
/// The single quote fetch happens up front; everything after it is
/// CPU-bound. Tickers without a quote price as zero and fall out as
/// unprofitable.
pub async fn find_sell_candidates(
    transactions: &[Transaction],
    quotes: &dyn QuoteSource,
    parameters: &TaxAllowanceParameters,
) -> Result<Vec<TickerShares>, TaxError> {
    let tickers: HashSet<String> = transactions
        .iter()
        .map(|transaction| transaction.ticker.clone())
        .collect();
    let current_prices = quotes.get_quotes(&tickers).await?;
    let lots = consolidate_transaction_history(transactions)?;

    let mut candidates = Vec::new();
    let mut cumulative_profit = Decimal::ZERO;

    for lot in &lots {
        let current_price = current_prices
            .get(&lot.ticker)
            .copied()
            .unwrap_or_default();
        let lot_profit = (current_price - lot.price) * lot.shares;

        if lot_profit <= Decimal::ZERO || cumulative_profit >= parameters.safety_margin {
            continue;
        }

        if cumulative_profit + lot_profit <= parameters.cap {
            candidates.push(TickerShares::new(lot.ticker.clone(), lot.shares));
            cumulative_profit += lot_profit;
        } else {
            let profit_per_share = lot_profit / lot.shares;
            let shares = shares_to_sell(cumulative_profit, profit_per_share, parameters);
            if shares > Decimal::ZERO {
                cumulative_profit += profit_per_share * shares;
                candidates.push(TickerShares::new(lot.ticker.clone(), shares));
            }
        }
    }

    debug!(%cumulative_profit, candidates = candidates.len(), "allowance walk finished");
    Ok(candidates)
}

/// Largest 0.01-share count whose profit, plus one further increment,
/// stays strictly below both cap and safety margin. That one further
/// increment is then included, ceiling-rounded to a cent of a share.
fn shares_to_sell(
    current_profit: Decimal,
    profit_per_share: Decimal,
    parameters: &TaxAllowanceParameters,
) -> Decimal {
    let fractional_profit = profit_per_share * FRACTIONAL_INCREMENT;
    if current_profit + fractional_profit >= parameters.cap {
        // even a single increment would land on the cap
        return Decimal::ZERO;
    }

    let mut shares = Decimal::ZERO;
    loop {
        let next = shares + FRACTIONAL_INCREMENT;
        let total_profit = current_profit + profit_per_share * next;
        if total_profit + fractional_profit < parameters.cap
            && total_profit < parameters.safety_margin
        {
            shares = next;
        } else {
            break;
        }
    }

    (shares + FRACTIONAL_INCREMENT)
        .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
}
