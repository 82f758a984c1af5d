//! FIFO consolidation of a transaction history into open buy lots.

use crate::error::TaxError;
use crate::models::{Direction, Transaction};
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Balance all BUY and SELL transactions per ticker, oldest lots first.
///
/// The result contains only BUY transactions with adjusted share counts,
/// globally sorted by date ascending, and is the input to the allowance
/// optimizer.
///
/// A SELL that exceeds the currently open lots is not an error: the excess
/// is carried and offset against the next BUY of the same ticker, so mixed
/// chronological histories consolidate correctly. A ticker with sells but
/// no buy at all is rejected.
pub fn consolidate_transaction_history(
    transactions: &[Transaction],
) -> Result<Vec<Transaction>, TaxError> {
    let mut ticker_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Transaction>> = HashMap::new();
    for transaction in transactions {
        if !groups.contains_key(&transaction.ticker) {
            ticker_order.push(transaction.ticker.clone());
        }
        groups
            .entry(transaction.ticker.clone())
            .or_default()
            .push(transaction.clone());
    }

    let mut lots = Vec::new();
    for ticker in &ticker_order {
        if let Some(group) = groups.remove(ticker) {
            lots.extend(consolidate_ticker(ticker, group)?);
        }
    }

    // Stable: lots sharing a date keep their ticker's first-appearance order.
    lots.sort_by_key(|transaction| transaction.date);
    Ok(lots)
}

fn consolidate_ticker(
    ticker: &str,
    mut group: Vec<Transaction>,
) -> Result<Vec<Transaction>, TaxError> {
    if !group
        .iter()
        .any(|transaction| transaction.direction == Direction::Buy)
    {
        return Err(TaxError::MissingBuyHistory(ticker.to_string()));
    }

    group.sort_by_key(|transaction| transaction.date);

    let mut open_lots: VecDeque<Transaction> = VecDeque::new();
    let mut carried_sold = Decimal::ZERO;

    for transaction in group {
        match transaction.direction {
            Direction::Buy => {
                let remaining = transaction.shares - carried_sold;
                if remaining > Decimal::ZERO {
                    let mut lot = transaction;
                    lot.shares = remaining;
                    open_lots.push_back(lot);
                    carried_sold = Decimal::ZERO;
                } else {
                    carried_sold -= transaction.shares;
                }
            }
            Direction::Sell => {
                let mut to_sell = transaction.shares;
                while to_sell > Decimal::ZERO {
                    let Some(oldest) = open_lots.front_mut() else {
                        // Sold more than currently held; offset future buys.
                        carried_sold += to_sell;
                        break;
                    };
                    if oldest.shares > to_sell {
                        oldest.shares -= to_sell;
                        to_sell = Decimal::ZERO;
                    } else {
                        to_sell -= oldest.shares;
                        open_lots.pop_front();
                    }
                }
            }
        }
    }

    if carried_sold > Decimal::ZERO {
        debug!(ticker, %carried_sold, "sells never covered by a later buy");
    }
    Ok(open_lots.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(offset: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1 + offset).unwrap()
    }

    fn tx(ticker: &str, shares: Decimal, direction: Direction, price: Decimal, date: NaiveDate) -> Transaction {
        Transaction {
            ticker: ticker.to_string(),
            shares,
            direction,
            price,
            date,
        }
    }

    fn buy(ticker: &str, shares: Decimal, price: Decimal, date: NaiveDate) -> Transaction {
        tx(ticker, shares, Direction::Buy, price, date)
    }

    fn sell(ticker: &str, shares: Decimal, price: Decimal, date: NaiveDate) -> Transaction {
        tx(ticker, shares, Direction::Sell, price, date)
    }

    #[test]
    fn partial_sells_shrink_the_oldest_lot_first() {
        let transactions = vec![
            buy("BBB", dec!(100), dec!(200.0), day(0)),
            sell("BBB", dec!(20), dec!(200.0), day(1)),
            sell("BBB", dec!(30), dec!(200.0), day(2)),
            buy("BBB", dec!(10), dec!(200.0), day(3)),
        ];

        let lots = consolidate_transaction_history(&transactions).unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].shares, dec!(50));
        assert_eq!(lots[0].date, day(0));
        assert_eq!(lots[1].shares, dec!(10));
        assert_eq!(lots[1].date, day(3));

        let total: Decimal = lots.iter().map(|lot| lot.shares).sum();
        assert_eq!(total, dec!(60));
    }

    #[test]
    fn consolidates_a_sequential_history_across_tickers() {
        let transactions = vec![
            buy("AAA", dec!(100), dec!(100.0), day(0)),
            sell("AAA", dec!(50), dec!(100.0), day(1)),
            buy("AAA", dec!(200), dec!(111.0), day(2)),
            sell("AAA", dec!(230), dec!(100.0), day(3)),
            buy("AAA", dec!(70), dec!(122.0), day(4)),
            buy("BBB", dec!(1000), dec!(100.0), day(5)),
            sell("BBB", dec!(500), dec!(100.0), day(6)),
            buy("BBB", dec!(800), dec!(111.0), day(7)),
            sell("BBB", dec!(1000), dec!(100.0), day(8)),
            buy("CCC", dec!(20), dec!(100.0), day(9)),
            buy("CCC", dec!(30), dec!(111.0), day(10)),
            buy("CCC", dec!(100), dec!(122.0), day(11)),
            sell("CCC", dec!(140), dec!(100.0), day(12)),
            buy("DDD", dec!(300), dec!(100.0), day(13)),
            buy("DDD", dec!(200), dec!(111.0), day(14)),
            sell("DDD", dec!(400), dec!(100.0), day(15)),
            sell("DDD", dec!(50), dec!(100.0), day(16)),
            buy("EEE", dec!(50), dec!(100.0), day(15)),
            sell("EEE", dec!(50), dec!(100.0), day(16)),
            buy("EEE", dec!(42), dec!(111.0), day(17)),
        ];

        let lots = consolidate_transaction_history(&transactions).unwrap();
        let expected = vec![
            buy("AAA", dec!(20), dec!(111.0), day(2)),
            buy("AAA", dec!(70), dec!(122.0), day(4)),
            buy("BBB", dec!(300), dec!(111.0), day(7)),
            buy("CCC", dec!(10), dec!(122.0), day(11)),
            buy("DDD", dec!(50), dec!(111.0), day(14)),
            buy("EEE", dec!(42), dec!(111.0), day(17)),
        ];
        assert_eq!(lots, expected);
    }

    #[test]
    fn consolidates_interleaved_tickers_in_date_order() {
        let transactions = vec![
            buy("AAA", dec!(100), dec!(100.0), day(0)),
            buy("BBB", dec!(1000), dec!(100.0), day(0)),
            buy("DDD", dec!(300), dec!(100.0), day(0)),
            sell("AAA", dec!(50), dec!(100.0), day(1)),
            sell("BBB", dec!(500), dec!(100.0), day(1)),
            buy("DDD", dec!(200), dec!(111.0), day(1)),
            buy("AAA", dec!(200), dec!(111.0), day(2)),
            buy("BBB", dec!(800), dec!(111.0), day(2)),
            sell("DDD", dec!(400), dec!(100.0), day(2)),
            sell("AAA", dec!(230), dec!(100.0), day(3)),
            sell("BBB", dec!(1000), dec!(100.0), day(3)),
            sell("DDD", dec!(50), dec!(100.0), day(3)),
            buy("AAA", dec!(70), dec!(122.0), day(4)),
        ];

        let lots = consolidate_transaction_history(&transactions).unwrap();
        let expected = vec![
            buy("DDD", dec!(50), dec!(111.0), day(1)),
            buy("AAA", dec!(20), dec!(111.0), day(2)),
            buy("BBB", dec!(300), dec!(111.0), day(2)),
            buy("AAA", dec!(70), dec!(122.0), day(4)),
        ];
        assert_eq!(lots, expected);
    }

    #[test]
    fn oversold_shares_offset_the_next_buy() {
        let transactions = vec![
            buy("AAA", dec!(80), dec!(300.0), day(0)),
            buy("AAA", dec!(20), dec!(300.0), day(0)),
            sell("AAA", dec!(100), dec!(500.0), day(1)),
            buy("AAA", dec!(50), dec!(300.0), day(2)),
        ];
        let lots = consolidate_transaction_history(&transactions).unwrap();
        assert_eq!(lots, vec![buy("AAA", dec!(50), dec!(300.0), day(2))]);

        // A genuine short: 30 shares sold beyond holdings come out of the
        // next buy.
        let transactions = vec![
            buy("SSS", dec!(50), dec!(100.0), day(0)),
            sell("SSS", dec!(80), dec!(120.0), day(1)),
            buy("SSS", dec!(100), dec!(110.0), day(2)),
        ];
        let lots = consolidate_transaction_history(&transactions).unwrap();
        assert_eq!(lots, vec![buy("SSS", dec!(70), dec!(110.0), day(2))]);
    }

    #[test]
    fn sells_without_any_buy_are_rejected() {
        let transactions = vec![
            buy("AAA", dec!(10), dec!(100.0), day(0)),
            sell("XXX", dec!(5), dec!(100.0), day(1)),
        ];
        match consolidate_transaction_history(&transactions) {
            Err(TaxError::MissingBuyHistory(ticker)) => assert_eq!(ticker, "XXX"),
            other => panic!("expected MissingBuyHistory, got {other:?}"),
        }
    }
}
