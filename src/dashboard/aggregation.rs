//! Derived views over the transaction collection.
//!
//! Pure functions that compute the dashboard's summary statistics, the
//! monthly chart series and the search-filtered list from a snapshot of the
//! collection. Nothing here holds state or touches the store.

use std::collections::BTreeMap;

use time::Date;

use crate::transaction::Transaction;

/// The number of trailing months shown in the monthly expenses chart.
pub(crate) const MONTHLY_SERIES_LENGTH: usize = 6;

/// The spending total for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyTotal {
    /// The month, as a date with the day set to 1.
    pub month: Date,
    /// The sum of absolute transaction amounts in that month.
    pub total_abs: f64,
}

/// Sum of absolute amounts over the whole collection.
pub(crate) fn total_abs(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount.abs())
        .sum()
}

/// Sum of absolute amounts over transactions dated in the same calendar month
/// and year as `reference`.
pub(crate) fn current_month_total_abs(transactions: &[Transaction], reference: Date) -> f64 {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.date.year() == reference.year()
                && transaction.date.month() == reference.month()
        })
        .map(|transaction| transaction.amount.abs())
        .sum()
}

/// Monthly spending totals in chronological order, limited to the most
/// recent [MONTHLY_SERIES_LENGTH] months that have transactions.
///
/// Months with no transactions do not appear, so a shorter history produces a
/// shorter series and an empty collection produces an empty one.
pub(crate) fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        *totals.entry(month).or_insert(0.0) += transaction.amount.abs();
    }

    let mut series: Vec<MonthlyTotal> = totals
        .into_iter()
        .map(|(month, total_abs)| MonthlyTotal { month, total_abs })
        .collect();

    if series.len() > MONTHLY_SERIES_LENGTH {
        series.drain(..series.len() - MONTHLY_SERIES_LENGTH);
    }

    series
}

/// Transactions whose description contains `term`, ignoring case.
///
/// The collection order is preserved. An empty term matches everything.
pub(crate) fn search<'a>(transactions: &'a [Transaction], term: &str) -> Vec<&'a Transaction> {
    if term.is_empty() {
        return transactions.iter().collect();
    }

    let term = term.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| transaction.description.to_lowercase().contains(&term))
        .collect()
}

/// Sum of absolute amounts over an already filtered view of the collection,
/// shown as the "Total" of the current search results.
pub(crate) fn subtotal_abs(transactions: &[&Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount.abs())
        .sum()
}
