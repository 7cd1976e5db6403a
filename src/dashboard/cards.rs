//! Summary cards showing the headline statistics for the collection.

use maud::{Markup, html};

use crate::html::{CARD_STYLE, format_currency};

/// The headline numbers displayed at the top of the dashboard.
pub(super) struct SummaryStats {
    /// Sum of absolute amounts over all transactions.
    pub total_abs: f64,
    /// Sum of absolute amounts over the current calendar month.
    pub current_month_abs: f64,
    /// How many transactions have been recorded.
    pub transaction_count: usize,
}

/// Renders the three summary cards: all-time spend, current-month spend and
/// the transaction count.
pub(super) fn summary_cards_view(stats: &SummaryStats) -> Markup {
    html! {
        section class="grid grid-cols-1 md:grid-cols-3 gap-4 w-full mb-8"
        {
            (summary_card(
                "Total Expenses",
                &format_currency(stats.total_abs),
                "All time expenses",
            ))
            (summary_card(
                "This Month",
                &format_currency(stats.current_month_abs),
                "Current month expenses",
            ))
            (summary_card(
                "Total Transactions",
                &stats.transaction_count.to_string(),
                "Total recorded transactions",
            ))
        }
    }
}

fn summary_card(title: &str, value: &str, caption: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            div class="text-2xl font-bold mt-1" { (value) }
            p class="text-xs text-gray-500 mt-1" { (caption) }
        }
    }
}
