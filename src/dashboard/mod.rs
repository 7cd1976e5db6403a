//! Dashboard module
//!
//! Provides the landing page showing spending summaries, the searchable
//! transaction list and the monthly expenses chart.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod list;

pub use handlers::{get_dashboard_page, search_transactions_endpoint};
