//! Dashboard HTTP handlers and view rendering.
//!
//! This module wires user intents to the store and the derived views: every
//! page load takes a fresh snapshot of the collection, recomputes the summary
//! statistics, the chart series and the filtered list, and renders them.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation,
        cards::{SummaryStats, summary_cards_view},
        charts::{DashboardChart, chart_container, chart_empty_state, chart_script,
            monthly_expenses_chart},
        list::{transaction_list_view, transaction_panel},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    stores::{SharedTransactionStore, TransactionStore},
    timezone::current_local_date,
    transaction::Transaction,
};

/// The state needed for the dashboard page and the search fragment.
#[derive(Clone)]
pub struct DashboardState {
    /// The store holding the transaction collection.
    pub transaction_store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Query parameters for the dashboard page and the search fragment.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// The term the transaction list is filtered by.
    #[serde(default)]
    pub search: Option<String>,
}

/// Display the dashboard: summary cards, the searchable transaction list and
/// the monthly expenses chart.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let search_term = query.search.unwrap_or_default();

    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLock)?;
    let transactions = store.transactions();

    let stats = SummaryStats {
        total_abs: aggregation::total_abs(transactions),
        current_month_abs: aggregation::current_month_total_abs(transactions, today),
        transaction_count: transactions.len(),
    };
    let series = aggregation::monthly_series(transactions);
    let filtered = aggregation::search(transactions, &search_term);

    Ok(dashboard_view(&stats, !transactions.is_empty(), &filtered, &search_term, &series)
        .into_response())
}

/// Returns the transaction list fragment filtered by the search term.
///
/// The search box requests this on every keystroke and swaps the result into
/// the list container, leaving the rest of the page untouched.
pub async fn search_transactions_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, Error> {
    let search_term = query.search.unwrap_or_default();

    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLock)?;

    let filtered = aggregation::search(store.transactions(), &search_term);

    Ok(transaction_list_view(&filtered).into_response())
}

fn dashboard_view(
    stats: &SummaryStats,
    transactions_exist: bool,
    filtered: &[&Transaction],
    search_term: &str,
    series: &[aggregation::MonthlyTotal],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let chart = (!series.is_empty()).then(|| DashboardChart {
        id: "monthly-expenses-chart",
        options: monthly_expenses_chart(series).to_string(),
    });

    let mut head_elements = Vec::new();
    if let Some(chart) = &chart {
        head_elements.push(HeadElement::ScriptLink(
            "/static/echarts.6.0.0.min.js".to_owned(),
        ));
        head_elements.push(chart_script(chart));
    }

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="w-full mb-8"
            {
                h1 class="text-3xl font-bold" { "Personal Finance Tracker" }

                p class="text-gray-600 dark:text-gray-400"
                {
                    "Track your expenses and visualize your financial data"
                }
            }

            (summary_cards_view(stats))

            div class="grid grid-cols-1 lg:grid-cols-2 gap-8 w-full"
            {
                (transaction_panel(transactions_exist, filtered, search_term))

                section class="w-full"
                {
                    h2 class="text-xl font-semibold mb-4" { "Monthly Expenses" }

                    @if let Some(chart) = &chart {
                        (chart_container(chart))
                    } @else {
                        (chart_empty_state())
                    }
                }
            }
        }
    };

    base("Dashboard", &head_elements, &content)
}
