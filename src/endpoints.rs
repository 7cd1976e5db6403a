//! The endpoint URIs served by the application.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the spending summary, transaction list and chart.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for recording a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route that returns the transaction list filtered by a search term.
pub const SEARCH_TRANSACTIONS: &str = "/api/transactions/search";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
