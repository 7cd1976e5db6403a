//! The 500 page shown when an unexpected error occurs.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// Get a response with the 500 Internal Server Error page.
///
/// `description` states what went wrong and `fix` tells the user what to do
/// about it.
pub(crate) fn render_internal_server_error(description: &str, fix: &str) -> Response {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Internal Server Error", "500", description, fix),
    )
}

/// The route handler for the internal server error page.
pub(crate) async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(
        "Sorry, something went wrong.",
        "Try again later or check the server logs.",
    )
}
