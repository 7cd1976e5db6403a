//! The 404 page shown for unknown routes and missing resources.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// Get a response with the 404 Not Found page.
pub(crate) fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Page Not Found",
            "404",
            "This page does not exist.",
            "Check the URL or head back to the dashboard.",
        ),
    )
}

/// The fallback route handler for requests that match no other route.
pub(crate) async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}
