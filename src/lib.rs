//! Spendlog is a web app for tracking your personal expenses.
//!
//! This library directly serves HTML pages: a dashboard summarising your
//! spending with a searchable transaction list and a monthly expenses chart,
//! plus pages for recording, editing and deleting transactions. The whole
//! collection lives in a single JSON document on disk.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod stores;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use routing::build_router;
pub use stores::{JsonFileStore, SharedTransactionStore, TransactionStore};
pub use transaction::Transaction;

use crate::{
    alert::error_alert, html::render, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the transaction store lock.
    #[error("could not acquire the transaction store lock")]
    StoreLock,

    /// The transaction collection could not be serialized or written to disk.
    ///
    /// The in-memory collection stays correct for the current session, but a
    /// failed write means it will not survive a restart.
    #[error("could not persist transactions: {0}")]
    Persistence(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs.",
                )
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests that swap
    /// failures into the page's alert container rather than navigating.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::StoreLock => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_alert(
                    "Something went wrong",
                    "The transaction store is unavailable, check the server logs for more details.",
                ),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_alert(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
            }
        }
    }
}
