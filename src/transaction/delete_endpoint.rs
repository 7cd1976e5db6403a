//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    stores::{SharedTransactionStore, TransactionStore},
    transaction::core::TransactionId,
};

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The store holding the transaction collection.
    pub transaction_store: SharedTransactionStore,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// The transaction is removed immediately: no confirmation step and no undo.
/// Removing an ID that is not in the store is a silent no-op. Either way the
/// client is redirected to the dashboard so the summary cards, list and chart
/// all recompute from the current collection.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    store.remove(&transaction_id);

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
