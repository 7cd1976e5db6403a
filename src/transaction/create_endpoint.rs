//! Defines the endpoint for recording a new transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    html::render,
    stores::{SharedTransactionStore, TransactionStore},
    timezone::current_local_date,
    transaction::{
        core::{Transaction, next_transaction_id},
        form::{FormMode, FormValues, transaction_form},
        validate::{TransactionInput, validate},
    },
};

/// The state needed to record a new transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The store holding the transaction collection.
    pub transaction_store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for recording a new transaction.
///
/// The submission is validated first; if any field is invalid the form is
/// re-rendered in place with a message under each offending input and the
/// store is left untouched. On success the transaction is given its ID and
/// creation timestamp, inserted at the front of the collection, and the
/// client is redirected to the dashboard so every derived view recomputes.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(input): Form<TransactionInput>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let valid = match validate(&input, today) {
        Ok(valid) => valid,
        Err(errors) => {
            return render(
                StatusCode::UNPROCESSABLE_ENTITY,
                transaction_form(
                    &FormMode::Create,
                    &FormValues::from_input(&input),
                    &errors,
                    today,
                ),
            );
        }
    };

    let transaction = Transaction {
        id: next_transaction_id(),
        amount: valid.amount,
        date: valid.date,
        description: valid.description,
        created_at: OffsetDateTime::now_utc(),
    };

    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };
    store.insert(transaction);

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
