//! Defines the endpoint for updating an existing transaction.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    html::render,
    stores::{SharedTransactionStore, TransactionStore},
    timezone::current_local_date,
    transaction::{
        core::{Transaction, TransactionId},
        form::{FormMode, FormValues, transaction_form},
        validate::{TransactionInput, validate},
    },
};

/// The state needed to update a transaction.
#[derive(Clone)]
pub struct EditTransactionState {
    /// The store holding the transaction collection.
    pub transaction_store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for updating a transaction.
///
/// The submission is validated exactly like a new transaction; a failed
/// validation re-renders the edit form in place and leaves the store
/// untouched. On success the stored transaction keeps its ID, creation
/// timestamp and position in the collection while the remaining fields are
/// replaced, and the client is redirected to the dashboard.
///
/// Updating an ID that is not in the store is a silent no-op: IDs are stable
/// once assigned, so this should not occur.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
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
                    &FormMode::Edit { transaction_id },
                    &FormValues::from_input(&input),
                    &errors,
                    today,
                ),
            );
        }
    };

    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    let updated = store
        .transactions()
        .iter()
        .find(|transaction| transaction.id == transaction_id)
        .map(|existing| Transaction {
            id: existing.id.clone(),
            amount: valid.amount,
            date: valid.date,
            description: valid.description.clone(),
            created_at: existing.created_at,
        });

    match updated {
        Some(updated) => store.update(updated),
        None => tracing::warn!("tried to update transaction {transaction_id}, which does not exist"),
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::{date, datetime};

    use crate::{
        stores::{JsonFileStore, SharedTransactionStore, TransactionStore},
        transaction::{Transaction, validate::TransactionInput},
    };

    use super::{EditTransactionState, edit_transaction_endpoint};

    fn test_transaction(id: &str, description: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            amount: 12.3,
            date: date!(2024 - 01 - 10),
            description: description.to_owned(),
            created_at: datetime!(2024-01-10 8:00 UTC),
        }
    }

    fn test_state(
        transactions: Vec<Transaction>,
    ) -> (tempfile::TempDir, EditTransactionState) {
        let dir = tempfile::tempdir().expect("could not create temporary directory");
        let mut store = JsonFileStore::open(dir.path().join("transactions.json"));
        for transaction in transactions.into_iter().rev() {
            store.insert(transaction);
        }
        let store: SharedTransactionStore = Arc::new(Mutex::new(store));

        (
            dir,
            EditTransactionState {
                transaction_store: store,
                local_timezone: "Etc/UTC".to_owned(),
            },
        )
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let (_dir, state) = test_state(vec![
            test_transaction("1", "first"),
            test_transaction("2", "second"),
            test_transaction("3", "third"),
        ]);
        let original = state.transaction_store.lock().unwrap().transactions()[1].clone();
        let input = TransactionInput {
            amount: Some("99.90".to_owned()),
            date: Some("2024-02-01".to_owned()),
            description: Some("renamed".to_owned()),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path("2".to_owned()),
            Form(input),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            "/dashboard"
        );

        let store = state.transaction_store.lock().unwrap();
        let transactions = store.transactions();
        assert_eq!(transactions.len(), 3, "an edit must not change the count");

        // The edited transaction keeps its position, ID and creation time.
        let updated = &transactions[1];
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.amount, 99.90);
        assert_eq!(updated.date, date!(2024 - 02 - 01));
        assert_eq!(updated.description, "renamed");
    }

    #[tokio::test]
    async fn invalid_submission_rerenders_form_and_does_not_mutate_store() {
        let (_dir, state) = test_state(vec![test_transaction("1", "first")]);
        let before = state.transaction_store.lock().unwrap().transactions().to_vec();
        let input = TransactionInput {
            amount: Some("45.50".to_owned()),
            date: Some("2024-01-15".to_owned()),
            description: Some("ab".to_owned()),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path("1".to_owned()),
            Form(input),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("Description must be at least 3 characters long"));

        let store = state.transaction_store.lock().unwrap();
        assert_eq!(store.transactions(), before.as_slice());
    }

    #[tokio::test]
    async fn updating_an_unknown_id_is_a_silent_no_op() {
        let (_dir, state) = test_state(vec![test_transaction("1", "first")]);
        let before = state.transaction_store.lock().unwrap().transactions().to_vec();
        let input = TransactionInput {
            amount: Some("99.90".to_owned()),
            date: Some("2024-02-01".to_owned()),
            description: Some("renamed".to_owned()),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path("404".to_owned()),
            Form(input),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let store = state.transaction_store.lock().unwrap();
        assert_eq!(store.transactions(), before.as_slice());
    }
}
