//! Defines the route handler for the page for editing an existing transaction.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    stores::{SharedTransactionStore, TransactionStore},
    timezone::current_local_date,
    transaction::{
        core::TransactionId,
        form::{FormMode, FormValues, field_error_reset_script, transaction_form},
        validate::FieldErrors,
    },
};

fn edit_transaction_view(transaction_id: TransactionId, values: FormValues, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW).into_html();
    let form = transaction_form(
        &FormMode::Edit { transaction_id },
        &values,
        &FieldErrors::default(),
        today,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (form)
        }
    };

    base(
        "Edit Transaction",
        &[dollar_input_styles(), field_error_reset_script()],
        &content,
    )
}

/// The state needed for the page for editing a transaction.
#[derive(Clone)]
pub struct EditTransactionPageState {
    /// The store holding the transaction collection.
    pub transaction_store: SharedTransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for editing a transaction, pre-filled with its stored
/// values.
///
/// # Errors
/// Returns [Error::NotFound] if no transaction has the requested ID.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let values = {
        let store = state
            .transaction_store
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
            .map_err(|_| Error::StoreLock)?;

        let transaction = store
            .transactions()
            .iter()
            .find(|transaction| transaction.id == transaction_id)
            .ok_or(Error::NotFound)?;

        FormValues::from_transaction(transaction)
    };

    Ok(edit_transaction_view(transaction_id, values, today).into_response())
}
