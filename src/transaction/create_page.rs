//! Defines the route handler for the page for recording a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{
        form::{FormMode, FormValues, field_error_reset_script, transaction_form},
        validate::FieldErrors,
    },
};

fn create_transaction_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = transaction_form(
        &FormMode::Create,
        &FormValues::with_default_date(today),
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
        "Add Transaction",
        &[dollar_input_styles(), field_error_reset_script()],
        &content,
    )
}

/// The state needed for the page for recording a new transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for recording a new transaction.
///
/// The form starts blank apart from the date, which defaults to today. Dates
/// after today cannot be picked.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    Ok(create_transaction_view(today).into_response())
}
