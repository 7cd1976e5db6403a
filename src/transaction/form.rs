//! The shared form for recording and editing transactions.

use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    endpoints,
    endpoints::format_endpoint,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, loading_spinner,
    },
    transaction::{
        core::{Transaction, TransactionId},
        validate::{FieldErrors, TransactionInput},
    },
};

const FIELD_ERROR_STYLE: &str = "text-sm text-red-600 dark:text-red-400 mt-1";

/// Which flow the form is rendered for.
pub(crate) enum FormMode {
    /// Recording a new transaction.
    Create,
    /// Editing the transaction with the given ID.
    Edit {
        /// The ID of the transaction being edited.
        transaction_id: TransactionId,
    },
}

/// The values the form's inputs are rendered with.
///
/// These are kept as raw text so that a submission that failed validation can
/// be shown back exactly as the user entered it.
#[derive(Debug, Default)]
pub(crate) struct FormValues {
    /// The text for the amount input.
    pub amount: Option<String>,
    /// The text for the date input, as "YYYY-MM-DD".
    pub date: Option<String>,
    /// The text for the description input.
    pub description: Option<String>,
}

impl FormValues {
    /// The values for a blank form: only the date is filled in, with `today`.
    pub fn with_default_date(today: Date) -> Self {
        Self {
            date: Some(today.to_string()),
            ..Self::default()
        }
    }

    /// Echo back a submission, e.g. after a validation failure.
    pub fn from_input(input: &TransactionInput) -> Self {
        Self {
            amount: input.amount.clone(),
            date: input.date.clone(),
            description: input.description.clone(),
        }
    }

    /// Pre-fill the form with a stored transaction for editing.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            amount: Some(transaction.amount.to_string()),
            date: Some(transaction.date.to_string()),
            description: Some(transaction.description.clone()),
        }
    }
}

/// Render the add/edit transaction form.
///
/// On submit the form posts to the create endpoint (or puts to the edit
/// endpoint), with the submit button disabled and its spinner shown while the
/// request is in flight. A failed validation response re-renders this same
/// markup in place with a message under each invalid input; `values` echoes
/// the rejected submission back into the inputs.
pub(crate) fn transaction_form(
    mode: &FormMode,
    values: &FormValues,
    errors: &FieldErrors,
    max_date: Date,
) -> Markup {
    let (heading, submit_label) = match mode {
        FormMode::Create => ("Add New Transaction", "Save Transaction"),
        FormMode::Edit { .. } => ("Edit Transaction", "Update Transaction"),
    };
    let create_route = matches!(mode, FormMode::Create).then_some(endpoints::TRANSACTIONS_API);
    let edit_route = match mode {
        FormMode::Create => None,
        FormMode::Edit { transaction_id } => {
            Some(format_endpoint(endpoints::TRANSACTION, transaction_id))
        }
    };
    let spinner = loading_spinner();

    html! {
        form
            id="transaction-form"
            hx-post=[create_route]
            hx-put=[edit_route.as_deref()]
            hx-target-error="this"
            hx-swap="outerHTML"
            hx-disabled-elt="find button"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { (heading) }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        autofocus
                        value=[values.amount.as_deref()]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if let Some(message) = errors.amount {
                    p data-field-error class=(FIELD_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Date"
                }

                input
                    name="date"
                    id="date"
                    type="date"
                    max=(max_date)
                    value=[values.date.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(message) = errors.date {
                    p data-field-error class=(FIELD_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Description"
                }

                textarea
                    name="description"
                    id="description"
                    rows="3"
                    placeholder="Enter transaction description..."
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (values.description.as_deref().unwrap_or(""))
                }

                @if let Some(message) = errors.description {
                    p data-field-error class=(FIELD_ERROR_STYLE) { (message) }
                }
            }

            div class="flex gap-3 pt-2"
            {
                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " " (submit_label)
                }

                a href=(endpoints::DASHBOARD_VIEW) class=(BUTTON_SECONDARY_STYLE)
                {
                    "Cancel"
                }
            }
        }
    }
}

/// Returns a script that removes a field's inline error message as soon as
/// that field is edited, without waiting for the next submission.
pub(crate) fn field_error_reset_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(
        r#"
        document.addEventListener('input', function (event) {
            const field = event.target.closest('#transaction-form div');
            if (!field) { return; }
            field.querySelectorAll('[data-field-error]').forEach((error) => error.remove());
        });
        "#
        .to_owned(),
    ))
}
