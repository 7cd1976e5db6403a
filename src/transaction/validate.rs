//! Validation of submitted transaction fields.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The raw values submitted for a transaction.
///
/// Fields arrive as text straight from the form; an empty input is parsed as
/// `None` by axum_extra's `Form`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInput {
    /// The amount field as entered.
    pub amount: Option<String>,
    /// The date field as entered, expected as "YYYY-MM-DD".
    pub date: Option<String>,
    /// The description field as entered.
    pub description: Option<String>,
}

/// One error message per invalid field of a submission.
///
/// The caller renders each message next to the input it belongs to.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// The message for the amount field, if it was invalid.
    pub amount: Option<&'static str>,
    /// The message for the date field, if it was invalid.
    pub date: Option<&'static str>,
    /// The message for the description field, if it was invalid.
    pub description: Option<&'static str>,
}

/// The parsed and normalized fields of a valid submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    /// The parsed amount. Never zero.
    pub amount: f64,
    /// The parsed date. Never after the reference date.
    pub date: Date,
    /// The description with surrounding whitespace removed.
    pub description: String,
}

/// Check a submitted transaction against the validation rules.
///
/// The rules are evaluated independently rather than short-circuiting on the
/// first failure, so the caller can show every violation at once:
///
/// - the amount must be present, parse as a finite number and not be zero,
/// - the date must be present, well-formed and no later than `today`,
/// - the description must have at least 3 characters once trimmed.
///
/// `today` is the current date in the user's timezone; `today` itself is
/// allowed, only dates strictly after it are rejected.
pub fn validate(
    input: &TransactionInput,
    today: Date,
) -> Result<ValidatedTransaction, FieldErrors> {
    let mut errors = FieldErrors::default();

    let amount = match input.amount.as_deref().map(str::trim) {
        None | Some("") => {
            errors.amount = Some("Amount is required");
            None
        }
        Some(text) => match text.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount != 0.0 => Some(amount),
            _ => {
                errors.amount = Some("Amount must be a valid number");
                None
            }
        },
    };

    let date = match input.date.as_deref().map(str::trim) {
        None | Some("") => {
            errors.date = Some("Date is required");
            None
        }
        Some(text) => match Date::parse(text, DATE_FORMAT) {
            Ok(date) if date > today => {
                errors.date = Some("Date cannot be in the future");
                None
            }
            Ok(date) => Some(date),
            Err(_) => {
                errors.date = Some("Date must be a valid date");
                None
            }
        },
    };

    let description = match input.description.as_deref().map(str::trim) {
        None | Some("") => {
            errors.description = Some("Description is required");
            None
        }
        Some(text) if text.chars().count() < 3 => {
            errors.description = Some("Description must be at least 3 characters long");
            None
        }
        Some(text) => Some(text.to_owned()),
    };

    match (amount, date, description) {
        (Some(amount), Some(date), Some(description)) => Ok(ValidatedTransaction {
            amount,
            date,
            description,
        }),
        _ => Err(errors),
    }
}
