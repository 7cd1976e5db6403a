//! Defines the core transaction model and the generation of transaction identity.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// The ID of a transaction.
///
/// IDs are derived from the clock at creation time and unique within the
/// collection. See [next_transaction_id].
pub type TransactionId = String;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One recorded expense.
///
/// The `amount` keeps whatever sign it was entered with, but the app treats
/// it as a magnitude: every display and aggregate uses the absolute value.
///
/// The serialized form uses camelCase field names and writes the date as
/// "YYYY-MM-DD" and the creation timestamp as RFC 3339, e.g.:
///
/// ```json
/// {"id": "1705310000000", "amount": 45.5, "date": "2024-01-15",
///  "description": "Groceries", "createdAt": "2024-01-15T09:30:00Z"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction. Assigned once at creation, never changed.
    pub id: TransactionId,
    /// The amount of money spent in this transaction.
    pub amount: f64,
    /// When the expense occurred. Never later than the day it was recorded.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// A text description of what the expense was for.
    pub description: String,
    /// When the transaction was first recorded. Edits never change this; it
    /// is only shown as an "Added ..." audit line in the transaction list.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The most recent value handed out by [next_transaction_id], in milliseconds.
static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generate a unique transaction ID from the current time.
///
/// The ID is the Unix time in milliseconds as a decimal string. Two
/// transactions added within the same millisecond would collide, so the
/// generator remembers the last value it issued and moves one past it
/// whenever the clock has not advanced.
pub fn next_transaction_id() -> TransactionId {
    let now_millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let mut last = LAST_ISSUED_MILLIS.load(Ordering::Relaxed);

    loop {
        let next = now_millis.max(last + 1);

        match LAST_ISSUED_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next.to_string(),
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod transaction_model_tests {
    use time::macros::{date, datetime};

    use super::{Transaction, next_transaction_id};

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut previous = next_transaction_id().parse::<i64>().unwrap();

        for _ in 0..1000 {
            let id = next_transaction_id().parse::<i64>().unwrap();
            assert!(id > previous, "want ID greater than {previous}, got {id}");
            previous = id;
        }
    }

    #[test]
    fn serializes_with_expected_field_names_and_formats() {
        let transaction = Transaction {
            id: "1705310000000".to_owned(),
            amount: 45.5,
            date: date!(2024 - 01 - 15),
            description: "Groceries".to_owned(),
            created_at: datetime!(2024-01-15 9:30 UTC),
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&transaction).unwrap()).unwrap();

        assert_eq!(value["id"], "1705310000000");
        assert_eq!(value["amount"], 45.5);
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["description"], "Groceries");
        assert!(
            value.get("createdAt").is_some(),
            "want camelCase createdAt field, got {value}"
        );
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn deserializes_its_own_output() {
        let transaction = Transaction {
            id: "1705310000000".to_owned(),
            amount: -12.3,
            date: date!(2023 - 11 - 02),
            description: "Bus fare".to_owned(),
            created_at: datetime!(2023-11-02 18:00 UTC),
        };

        let text = serde_json::to_string(&transaction).unwrap();
        let parsed: Transaction = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, transaction);
    }
}
