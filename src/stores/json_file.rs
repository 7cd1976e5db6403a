//! A transaction store backed by a single JSON document on disk.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, stores::TransactionStore, transaction::Transaction};

/// Stores the transaction collection as a JSON array in a single file.
///
/// The whole collection is loaded once when the store is opened and rewritten
/// in full after every mutation. The file contents are the serialized array
/// itself, e.g. `[{"id": "...", "amount": -12.5, ...}]`.
pub struct JsonFileStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any previously saved transactions.
    ///
    /// A missing file yields an empty collection. A file that cannot be
    /// parsed at all also yields an empty collection: the contents are
    /// non-critical personal data and refusing to start would make the app
    /// unusable on first run or after the file has been tampered with.
    /// Records that fail to deserialize are dropped individually so that one
    /// bad record does not discard the rest.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let transactions = load_transactions(&path);

        Self { path, transactions }
    }

    /// Serialize the full collection and overwrite the file at the store's
    /// path. The previous contents are replaced; there is no partial-write
    /// recovery, the last write wins.
    ///
    /// # Errors
    /// Returns [Error::Persistence] if the collection cannot be serialized or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), Error> {
        let text = serde_json::to_string(&self.transactions)
            .map_err(|error| Error::Persistence(error.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| Error::Persistence(error.to_string()))?;
        }

        fs::write(&self.path, text).map_err(|error| Error::Persistence(error.to_string()))
    }

    /// Persist after a mutation. A failed write is logged and otherwise
    /// ignored: the in-memory collection stays the source of truth for the
    /// rest of the session, it just will not survive a restart.
    fn persist(&self) {
        if let Err(error) = self.save() {
            tracing::error!("{error}");
        }
    }
}

impl TransactionStore for JsonFileStore {
    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn insert(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        self.persist();
    }

    fn update(&mut self, transaction: Transaction) {
        let Some(existing) = self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
        else {
            tracing::warn!(
                "tried to update transaction {}, which is not in the store",
                transaction.id
            );
            return;
        };

        *existing = transaction;
        self.persist();
    }

    fn remove(&mut self, id: &str) {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        if self.transactions.len() == count_before {
            tracing::warn!("tried to remove transaction {id}, which is not in the store");
            return;
        }

        self.persist();
    }
}

fn load_transactions(path: &Path) -> Vec<Transaction> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(error) => {
            tracing::warn!(
                "could not read transactions from {}: {error}",
                path.display()
            );
            return Vec::new();
        }
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(&text) {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!(
                "could not parse transactions in {}, starting with an empty collection: {error}",
                path.display()
            );
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Transaction>(record) {
            Ok(transaction) => Some(transaction),
            Err(error) => {
                tracing::warn!("dropping malformed transaction record: {error}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod json_file_store_tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;
    use time::{Date, macros::date, macros::datetime};

    use crate::{stores::TransactionStore, transaction::Transaction};

    use super::JsonFileStore;

    fn test_store() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("could not create temporary directory");
        let path = dir.path().join("transactions.json");

        (dir, path)
    }

    fn test_transaction(id: &str, amount: f64, date: Date, description: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            amount,
            date,
            description: description.to_owned(),
            created_at: datetime!(2024-01-15 9:30 UTC),
        }
    }

    #[test]
    fn open_with_missing_file_yields_empty_collection() {
        let (_dir, path) = test_store();

        let store = JsonFileStore::open(&path);

        assert!(store.transactions().is_empty());
    }

    #[test]
    fn open_with_unparseable_file_yields_empty_collection() {
        let (_dir, path) = test_store();
        fs::write(&path, "definitely not JSON").unwrap();

        let store = JsonFileStore::open(&path);

        assert!(store.transactions().is_empty());
    }

    #[test]
    fn open_drops_malformed_records_and_keeps_the_rest() {
        let (_dir, path) = test_store();
        fs::write(
            &path,
            r#"[
                {"id": "1705310000000", "amount": 45.5, "date": "2024-01-15",
                 "description": "Groceries", "createdAt": "2024-01-15T09:30:00Z"},
                {"id": 42, "amount": "oops"}
            ]"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path);

        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].description, "Groceries");
    }

    #[test]
    fn insert_then_reopen_round_trips_all_fields() {
        let (_dir, path) = test_store();
        let transaction =
            test_transaction("1705310000000", 45.50, date!(2024 - 01 - 15), "Groceries");

        let mut store = JsonFileStore::open(&path);
        store.insert(transaction.clone());
        drop(store);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.transactions(), &[transaction]);
    }

    #[test]
    fn insert_prepends() {
        let (_dir, path) = test_store();
        let mut store = JsonFileStore::open(&path);

        store.insert(test_transaction("1", 1.0, date!(2024 - 01 - 01), "first"));
        store.insert(test_transaction("2", 2.0, date!(2024 - 01 - 02), "second"));

        let descriptions: Vec<&str> = store
            .transactions()
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["second", "first"]);
    }

    #[test]
    fn update_replaces_in_place() {
        let (_dir, path) = test_store();
        let mut store = JsonFileStore::open(&path);
        store.insert(test_transaction("1", 1.0, date!(2024 - 01 - 01), "first"));
        store.insert(test_transaction("2", 2.0, date!(2024 - 01 - 02), "second"));
        store.insert(test_transaction("3", 3.0, date!(2024 - 01 - 03), "third"));
        let original = store.transactions()[1].clone();

        let mut updated = original.clone();
        updated.description = "renamed".to_owned();
        updated.amount = 20.0;
        store.update(updated);

        assert_eq!(store.transactions().len(), 3);
        let replacement = &store.transactions()[1];
        assert_eq!(replacement.id, original.id);
        assert_eq!(replacement.description, "renamed");
        assert_eq!(replacement.created_at, original.created_at);
    }

    #[test]
    fn update_with_unknown_id_changes_nothing() {
        let (_dir, path) = test_store();
        let mut store = JsonFileStore::open(&path);
        store.insert(test_transaction("1", 1.0, date!(2024 - 01 - 01), "first"));
        let before = store.transactions().to_vec();

        store.update(test_transaction(
            "404",
            9.0,
            date!(2024 - 01 - 02),
            "missing",
        ));

        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn remove_deletes_exactly_one_transaction() {
        let (_dir, path) = test_store();
        let mut store = JsonFileStore::open(&path);
        store.insert(test_transaction("1", 1.0, date!(2024 - 01 - 01), "first"));
        store.insert(test_transaction("2", 2.0, date!(2024 - 01 - 02), "second"));

        store.remove("1");

        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].id, "2");
    }

    #[test]
    fn remove_with_unknown_id_changes_nothing() {
        let (_dir, path) = test_store();
        let mut store = JsonFileStore::open(&path);
        store.insert(test_transaction("1", 1.0, date!(2024 - 01 - 01), "first"));
        let before = store.transactions().to_vec();

        store.remove("404");

        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn every_mutation_overwrites_the_file() {
        let (_dir, path) = test_store();
        let mut store = JsonFileStore::open(&path);
        store.insert(test_transaction("1", 1.0, date!(2024 - 01 - 01), "first"));
        store.insert(test_transaction("2", 2.0, date!(2024 - 01 - 02), "second"));
        store.remove("1");

        let reopened = JsonFileStore::open(&path);

        assert_eq!(reopened.transactions().len(), 1);
        assert_eq!(reopened.transactions()[0].id, "2");
    }
}
