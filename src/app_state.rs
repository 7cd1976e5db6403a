//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::stores::{SharedTransactionStore, TransactionStore};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The store holding the transaction collection.
    pub transaction_store: SharedTransactionStore,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] from a transaction store.
    ///
    /// The store is constructed once per session and shared by reference with
    /// every route handler. `local_timezone` should be a valid, canonical
    /// timezone name, e.g. "Pacific/Auckland"; it determines what counts as
    /// "today" when validating and defaulting transaction dates.
    pub fn new(store: impl TransactionStore + Send + 'static, local_timezone: &str) -> Self {
        Self {
            transaction_store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
