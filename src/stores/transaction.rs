//! Defines the transaction store trait.

use std::sync::{Arc, Mutex};

use crate::transaction::Transaction;

/// Owns the in-memory transaction collection and its persistence.
///
/// The collection is ordered with the most recently added transaction first.
/// Implementations persist the full collection after every mutation; there is
/// no incremental or batched persistence.
pub trait TransactionStore {
    /// The current transaction collection, most recently added first.
    fn transactions(&self) -> &[Transaction];

    /// Add `transaction` to the front of the collection, then persist.
    fn insert(&mut self, transaction: Transaction);

    /// Replace the transaction that has the same ID as `transaction`, keeping
    /// its position in the collection, then persist.
    ///
    /// Does nothing if no transaction with a matching ID exists. IDs are
    /// stable once assigned, so this case should not occur in practice.
    fn update(&mut self, transaction: Transaction);

    /// Remove the transaction with the given `id`, then persist.
    ///
    /// Does nothing if no transaction with a matching ID exists.
    fn remove(&mut self, id: &str);
}

/// The transaction store as shared between the route handlers.
pub type SharedTransactionStore = Arc<Mutex<dyn TransactionStore + Send>>;
