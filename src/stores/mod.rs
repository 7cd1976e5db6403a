//! Persistence for the transaction collection.

mod json_file;
mod transaction;

pub use json_file::JsonFileStore;
pub use transaction::{SharedTransactionStore, TransactionStore};
