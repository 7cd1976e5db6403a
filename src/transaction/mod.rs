//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the generation of IDs and creation timestamps
//! - Validation of submitted transaction fields
//! - View handlers for the pages and endpoints that record, edit and delete
//!   transactions

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod validate;

pub use self::core::{Transaction, TransactionId, next_transaction_id};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
