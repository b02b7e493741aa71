//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its choices and the fixed-point `Amount`
//! - Validation of client input and the `ValidationError` it produces
//! - Database functions for storing, querying, and managing transactions
//! - The JSON API handlers and the HTML transactions page

mod amount;
mod choices;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod form_endpoint;
mod list_endpoint;
mod payload;
mod retrieve_endpoint;
mod transactions_page;
mod update_endpoint;
mod validation;

pub use amount::{Amount, AmountError};
pub use choices::{Category, InvalidChoice, TransactionType};
pub use core::{
    Transaction, TransactionBuilder, TransactionId, create_transaction, create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use form_endpoint::submit_transaction_form;
pub use list_endpoint::list_transactions_endpoint;
pub use retrieve_endpoint::retrieve_transaction_endpoint;
pub use transactions_page::get_transactions_page;
pub use update_endpoint::{patch_transaction_endpoint, replace_transaction_endpoint};
pub use validation::ValidationError;

#[cfg(test)]
pub use core::{
    count_transactions, delete_transaction, get_all_transactions, get_transaction,
    update_transaction,
};
#[cfg(test)]
pub use payload::{RawField, TransactionPayload};
