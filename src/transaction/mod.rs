//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - The forms and handlers for adding, deleting and listing transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod delete_selector;
mod form;
mod reset_endpoint;
mod transactions_page;

pub use core::{
    Transaction, TransactionBuilder, TransactionType, count_transactions, create_transaction,
    create_transaction_table, get_all_transactions, get_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{
    delete_selected_transaction_endpoint, delete_transaction, delete_transaction_endpoint,
};
pub use delete_selector::{delete_choices, delete_selector_view, get_delete_options};
pub use form::new_transaction_form;
pub use reset_endpoint::{delete_transactions_on_date, reset_form, reset_transactions_endpoint};
pub use transactions_page::get_transactions_page;
