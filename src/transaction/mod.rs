//! Transactions and the endpoints for creating and deleting them.

mod core;
mod create_endpoint;
mod delete_endpoint;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, TransactionKind, create_transaction,
    create_transaction_table, get_all_transactions, get_transaction,
    get_transactions_in_date_range,
};
pub use create_endpoint::{CreateTransactionState, create_transaction_endpoint};
pub use delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint};
