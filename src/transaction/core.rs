//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The text stored in the database and sent by HTML forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The day the transaction is attributed to.
    pub date: Date,
    /// Whether this transaction is income or an expense.
    pub type_: TransactionType,
    /// A free-form label, usually one of the suggested categories.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(type_: TransactionType, amount: f64, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            date,
            type_,
            category: String::new(),
            description: String::new(),
            amount,
        }
    }

    /// The signed amount, positive for income and negative for expenses.
    pub fn net_amount(&self) -> f64 {
        match self.type_ {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let transaction = Transaction::build(TransactionType::Expense, 45.99, date!(2025 - 01 - 15))
///     .category("Restaurant")
///     .description("Coffee shop purchase");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The day the transaction is attributed to.
    pub date: Date,
    /// Whether this transaction is income or an expense.
    pub type_: TransactionType,
    /// The category label, e.g. "Groceries" or a user supplied label.
    pub category: String,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The monetary amount, must be greater than zero.
    pub amount: f64,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// The statement is committed immediately.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is zero or negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount.is_nan() || builder.amount <= 0.0 {
        return Err(Error::NonPositiveAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO transactions (date, type, category, description, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, date, type, category, description, amount",
        )?
        .query_row(
            (
                builder.date,
                builder.type_,
                builder.category,
                builder.description,
                builder.amount,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, date, type, category, description, amount FROM transactions WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction in the database, ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, type, category, description, amount FROM transactions ORDER BY id",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Tables created before seed rows had a stable key get the `seed_key`
/// column added in place.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // The soft-delete flag is kept so database files from older versions keep
    // the same shape. Deletes remove rows, so it is always 0.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                type TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                deleted INTEGER DEFAULT 0,
                seed_key TEXT
                )",
        (),
    )?;

    let has_seed_key: bool = connection.query_row(
        "SELECT COUNT(*) > 0 FROM pragma_table_info('transactions') WHERE name = 'seed_key'",
        [],
        |row| row.get(0),
    )?;

    if !has_seed_key {
        tracing::info!("adding seed_key column to existing transactions table");
        connection.execute("ALTER TABLE transactions ADD COLUMN seed_key TEXT", ())?;
    }

    connection.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_transactions_seed_key ON transactions(seed_key)",
        (),
    )?;

    // Used by the reset by date action.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let type_ = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;
    let amount = row.get(5)?;

    Ok(Transaction {
        id,
        date,
        type_,
        category,
        description,
        amount,
    })
}

// ============================================================================
// TESTS
// ============================================================================
