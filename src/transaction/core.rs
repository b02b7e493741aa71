//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    transaction::{
        amount::Amount,
        choices::{Category, TransactionType},
        validation::{DESCRIPTION_MAX_LENGTH, OWNER_MAX_LENGTH},
    },
};

/// The database ID of a transaction.
pub type TransactionId = i64;

time::serde::format_description!(date_format, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Who the transaction belongs to. A free text label, not a user account.
    pub owner: String,
    /// Whether money was earned or spent.
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// When the transaction happened.
    #[serde(with = "date_format")]
    pub date: Date,
    /// What the transaction was for.
    pub category: Category,
    /// A short note about the transaction. May be empty.
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        owner: &str,
        transaction_type: TransactionType,
        amount: Amount,
        date: Date,
        category: Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            owner: owner.to_owned(),
            transaction_type,
            amount,
            date,
            category,
            description: String::new(),
        }
    }
}

/// The fields of a [Transaction] that has not been saved yet.
///
/// The text fields are expected to have been checked already, see
/// [crate::transaction::TransactionPayload]. The database rejects text that
/// is too long as a last resort.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Who the transaction belongs to, at most 30 characters.
    pub owner: String,
    /// Whether money was earned or spent.
    pub transaction_type: TransactionType,
    /// The amount of money.
    pub amount: Amount,
    /// When the transaction happened.
    pub date: Date,
    /// What the transaction was for.
    pub category: Category,
    /// A short note, at most 40 characters.
    pub description: String,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (owner, transaction_type, amount, date, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, owner, transaction_type, amount, date, category, description",
        )?
        .query_row(
            (
                builder.owner,
                builder.transaction_type,
                builder.amount,
                builder.date,
                builder.category,
                builder.description,
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
            "SELECT id, owner, transaction_type, amount, date, category, description
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction in the order they were created.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, owner, transaction_type, amount, date, category, description
             FROM \"transaction\" ORDER BY id ASC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Overwrite every field except the ID of the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "UPDATE \"transaction\"
             SET owner = ?1, transaction_type = ?2, amount = ?3, date = ?4, category = ?5, description = ?6
             WHERE id = ?7
             RETURNING id, owner, transaction_type, amount, date, category, description",
        )?
        .query_row(
            (
                builder.owner,
                builder.transaction_type,
                builder.amount,
                builder.date,
                builder.category,
                builder.description,
                id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    match rows_affected {
        0 => Err(Error::NotFound),
        _ => Ok(()),
    }
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner TEXT NOT NULL CHECK (length(owner) BETWEEN 1 AND {OWNER_MAX_LENGTH}),
                transaction_type TEXT NOT NULL CHECK (transaction_type IN ('Income', 'Expense')),
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN (
                    'Salary', 'Gift', 'Earnings', 'Food', 'Rent', 'Personal', 'Investment', 'Savings'
                )),
                description TEXT NOT NULL DEFAULT '' CHECK (length(description) <= {DESCRIPTION_MAX_LENGTH})
                )"
        ),
        (),
    )?;

    // Ensure the sequence starts at 1. sqlite_sequence has no unique key on name.
    connection.execute(
        "INSERT INTO sqlite_sequence (name, seq)
         SELECT 'transaction', 0
         WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let owner = row.get(1)?;
    let transaction_type = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;
    let category = row.get(5)?;
    let description = row.get(6)?;

    Ok(Transaction {
        id,
        owner,
        transaction_type,
        amount,
        date,
        category,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================
