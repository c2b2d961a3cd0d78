//! Defines the core data models and database queries for transactions.

use std::ops::RangeInclusive;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or sent it out.
///
/// Amounts are stored as magnitudes; the kind carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The kind as the string stored in the database and shown in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind {other:?}").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always non-negative.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category the transaction belongs to, e.g. "Food", "Job".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, kind: TransactionKind) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            kind,
            category: "Other".to_owned(),
            description: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The category defaults to "Other" and the description to an empty string.
/// Pass the builder to [create_transaction] to insert the row and get back the
/// stored [Transaction] with its ID.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction, a non-negative magnitude.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category of the transaction.
    pub category: String,
    /// A human-readable description of the transaction.
    pub description: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

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
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or not finite,
/// - or [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !builder.amount.is_finite() || builder.amount < 0.0 {
        return Err(Error::InvalidAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, kind, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, date, kind, category, description",
        )?
        .query_row(
            (
                builder.amount,
                builder.date,
                builder.kind,
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
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, kind, category, description
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions, ordered by date and then by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, amount, date, kind, category, description
             FROM \"transaction\" ORDER BY date, id",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

/// Retrieve transactions whose date falls within `range`, ordered by date and
/// then by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_date_range(
    range: RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, amount, date, kind, category, description
             FROM \"transaction\" WHERE date BETWEEN ?1 AND ?2 ORDER BY date, id",
        )?
        .query_map((range.start(), range.end()), map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the dashboard's date-range query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let kind = row.get(3)?;
    let category = row.get(4)?;
    let description = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        date,
        kind,
        category,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Transaction, TransactionKind, create_transaction, get_all_transactions,
            get_transaction, get_transactions_in_date_range,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(
            Transaction::build(amount, date!(2024 - 03 - 05), TransactionKind::Expense)
                .category("Food")
                .description("Groceries"),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.kind, TransactionKind::Expense);
                assert_eq!(transaction.category, "Food");
                assert_eq!(transaction.description, "Groceries");
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_negative_amount() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(-12.3, date!(2024 - 03 - 05), TransactionKind::Expense),
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidAmount(-12.3)));
    }

    #[test]
    fn create_fails_on_non_finite_amount() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(f64::INFINITY, date!(2024 - 03 - 05), TransactionKind::Income),
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidAmount(f64::INFINITY)));
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(50.0, date!(2024 - 03 - 10), TransactionKind::Income)
                .category("Job"),
            &conn,
        )
        .expect("Could not create transaction");

        let got = get_transaction(created.id, &conn).expect("Could not get transaction");

        assert_eq!(got, created);
    }

    #[test]
    fn get_fails_on_missing_id() {
        let conn = get_test_connection();

        let result = get_transaction(999, &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn kind_round_trips_through_database() {
        let conn = get_test_connection();

        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let created =
                create_transaction(Transaction::build(1.0, date!(2024 - 03 - 01), kind), &conn)
                    .expect("Could not create transaction");

            let got = get_transaction(created.id, &conn).expect("Could not get transaction");

            assert_eq!(got.kind, kind);
        }
    }

    #[test]
    fn get_all_orders_by_date() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(2.0, date!(2024 - 03 - 20), TransactionKind::Expense),
            &conn,
        )
        .expect("Could not create transaction");
        create_transaction(
            Transaction::build(1.0, date!(2024 - 03 - 05), TransactionKind::Expense),
            &conn,
        )
        .expect("Could not create transaction");

        let transactions = get_all_transactions(&conn).expect("Could not get transactions");

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].date, date!(2024 - 03 - 05));
        assert_eq!(transactions[1].date, date!(2024 - 03 - 20));
    }

    #[test]
    fn date_range_excludes_other_months() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(1.0, date!(2024 - 02 - 29), TransactionKind::Expense),
            &conn,
        )
        .expect("Could not create transaction");
        let march = create_transaction(
            Transaction::build(2.0, date!(2024 - 03 - 15), TransactionKind::Expense),
            &conn,
        )
        .expect("Could not create transaction");
        create_transaction(
            Transaction::build(3.0, date!(2024 - 04 - 01), TransactionKind::Expense),
            &conn,
        )
        .expect("Could not create transaction");

        let transactions = get_transactions_in_date_range(
            date!(2024 - 03 - 01)..=date!(2024 - 03 - 31),
            &conn,
        )
        .expect("Could not get transactions");

        assert_eq!(transactions, vec![march]);
    }
}
