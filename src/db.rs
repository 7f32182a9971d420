//! Database schema set up and the fixed bookkeeping rows inserted at start-up.

use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use time::{Date, macros::date};

use crate::{
    Error,
    transaction::{TransactionType, create_transaction_table},
};

/// A fixed bookkeeping transaction that must exist exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedRow {
    /// Stable identifier stored in the `seed_key` column.
    pub key: &'static str,
    pub date: Date,
    pub type_: TransactionType,
    pub category: &'static str,
    pub description: &'static str,
    pub amount: f64,
}

/// Savings carried over from before the current month.
pub const CARRIED_FORWARD_SAVINGS: SeedRow = SeedRow {
    key: "carried_forward_savings",
    date: date!(2025 - 04 - 30),
    type_: TransactionType::Income,
    category: "Previous Savings",
    description: "Carried forward savings before current month",
    amount: 5000.00,
};

/// Savings accumulated in the current month before tracking started.
pub const MONTH_TO_DATE_SAVINGS: SeedRow = SeedRow {
    key: "month_to_date_savings",
    date: date!(2025 - 05 - 01),
    type_: TransactionType::Income,
    category: "Month-to-date Savings",
    description: "Savings accumulated this month to date",
    amount: 1243.70,
};

/// The rows inserted by [initialize].
pub const SEED_ROWS: [SeedRow; 2] = [CARRIED_FORWARD_SAVINGS, MONTH_TO_DATE_SAVINGS];

/// Create the application tables and insert the bookkeeping rows.
///
/// Everything runs inside one exclusive transaction so a half initialized
/// database is never committed.
///
/// # Errors
/// Returns an [Error::SqlError] if any statement fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    for seed in SEED_ROWS {
        if seed_if_absent(&seed, &transaction)? {
            tracing::info!("inserted seed row {}", seed.key);
        }
    }

    transaction.commit()?;

    Ok(())
}

/// Insert `seed` unless a row with its key already exists.
///
/// A row written before seed keys existed (no key, same description) is
/// claimed by setting its key rather than inserting a second copy.
///
/// Returns `true` if a new row was inserted.
///
/// # Errors
/// Returns an [Error::SqlError] if any statement fails.
pub fn seed_if_absent(seed: &SeedRow, connection: &Connection) -> Result<bool, Error> {
    let existing: Option<i64> = connection
        .query_row(
            "SELECT id FROM transactions WHERE seed_key = ?1",
            [seed.key],
            |row| row.get(0),
        )
        .optional()?;

    if existing.is_some() {
        return Ok(false);
    }

    let adopted = connection.execute(
        "UPDATE transactions SET seed_key = ?1
        WHERE id = (
            SELECT id FROM transactions
            WHERE seed_key IS NULL AND description = ?2
            ORDER BY id
            LIMIT 1
        )",
        (seed.key, seed.description),
    )?;

    if adopted > 0 {
        tracing::debug!("adopted legacy row for seed {}", seed.key);
        return Ok(false);
    }

    connection.execute(
        "INSERT INTO transactions (date, type, category, description, amount, seed_key)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            seed.date,
            seed.type_,
            seed.category,
            seed.description,
            seed.amount,
            seed.key,
        ),
    )?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::transaction::{
        Transaction, TransactionType, count_transactions, create_transaction,
        create_transaction_table, get_all_transactions,
    };

    use super::{CARRIED_FORWARD_SAVINGS, MONTH_TO_DATE_SAVINGS, initialize, seed_if_absent};

    fn count_with_description(description: &str, connection: &Connection) -> u32 {
        connection
            .query_row(
                "SELECT COUNT(*) FROM transactions WHERE description = ?1",
                [description],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn initialize_inserts_both_seed_rows() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");

        let transactions = get_all_transactions(&conn).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].description, CARRIED_FORWARD_SAVINGS.description);
        assert_eq!(transactions[0].amount, 5000.0);
        assert_eq!(transactions[0].type_, TransactionType::Income);
        assert_eq!(transactions[1].description, MONTH_TO_DATE_SAVINGS.description);
        assert_eq!(transactions[1].amount, 1243.70);
    }

    #[test]
    fn seeding_twice_does_not_duplicate_rows() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 2);
        assert_eq!(
            count_with_description(CARRIED_FORWARD_SAVINGS.description, &conn),
            1
        );
        assert_eq!(
            count_with_description(MONTH_TO_DATE_SAVINGS.description, &conn),
            1
        );
    }

    #[test]
    fn seed_if_absent_reports_insertion() {
        let conn = Connection::open_in_memory().unwrap();
        create_transaction_table(&conn).unwrap();

        assert!(seed_if_absent(&CARRIED_FORWARD_SAVINGS, &conn).unwrap());
        assert!(!seed_if_absent(&CARRIED_FORWARD_SAVINGS, &conn).unwrap());
    }

    #[test]
    fn editing_seed_description_does_not_reseed() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn.execute(
            "UPDATE transactions SET description = 'Opening balance' WHERE seed_key = ?1",
            [CARRIED_FORWARD_SAVINGS.key],
        )
        .unwrap();

        initialize(&conn).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 2);
    }

    #[test]
    fn legacy_seed_row_is_adopted() {
        let conn = Connection::open_in_memory().unwrap();
        create_transaction_table(&conn).unwrap();
        let legacy = create_transaction(
            Transaction::build(
                TransactionType::Income,
                CARRIED_FORWARD_SAVINGS.amount,
                CARRIED_FORWARD_SAVINGS.date,
            )
            .category(CARRIED_FORWARD_SAVINGS.category)
            .description(CARRIED_FORWARD_SAVINGS.description),
            &conn,
        )
        .unwrap();

        let inserted = seed_if_absent(&CARRIED_FORWARD_SAVINGS, &conn).unwrap();

        assert!(!inserted);
        assert_eq!(count_transactions(&conn).unwrap(), 1);
        let key: Option<String> = conn
            .query_row(
                "SELECT seed_key FROM transactions WHERE id = ?1",
                [legacy.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(key.as_deref(), Some(CARRIED_FORWARD_SAVINGS.key));
    }

    #[test]
    fn user_rows_keep_null_seed_key() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        for _ in 0..2 {
            create_transaction(
                Transaction::build(
                    TransactionType::Expense,
                    3.0,
                    time::macros::date!(2025 - 05 - 02),
                )
                .category("Groceries")
                .description("Milk"),
                &conn,
            )
            .expect("user rows without a seed key should not clash on the unique index");
        }

        assert_eq!(count_transactions(&conn).unwrap(), 4);
    }
}
