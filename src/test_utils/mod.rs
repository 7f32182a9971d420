#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_select, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_alert, assert_valid_html, parse_html_document, parse_html_fragment, table_rows,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok};

use rusqlite::Connection;
use time::Date;

use crate::{
    db::initialize,
    transaction::{Transaction, TransactionType, create_transaction},
};

/// An in-memory database with the schema and seed rows.
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&conn).expect("Could not initialize database.");
    conn
}

/// An in-memory database with the schema but without the seed rows.
pub(crate) fn get_empty_test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    crate::transaction::create_transaction_table(&conn).expect("Could not create table.");
    conn
}

#[track_caller]
pub(crate) fn insert_transaction(
    connection: &Connection,
    type_: TransactionType,
    amount: f64,
    date: Date,
    category: &str,
    description: &str,
) -> Transaction {
    create_transaction(
        Transaction::build(type_, amount, date)
            .category(category)
            .description(description),
        connection,
    )
    .expect("Could not create transaction")
}
