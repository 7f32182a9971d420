use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, alert::Alert, database_id::TransactionId, endpoints};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction from the transactions page.
///
/// Responds with an empty body so htmx removes the table row. Deleting a
/// transaction that no longer exists also removes the row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(rows_affected) => {
            tracing::info!("deleted transaction {transaction_id} ({rows_affected} rows)");
            // The status code has to be 200 OK or htmx will not delete the table row.
            Html("").into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// The form data for the cascading delete selector.
#[derive(Debug, Deserialize)]
pub struct DeleteSelectedForm {
    /// The transaction picked in the last step of the selector.
    #[serde(default)]
    pub transaction_id: Option<TransactionId>,
}

/// A route handler for deleting the transaction picked in the cascading
/// selector, redirects to the dashboard on success.
pub async fn delete_selected_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Form(form): Form<DeleteSelectedForm>,
) -> Response {
    let Some(transaction_id) = form.transaction_id else {
        return Alert::error(
            "Could not delete transaction",
            "Select a transaction type, category and transaction first.",
        )
        .into_response_with_status(StatusCode::BAD_REQUEST);
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = delete_transaction(transaction_id, &connection) {
        tracing::error!("Could not delete transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    tracing::info!("deleted transaction {transaction_id}");

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

type RowsAffected = usize;

/// Delete the transaction with `id`.
///
/// Returns the number of rows removed, zero if there was no such transaction.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])
        .map_err(|err| err.into())
}
