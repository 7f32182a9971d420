//! A daily budget tracker for recording income and expenses.
//!
//! This library provides a web server that directly serves HTML pages: a
//! dashboard with forms for adding, deleting and resetting transactions, and
//! monthly, daily and weekly reports over the stored transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    CategoryTotal, MonthlySummary, PeriodTotal, YearMonth, daily_breakdown, monthly_summary,
    weekly_breakdown,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionType, count_transactions, create_transaction,
    delete_transaction, delete_transactions_on_date, get_all_transactions, get_transaction,
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction type other than "Income" or "Expense" was given.
    #[error("\"{0}\" is not a valid transaction type")]
    InvalidTransactionType(String),

    /// The transaction form was submitted without choosing a type.
    #[error("a transaction type must be selected")]
    MissingTransactionType,

    /// The category was empty after resolving the "Other" choice and trimming.
    #[error("the category cannot be empty")]
    EmptyCategory,

    /// The description was empty after trimming.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// Transactions must have an amount greater than zero.
    ///
    /// Whether money came in or went out is recorded by the transaction type,
    /// not the sign of the amount.
    #[error("{0} is not a positive amount")]
    NonPositiveAmount(f64),

    /// A month was not in the form "YYYY-MM".
    #[error("\"{0}\" is not a valid month, expected YYYY-MM")]
    InvalidMonth(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

const INVALID_TRANSACTION_MESSAGE: &str =
    "All fields are required, and amount must be greater than 0.";

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingTransactionType => Alert::error(
                INVALID_TRANSACTION_MESSAGE,
                "Select whether the transaction is income or an expense.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTransactionType(type_) => Alert::error(
                INVALID_TRANSACTION_MESSAGE,
                &format!("\"{type_}\" is not a valid type, choose Income or Expense."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyCategory => Alert::error(
                INVALID_TRANSACTION_MESSAGE,
                "Choose a category, or enter a custom one when choosing \"Other\".",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyDescription => {
                Alert::error(INVALID_TRANSACTION_MESSAGE, "Enter a description.")
                    .into_response_with_status(StatusCode::BAD_REQUEST)
            }
            Error::NonPositiveAmount(_) => Alert::error(
                INVALID_TRANSACTION_MESSAGE,
                "Enter an amount of at least $0.01.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
