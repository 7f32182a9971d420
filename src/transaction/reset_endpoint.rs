//! Deleting every transaction recorded on one day.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_DANGER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::form::form_date,
};

/// The state needed to reset a day's transactions.
#[derive(Debug, Clone)]
pub struct ResetTransactionsState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ResetTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for resetting a day's transactions.
#[derive(Debug, Deserialize)]
pub struct ResetForm {
    /// Every transaction on this date is deleted.
    #[serde(with = "form_date")]
    pub date: Date,
}

/// The form for deleting every transaction on a date, defaulting to `today`.
pub fn reset_form(today: Date) -> Markup {
    html! {
        form
            id="reset-transactions-form"
            hx-post=(endpoints::RESET_TRANSACTIONS)
            hx-target-error="#alert-container"
            hx-confirm="Delete every transaction on this date?"
            class="space-y-4"
        {
            div
            {
                label for="reset-date" class=(FORM_LABEL_STYLE)
                {
                    "Select a date to reset (delete all transactions)"
                }

                input
                    name="date"
                    id="reset-date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_DANGER_STYLE)
            {
                "Reset All for Selected Date"
            }
        }
    }
}

/// A route handler for deleting every transaction on a date, redirects to
/// the dashboard on success.
pub async fn reset_transactions_endpoint(
    State(state): State<ResetTransactionsState>,
    Form(form): Form<ResetForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transactions_on_date(form.date, &connection) {
        Ok(rows_affected) => {
            tracing::info!("deleted {rows_affected} transactions on {}", form.date);
        }
        Err(error) => {
            tracing::error!("Could not delete transactions on {}: {error}", form.date);
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Delete every transaction dated exactly `date`.
///
/// Returns the number of rows removed.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transactions_on_date(date: Date, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM transactions WHERE date = ?1", [date])
        .map_err(|err| err.into())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum_extra::extract::Form;
    use scraper::Html;
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_hx_endpoint, assert_hx_redirect, get_empty_test_connection,
            insert_transaction, must_get_form,
        },
        transaction::{TransactionType, get_all_transactions},
    };

    use super::{
        ResetForm, ResetTransactionsState, delete_transactions_on_date, reset_form,
        reset_transactions_endpoint,
    };

    #[test]
    fn deletes_only_rows_on_that_date() {
        let connection = get_empty_test_connection();
        for (date, amount) in [
            (date!(2025 - 05 - 01), 1.0),
            (date!(2025 - 05 - 02), 2.0),
            (date!(2025 - 05 - 02), 3.0),
            (date!(2025 - 05 - 03), 4.0),
        ] {
            insert_transaction(
                &connection,
                TransactionType::Expense,
                amount,
                date,
                "Gas",
                "Fuel",
            );
        }

        let rows_affected =
            delete_transactions_on_date(date!(2025 - 05 - 02), &connection).unwrap();

        assert_eq!(rows_affected, 2);
        let remaining: Vec<_> = get_all_transactions(&connection)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.date)
            .collect();
        assert_eq!(remaining, vec![date!(2025 - 05 - 01), date!(2025 - 05 - 03)]);
    }

    #[test]
    fn date_without_rows_deletes_nothing() {
        let connection = get_empty_test_connection();
        insert_transaction(
            &connection,
            TransactionType::Income,
            5.0,
            date!(2025 - 05 - 01),
            "Gift",
            "Card",
        );

        let rows_affected =
            delete_transactions_on_date(date!(2025 - 06 - 01), &connection).unwrap();

        assert_eq!(rows_affected, 0);
    }

    #[tokio::test]
    async fn endpoint_redirects_to_dashboard() {
        let connection = get_empty_test_connection();
        insert_transaction(
            &connection,
            TransactionType::Income,
            5.0,
            date!(2025 - 05 - 01),
            "Gift",
            "Card",
        );
        let state = ResetTransactionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = reset_transactions_endpoint(
            State(state.clone()),
            Form(ResetForm {
                date: date!(2025 - 05 - 01),
            }),
        )
        .await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let connection = state.db_connection.lock().unwrap();
        assert!(get_all_transactions(&connection).unwrap().is_empty());
    }

    #[test]
    fn reset_form_posts_date() {
        let html = Html::parse_fragment(&reset_form(date!(2025 - 05 - 03)).into_string());
        let form = must_get_form(&html, "#reset-transactions-form");

        assert_hx_endpoint(&form, endpoints::RESET_TRANSACTIONS, "hx-post");
        assert_form_input(&form, "date", "date");
    }
}
