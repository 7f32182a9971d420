//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    category::resolve_category,
    endpoints,
    transaction::{
        Transaction, TransactionBuilder, TransactionType, core::create_transaction,
        form::form_date,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The date when the transaction ocurred.
    #[serde(with = "form_date")]
    pub date: Date,
    /// Income or expense, `None` while the placeholder option is selected.
    #[serde(default)]
    pub type_: Option<TransactionType>,
    /// A suggested category or the "Other" choice.
    #[serde(default)]
    pub category: String,
    /// The user supplied category used when "Other" is chosen.
    #[serde(default)]
    pub custom_category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The value of the transaction in dollars.
    #[serde(default)]
    pub amount: Option<f64>,
}

impl TransactionForm {
    /// Check the form and build the transaction to store.
    ///
    /// Category and description are trimmed.
    ///
    /// # Errors
    /// Returns the first problem found:
    /// - [Error::MissingTransactionType] if no type was chosen,
    /// - [Error::EmptyCategory] if the category is blank,
    /// - [Error::EmptyDescription] if the description is blank,
    /// - or [Error::NonPositiveAmount] if the amount is missing, zero or negative.
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        let type_ = self.type_.ok_or(Error::MissingTransactionType)?;

        let category = resolve_category(&self.category, &self.custom_category);
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let amount = self.amount.unwrap_or(0.0);
        if amount.is_nan() || amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        Ok(Transaction::build(type_, amount, self.date)
            .category(&category)
            .description(description))
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected new transaction: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_transaction(transaction, &connection) {
        Ok(transaction) => {
            tracing::info!(
                "created {} transaction {} on {}",
                transaction.type_,
                transaction.id,
                transaction.date
            );
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        Error,
        category::OTHER_VALUE,
        endpoints,
        test_utils::{
            assert_alert, assert_hx_redirect, get_empty_test_connection, parse_html_fragment,
        },
        transaction::{
            TransactionType, count_transactions,
            create_endpoint::{CreateTransactionState, TransactionForm},
            create_transaction_endpoint, get_all_transactions,
        },
    };

    fn valid_form() -> TransactionForm {
        TransactionForm {
            date: date!(2025 - 05 - 03),
            type_: Some(TransactionType::Expense),
            category: "Restaurant".to_owned(),
            custom_category: String::new(),
            description: "Lunch".to_owned(),
            amount: Some(12.5),
        }
    }

    fn get_state() -> CreateTransactionState {
        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(get_empty_test_connection())),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(valid_form()))
            .await
            .into_response();

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let connection = state.db_connection.lock().unwrap();
        let transactions = get_all_transactions(&connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, date!(2025 - 05 - 03));
        assert_eq!(transactions[0].type_, TransactionType::Expense);
        assert_eq!(transactions[0].category, "Restaurant");
        assert_eq!(transactions[0].description, "Lunch");
        assert_eq!(transactions[0].amount, 12.5);
    }

    #[tokio::test]
    async fn other_category_stores_trimmed_custom_text() {
        let state = get_state();
        let form = TransactionForm {
            category: OTHER_VALUE.to_owned(),
            custom_category: "  Pet care ".to_owned(),
            description: "  Vet visit  ".to_owned(),
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        let transactions = get_all_transactions(&connection).unwrap();
        assert_eq!(transactions[0].category, "Pet care");
        assert_eq!(transactions[0].description, "Vet visit");
    }

    #[tokio::test]
    async fn invalid_forms_are_rejected_without_writing() {
        let cases = [
            TransactionForm {
                type_: None,
                ..valid_form()
            },
            TransactionForm {
                category: "   ".to_owned(),
                ..valid_form()
            },
            TransactionForm {
                category: OTHER_VALUE.to_owned(),
                custom_category: String::new(),
                ..valid_form()
            },
            TransactionForm {
                description: " ".to_owned(),
                ..valid_form()
            },
            TransactionForm {
                amount: Some(0.0),
                ..valid_form()
            },
            TransactionForm {
                amount: Some(-3.0),
                ..valid_form()
            },
            TransactionForm {
                amount: None,
                ..valid_form()
            },
        ];

        for form in cases {
            let state = get_state();
            let description = format!("{form:?}");

            let response = create_transaction_endpoint(State(state.clone()), Form(form))
                .await
                .into_response();

            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "want 400 for {description}"
            );
            let html = parse_html_fragment(response).await;
            assert_alert(&html, "error");
            assert!(
                html.html()
                    .contains("All fields are required, and amount must be greater than 0.")
            );
            let connection = state.db_connection.lock().unwrap();
            assert_eq!(count_transactions(&connection).unwrap(), 0);
        }
    }

    #[test]
    fn validate_reports_first_problem() {
        let form = TransactionForm {
            type_: None,
            description: String::new(),
            ..valid_form()
        };

        assert_eq!(form.validate(), Err(Error::MissingTransactionType));
    }

    #[test]
    fn form_decodes_placeholder_type_as_none() {
        let form: TransactionForm = serde_html_form::from_str(
            "date=2025-05-03&type_=&category=&description=Lunch&amount=12.50",
        )
        .unwrap();

        assert_eq!(form.type_, None);
        assert_eq!(form.amount, Some(12.5));
        assert_eq!(form.date, date!(2025 - 05 - 03));
    }
}
