//! The cascading selector for picking a transaction to delete.
//!
//! The user narrows the list down by transaction type, then category, then
//! picks a single transaction. Each step re-renders the selector through htmx.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints,
    html::{BUTTON_DANGER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::{Transaction, TransactionType, get_all_transactions},
};

/// A transaction that can be picked in the last step.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOption {
    pub id: TransactionId,
    /// e.g. "2025-05-03 - $12.50 (Lunch)"
    pub label: String,
}

/// The choices available at each step of the selector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteChoices {
    /// Every transaction type in use, sorted.
    pub types: Vec<TransactionType>,
    pub selected_type: Option<TransactionType>,
    /// The categories used with the selected type, sorted.
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    /// The matching transactions, most recent first.
    pub transactions: Vec<DeleteOption>,
}

/// Work out the choices for each step given the selections made so far.
///
/// Selections that do not match any transaction are ignored, e.g. a category
/// left over from a different transaction type.
pub fn delete_choices(
    transactions: &[Transaction],
    selected_type: Option<TransactionType>,
    selected_category: Option<&str>,
) -> DeleteChoices {
    let mut types: Vec<TransactionType> = transactions
        .iter()
        .map(|transaction| transaction.type_)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    types.sort_by_key(|type_| type_.as_str());

    let Some(selected_type) = selected_type.filter(|type_| types.contains(type_)) else {
        return DeleteChoices {
            types,
            ..Default::default()
        };
    };

    let categories: Vec<String> = transactions
        .iter()
        .filter(|transaction| transaction.type_ == selected_type)
        .map(|transaction| transaction.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();

    let Some(selected_category) =
        selected_category.filter(|category| categories.iter().any(|c| c.as_str() == *category))
    else {
        return DeleteChoices {
            types,
            selected_type: Some(selected_type),
            categories,
            ..Default::default()
        };
    };

    let mut matching: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction.type_ == selected_type && transaction.category == selected_category
        })
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let transactions = matching
        .into_iter()
        .map(|transaction| DeleteOption {
            id: transaction.id,
            label: format!(
                "{} - ${:.2} ({})",
                transaction.date, transaction.amount, transaction.description
            ),
        })
        .collect();

    DeleteChoices {
        types,
        selected_type: Some(selected_type),
        categories,
        selected_category: Some(selected_category.to_owned()),
        transactions,
    }
}

/// Renders the selector for `choices`.
pub fn delete_selector_view(choices: &DeleteChoices) -> Markup {
    html! {
        div id="delete-selector"
        {
            @if choices.types.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No transactions to delete." }
            } @else {
                form
                    id="delete-transaction-form"
                    hx-post=(endpoints::DELETE_SELECTED_TRANSACTION)
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    div
                    {
                        label for="delete-type" class=(FORM_LABEL_STYLE) { "Select Transaction Type" }

                        select
                            name="type_"
                            id="delete-type"
                            hx-get=(endpoints::DELETE_OPTIONS)
                            hx-trigger="change"
                            hx-target="#delete-selector"
                            hx-swap="outerHTML"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" selected[choices.selected_type.is_none()] { "Select an option" }

                            @for type_ in &choices.types {
                                option
                                    value=(type_)
                                    selected[choices.selected_type == Some(*type_)]
                                {
                                    (type_)
                                }
                            }
                        }
                    }

                    @if choices.selected_type.is_some() {
                        div
                        {
                            label for="delete-category" class=(FORM_LABEL_STYLE) { "Select Category" }

                            select
                                name="category"
                                id="delete-category"
                                hx-get=(endpoints::DELETE_OPTIONS)
                                hx-trigger="change"
                                hx-target="#delete-selector"
                                hx-swap="outerHTML"
                                hx-include="#delete-type"
                                class=(FORM_TEXT_INPUT_STYLE)
                            {
                                option value="" selected[choices.selected_category.is_none()] { "Select an option" }

                                @for category in &choices.categories {
                                    option
                                        value=(category)
                                        selected[choices.selected_category.as_deref() == Some(category.as_str())]
                                    {
                                        (category)
                                    }
                                }
                            }
                        }
                    }

                    @if !choices.transactions.is_empty() {
                        div
                        {
                            label for="delete-transaction" class=(FORM_LABEL_STYLE) { "Select Transaction to Delete" }

                            select
                                name="transaction_id"
                                id="delete-transaction"
                                required
                                class=(FORM_TEXT_INPUT_STYLE)
                            {
                                @for choice in &choices.transactions {
                                    option value=(choice.id) { (choice.label) }
                                }
                            }
                        }

                        button type="submit" class=(BUTTON_DANGER_STYLE) { "Confirm Delete" }
                    }
                }
            }
        }
    }
}

/// The state needed to render the delete selector.
#[derive(Debug, Clone)]
pub struct DeleteSelectorState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteSelectorState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The selections made so far in the delete selector.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteOptionsQuery {
    pub type_: Option<TransactionType>,
    pub category: Option<String>,
}

/// A route handler that re-renders the delete selector for the current selections.
pub async fn get_delete_options(
    State(state): State<DeleteSelectorState>,
    Query(query): Query<DeleteOptionsQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let transactions = match get_all_transactions(&connection) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not get transactions: {error}");
            return error.into_alert_response();
        }
    };

    let choices = delete_choices(&transactions, query.type_, query.category.as_deref());

    delete_selector_view(&choices).into_response()
}
