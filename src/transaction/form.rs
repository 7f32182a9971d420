//! The sidebar form for adding a transaction.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::category_field,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::TransactionType,
};

// Dates in HTML forms are sent as `YYYY-MM-DD`.
time::serde::format_description!(pub(crate) form_date, Date, "[year]-[month]-[day]");

/// The form for adding a transaction, with the date defaulting to `today`.
pub fn new_transaction_form(today: Date) -> Markup {
    html! {
        form
            id="add-transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            hx-indicator="#add-transaction-indicator"
            class="space-y-4"
        {
            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "📅 Date of Transaction" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="type_" class=(FORM_LABEL_STYLE) { "🔁 Transaction Type" }

                select
                    name="type_"
                    id="type_"
                    hx-get=(endpoints::CATEGORY_OPTIONS)
                    hx-trigger="change"
                    hx-target="#category-field"
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected { "Select an option" }
                    option value=(TransactionType::Income) { "Income" }
                    option value=(TransactionType::Expense) { "Expense" }
                }
            }

            (category_field(None, None))

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "📝 Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="e.g., Walmart shopping or Salary for May"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "💵 Amount (USD)" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="Enter amount in dollars"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" id="add-transaction-indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                "Add Transaction"
            }
        }
    }
}
