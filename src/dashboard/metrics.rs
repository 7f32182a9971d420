//! Headline figures shown above the dashboard tables.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::MonthlySummary,
    html::{format_currency, round_to_cents},
};

/// A single labelled figure, e.g. "Total Income $60.00".
pub(super) fn metric(id: &str, label: &str, amount: f64) -> Markup {
    html! {
        div
            id=(id)
            class="p-4 rounded-lg shadow bg-white dark:bg-gray-800"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-2xl font-semibold" data-amount=(round_to_cents(amount)) {
                (format_currency(amount))
            }
        }
    }
}

/// The month's income, expenses and balance side by side.
pub(super) fn month_metrics(summary: &MonthlySummary) -> Markup {
    html! {
        div class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (metric("total-income", "Total Income", summary.total_income))
            (metric("total-expenses", "Total Expenses", summary.total_expense))
            (metric("month-balance", "Balance", summary.balance()))
        }
    }
}
