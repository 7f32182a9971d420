//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            MonthlySummary, YearMonth, daily_breakdown, monthly_summary, weekly_breakdown,
        },
        charts::{
            DashboardChart, ECHARTS_SCRIPT_URL, chart_view, charts_script, daily_chart,
        },
        metrics::{metric, month_metrics},
        tables::{category_table, daily_table, weekly_table},
    },
    endpoints,
    html::{HeadElement, base, dollar_input_styles},
    navigation::NavBar,
    timezone::get_local_date,
    transaction::{
        Transaction, delete_choices, delete_selector_view, get_all_transactions,
        new_transaction_form, reset_form,
    },
};

/// The state needed for displaying the dashboard page.
///
/// Contains the database connection and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The figures for the current month, absent when the month has no transactions.
struct MonthReport {
    lifetime_savings: f64,
    summary: MonthlySummary,
    chart: DashboardChart,
    tables: [Markup; 3],
}

/// Display the dashboard with the forms and the report for the current month.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(dashboard_view(today, &transactions).into_response())
}

/// Builds the report for the month containing `today`.
///
/// Returns `None` if no transactions fall in that month.
fn build_month_report(today: Date, transactions: &[Transaction]) -> Option<MonthReport> {
    let summary = monthly_summary(transactions, Some(YearMonth::of(today)));

    if summary.transactions.is_empty() {
        return None;
    }

    let lifetime_savings = monthly_summary(transactions, None).balance();
    let daily_totals = daily_breakdown(&summary.transactions);
    let weekly_totals = weekly_breakdown(&summary.transactions);

    let chart = DashboardChart {
        id: "daily-chart",
        options: daily_chart(&daily_totals).to_string(),
    };
    let tables = [
        category_table(&summary.expenses_by_category),
        daily_table(&daily_totals),
        weekly_table(&weekly_totals),
    ];

    Some(MonthReport {
        lifetime_savings,
        summary,
        chart,
        tables,
    })
}

fn dashboard_view(today: Date, transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let report = build_month_report(today, transactions);
    let delete_choices = delete_choices(transactions, None, None);

    let content = html!(
        (nav_bar)

        div
            class="px-2 lg:px-6 py-4 lg:py-8 mx-auto max-w-screen-xl
                text-gray-900 dark:text-white"
        {
            header class="mb-6"
            {
                h1 class="text-3xl font-bold" { "💸 Daily Budget Tracker" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Keep track of your daily income and expenses with visual reports."
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-4 gap-6"
            {
                aside class="lg:col-span-1 space-y-8"
                {
                    section id="add-transaction"
                    {
                        h2 class="text-xl font-semibold mb-4" { "➕ Add Transaction" }
                        (new_transaction_form(today))
                    }

                    section id="delete-transaction"
                    {
                        h2 class="text-xl font-semibold mb-4" { "🗑️ Delete Transaction" }
                        (delete_selector_view(&delete_choices))
                    }

                    section id="reset-transactions"
                    {
                        h2 class="text-xl font-semibold mb-4" { "♻️ Reset Transactions by Date" }
                        (reset_form(today))
                    }
                }

                main class="lg:col-span-3 space-y-8"
                {
                    h2 class="text-2xl font-semibold" { "💰 Savings" }

                    @match &report {
                        Some(report) => (month_report_view(report)),
                        None => {
                            p
                                id="no-data"
                                class="p-4 rounded-lg text-blue-800 bg-blue-50
                                    dark:bg-gray-800 dark:text-blue-400"
                            {
                                "No transaction data available for this month."
                            }
                        }
                    }
                }
            }
        }
    );

    let mut head_elements = vec![dollar_input_styles()];

    if let Some(report) = &report {
        head_elements.push(HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()));
        head_elements.push(charts_script(std::slice::from_ref(&report.chart)));
    }

    base("Dashboard", &head_elements, &content)
}

fn month_report_view(report: &MonthReport) -> Markup {
    let [category_table, daily_table, weekly_table] = &report.tables;

    html!(
        (metric("current-savings", "Current Savings", report.lifetime_savings))

        section
        {
            h3 class="text-xl font-semibold mb-4" { "💵 Summary for the Month" }
            (month_metrics(&report.summary))
        }

        section
        {
            h3 class="text-xl font-semibold mb-4" { "🏷️ Expenses by Category" }
            (category_table)
        }

        section
        {
            h3 class="text-xl font-semibold mb-4" { "🧾 Daily Breakdown" }
            (daily_table)
        }

        section
        {
            h3 class="text-xl font-semibold mb-4" { "📆 Weekly Report" }
            (weekly_table)
        }

        section
        {
            h3 class="text-xl font-semibold mb-4" { "📊 Daily Income and Expense Chart" }
            (chart_view(&report.chart))
        }
    )
}
