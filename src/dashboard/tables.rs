//! Table views for the dashboard's daily, weekly and category breakdowns.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, PeriodTotal},
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, round_to_cents,
    },
};

const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if round_to_cents(amount) >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

/// Renders the daily breakdown, most recent day first.
///
/// `daily_totals` is expected in chronological order.
pub(super) fn daily_table(daily_totals: &[PeriodTotal]) -> Markup {
    period_table(
        "daily-breakdown-table",
        "Date",
        daily_totals.iter().rev().map(|total| (total.day_label(), total)),
    )
}

/// Renders the weekly breakdown, most recent week first.
///
/// `weekly_totals` is expected in chronological order.
pub(super) fn weekly_table(weekly_totals: &[PeriodTotal]) -> Markup {
    period_table(
        "weekly-breakdown-table",
        "Week",
        weekly_totals
            .iter()
            .rev()
            .map(|total| (total.week_label(), total)),
    )
}

fn period_table<'a>(
    id: &str,
    period_header: &str,
    rows: impl Iterator<Item = (String, &'a PeriodTotal)>,
) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table id=(id) class=(TABLE_STYLE)
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { (period_header) }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Income" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Expense" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Balance" }
                    }
                }

                tbody
                {
                    @for (label, total) in rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th
                                scope="row"
                                class={(TABLE_CELL_STYLE) " font-medium text-gray-900 whitespace-nowrap dark:text-white"}
                            {
                                (label)
                            }
                            td class={(TABLE_CELL_STYLE) " " (TABLE_CELL_GREEN_STYLE)}
                            {
                                (format_currency(total.income))
                            }
                            td class={(TABLE_CELL_STYLE) " " (TABLE_CELL_RED_STYLE)}
                            {
                                (format_currency(total.expense))
                            }
                            td class={(TABLE_CELL_STYLE) " " (amount_color_class(total.balance()))}
                            {
                                (format_currency(total.balance()))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the month's expenses grouped by category.
pub(super) fn category_table(expenses_by_category: &[CategoryTotal]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table id="category-expenses-table" class=(TABLE_STYLE)
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    }
                }

                tbody
                {
                    @for total in expenses_by_category {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th
                                scope="row"
                                class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                            {
                                (total.category)
                            }
                            td class=(TABLE_CELL_STYLE) { (format_currency(total.amount)) }
                        }
                    }

                    @if expenses_by_category.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="2" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No expenses this month."
                            }
                        }
                    }
                }
            }
        }
    }
}
