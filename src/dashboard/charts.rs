//! The daily income and expense chart.
//!
//! The chart is built as an ECharts option object with `charming` and
//! initialised in the browser by the script from [charts_script].

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::PeriodTotal, html::HeadElement};

/// The ECharts build loaded by the dashboard.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a dashboard chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="w-full min-h-[400px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A grouped bar chart of income and expenses for each day in `daily_totals`.
///
/// `daily_totals` should be in chronological order.
pub(super) fn daily_chart(daily_totals: &[PeriodTotal]) -> Chart {
    let labels: Vec<String> = daily_totals.iter().map(PeriodTotal::day_label).collect();
    let income: Vec<f64> = daily_totals.iter().map(|total| total.income).collect();
    let expenses: Vec<f64> = daily_totals.iter().map(|total| total.expense).collect();

    Chart::new()
        .title(Title::new().text("Daily Income and Expenses"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left("center").top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Amount (USD)")
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Income").data(income))
        .series(bar::Bar::new().name("Expense").data(expenses))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dashboard::{
            aggregation::PeriodTotal,
            charts::{DashboardChart, charts_script, daily_chart},
        },
        html::HeadElement,
    };

    fn day(date: time::Date, income: f64, expense: f64) -> PeriodTotal {
        PeriodTotal {
            start: date,
            end: date,
            income,
            expense,
        }
    }

    #[test]
    fn daily_chart_has_income_and_expense_series() {
        let options = daily_chart(&[
            day(date!(2025 - 05 - 01), 10.0, 0.0),
            day(date!(2025 - 05 - 02), 20.0, 5.5),
        ])
        .to_string();

        assert!(options.contains("Daily Income and Expenses"));
        assert!(options.contains("Amount (USD)"));
        assert!(options.contains("\"Income\""));
        assert!(options.contains("\"Expense\""));
        assert!(options.contains("2025-05-02 (Fri)"));
    }

    #[test]
    fn daily_chart_keeps_chronological_order() {
        let options = daily_chart(&[
            day(date!(2025 - 05 - 01), 10.0, 0.0),
            day(date!(2025 - 05 - 09), 0.0, 3.0),
        ])
        .to_string();

        let first = options.find("2025-05-01 (Thu)").unwrap();
        let second = options.find("2025-05-09 (Fri)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn script_initialises_each_chart() {
        let script = charts_script(&[DashboardChart {
            id: "daily-chart",
            options: "{}".to_owned(),
        }]);

        let HeadElement::ScriptSource(source) = script else {
            panic!("want script source");
        };
        assert!(source.0.contains("document.getElementById(\"daily-chart\")"));
        assert!(source.0.starts_with("document.addEventListener('DOMContentLoaded'"));
    }
}
