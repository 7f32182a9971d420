//! Dashboard module
//!
//! Provides the main page: the forms for adding and deleting transactions
//! next to the savings figures, the monthly breakdown tables and the daily
//! income and expense chart.

mod aggregation;
mod charts;
mod handlers;
mod metrics;
mod tables;

pub use aggregation::{
    CategoryTotal, MonthlySummary, PeriodTotal, YearMonth, daily_breakdown, monthly_summary,
    weekly_breakdown,
};
pub use handlers::get_dashboard_page;
