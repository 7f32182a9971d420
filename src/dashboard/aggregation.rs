//! Transaction totals by month, day, week and category.
//!
//! Everything here is a pure function over a snapshot of transactions and is
//! recomputed on every dashboard render.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use time::{Date, Duration, Month, Weekday};

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// A calendar month such as May 2025, written as `2025-05`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self { year, month })
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label as stored.
    pub category: String,
    /// The sum of the expenses in the category.
    pub amount: f64,
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses, as a positive number.
    pub total_expense: f64,
    /// Expense totals per category, sorted by category.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// The transactions the totals were computed from.
    pub transactions: Vec<Transaction>,
}

impl MonthlySummary {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// Sum income and expenses for `month`, or for every transaction if `month`
/// is `None`.
pub fn monthly_summary(transactions: &[Transaction], month: Option<YearMonth>) -> MonthlySummary {
    let transactions: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| month.is_none_or(|month| month.contains(transaction.date)))
        .cloned()
        .collect();

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut expenses_by_category: BTreeMap<&str, f64> = BTreeMap::new();

    for transaction in &transactions {
        match transaction.type_ {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => {
                total_expense += transaction.amount;
                *expenses_by_category
                    .entry(transaction.category.as_str())
                    .or_insert(0.0) += transaction.amount;
            }
        }
    }

    let expenses_by_category = expenses_by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_owned(),
            amount,
        })
        .collect();

    MonthlySummary {
        total_income,
        total_expense,
        expenses_by_category,
        transactions,
    }
}

/// Income and expense totals for one period, either a day or a week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTotal {
    /// The first day of the period.
    pub start: Date,
    /// The last day of the period, the same as `start` for a day.
    pub end: Date,
    /// The sum of income in the period.
    pub income: f64,
    /// The sum of expenses in the period.
    pub expense: f64,
}

impl PeriodTotal {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    /// The label for a single day, e.g. "2025-05-01 (Thu)".
    pub fn day_label(&self) -> String {
        day_label(self.start)
    }

    /// The label for a week, e.g. "2025-04-28 (Mon) - 2025-05-04 (Sun)".
    pub fn week_label(&self) -> String {
        format!("{} - {}", day_label(self.start), day_label(self.end))
    }

    fn has_activity(&self) -> bool {
        self.income > 0.0 || self.expense > 0.0
    }
}

/// Group `transactions` by calendar day, in chronological order.
///
/// Days without any income or expense are left out.
pub fn daily_breakdown(transactions: &[Transaction]) -> Vec<PeriodTotal> {
    group_by_period(transactions, |date| (date, date))
}

/// Group `transactions` by Monday to Sunday week, in chronological order.
///
/// Weeks without any income or expense are left out.
pub fn weekly_breakdown(transactions: &[Transaction]) -> Vec<PeriodTotal> {
    group_by_period(transactions, |date| {
        let start = week_start(date);
        (start, start + Duration::days(6))
    })
}

fn group_by_period(
    transactions: &[Transaction],
    period_of: impl Fn(Date) -> (Date, Date),
) -> Vec<PeriodTotal> {
    let mut totals: BTreeMap<Date, PeriodTotal> = BTreeMap::new();

    for transaction in transactions {
        let (start, end) = period_of(transaction.date);
        let total = totals.entry(start).or_insert(PeriodTotal {
            start,
            end,
            income: 0.0,
            expense: 0.0,
        });

        match transaction.type_ {
            TransactionType::Income => total.income += transaction.amount,
            TransactionType::Expense => total.expense += transaction.amount,
        }
    }

    totals
        .into_values()
        .filter(PeriodTotal::has_activity)
        .collect()
}

/// The Monday on or before `date`.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

fn day_label(date: Date) -> String {
    format!("{date} ({})", weekday_abbreviation(date.weekday()))
}

fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}
