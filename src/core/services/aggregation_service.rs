//! Buckets expense activity into calendar-aligned series for the statistics views.

use std::{
    cmp::Ordering,
    collections::HashSet,
    fmt,
    str::FromStr,
};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    core::services::BudgetService,
    domain::{Category, DateWindow, Transaction},
    errors::SpendError,
    ledger::TransactionFilter,
};

/// Statistics range selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    /// Trailing seven days including today, one bucket per day.
    Week,
    /// Trailing thirty days including today, one bucket per day.
    Month,
    /// Trailing twelve calendar months including the current one, one bucket per month.
    Year,
}

impl StatsPeriod {
    pub const ALL: [StatsPeriod; 3] = [StatsPeriod::Week, StatsPeriod::Month, StatsPeriod::Year];

    pub fn bucket_count(self) -> usize {
        match self {
            StatsPeriod::Week => 7,
            StatsPeriod::Month => 30,
            StatsPeriod::Year => 12,
        }
    }

    pub fn window(self, today: NaiveDate) -> DateWindow {
        match self {
            StatsPeriod::Week | StatsPeriod::Month => {
                DateWindow::trailing_days(today, self.bucket_count() as u32)
            }
            StatsPeriod::Year => DateWindow::trailing_months(today, self.bucket_count() as u32),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatsPeriod::Week => "Week",
            StatsPeriod::Month => "Month",
            StatsPeriod::Year => "Year",
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatsPeriod {
    type Err = SpendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(StatsPeriod::Week),
            "month" => Ok(StatsPeriod::Month),
            "year" => Ok(StatsPeriod::Year),
            other => Err(SpendError::InvalidInput(format!(
                "unknown period `{other}` (expected week, month, or year)"
            ))),
        }
    }
}

/// One slot in a spending series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendBucket {
    pub label: String,
    pub start: NaiveDate,
    pub amount: f64,
}

/// Expense total attributed to a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: f64,
}

/// Headline figures for a statistics range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    pub period: StatsPeriod,
    pub window: DateWindow,
    pub total_spent: f64,
    pub transaction_count: usize,
    pub average_per_transaction: f64,
    pub top_category: Option<CategorySpend>,
}

/// Stateless aggregation over transaction snapshots.
pub struct AggregationService;

impl AggregationService {
    /// Expense totals per bucket, oldest first. Always returns `period.bucket_count()` entries.
    pub fn spending_buckets(
        transactions: &[Transaction],
        now: NaiveDateTime,
        period: StatsPeriod,
    ) -> Vec<SpendBucket> {
        let window = period.window(now.date());
        let expenses = TransactionFilter::new().within(window).expenses();
        match period {
            StatsPeriod::Week | StatsPeriod::Month => {
                Self::daily_buckets(transactions, window, expenses)
            }
            StatsPeriod::Year => Self::monthly_buckets(transactions, window, expenses),
        }
    }

    fn daily_buckets(
        transactions: &[Transaction],
        window: DateWindow,
        filter: TransactionFilter,
    ) -> Vec<SpendBucket> {
        let mut buckets: Vec<SpendBucket> = (0..window.days())
            .map(|offset| {
                let start = window.start + Duration::days(offset);
                SpendBucket {
                    label: start.format("%Y-%m-%d").to_string(),
                    start,
                    amount: 0.0,
                }
            })
            .collect();
        for txn in filter.select(transactions) {
            let offset = (txn.day() - window.start).num_days();
            if let Some(bucket) = usize::try_from(offset).ok().and_then(|i| buckets.get_mut(i)) {
                bucket.amount += txn.amount;
            }
        }
        buckets
    }

    fn monthly_buckets(
        transactions: &[Transaction],
        window: DateWindow,
        filter: TransactionFilter,
    ) -> Vec<SpendBucket> {
        let first = month_index(window.start);
        let count = (month_index(window.end) - first).max(0) as usize;
        let mut buckets: Vec<SpendBucket> = (0..count)
            .map(|offset| {
                let start = crate::domain::period::shift_month(window.start, offset as i32);
                SpendBucket {
                    label: start.format("%Y-%m").to_string(),
                    start,
                    amount: 0.0,
                }
            })
            .collect();
        for txn in filter.select(transactions) {
            let offset = month_index(txn.day()) - first;
            if let Some(bucket) = usize::try_from(offset).ok().and_then(|i| buckets.get_mut(i)) {
                bucket.amount += txn.amount;
            }
        }
        buckets
    }

    /// Expense totals per category within `window`, largest first.
    ///
    /// Categories with nothing spent are omitted; ties keep the order of `categories`.
    pub fn category_totals(
        transactions: &[Transaction],
        window: DateWindow,
        categories: &[Category],
    ) -> Vec<CategorySpend> {
        let by_category = BudgetService::spent_by_category(window, transactions);

        let mut seen = HashSet::new();
        let mut totals: Vec<CategorySpend> = categories
            .iter()
            .filter(|category| seen.insert(category.id))
            .filter_map(|category| {
                let amount = by_category.get(&category.id).copied().unwrap_or(0.0);
                (amount > 0.0).then(|| CategorySpend {
                    category: category.clone(),
                    amount,
                })
            })
            .collect();
        totals.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
        totals
    }

    /// Total, count, average, and top category for a statistics range.
    pub fn summarize(
        transactions: &[Transaction],
        categories: &[Category],
        now: NaiveDateTime,
        period: StatsPeriod,
    ) -> PeriodSummary {
        let window = period.window(now.date());
        let spent = TransactionFilter::new().within(window).expenses().select(transactions);
        let transaction_count = spent.len();
        let total_spent = crate::ledger::sum(spent);
        let average_per_transaction = if transaction_count > 0 {
            total_spent / transaction_count as f64
        } else {
            0.0
        };
        let top_category = Self::category_totals(transactions, window, categories)
            .into_iter()
            .next();
        PeriodSummary {
            period,
            window,
            total_spent,
            transaction_count,
            average_per_transaction,
            top_category,
        }
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}
