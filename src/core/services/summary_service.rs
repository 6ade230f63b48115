use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{DateWindow, Transaction},
    ledger::TransactionFilter,
};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthTotals {
    pub window: DateWindow,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Headline figures for the home screen.
pub struct SummaryService;

impl SummaryService {
    /// All-time income minus expenses.
    pub fn balance(transactions: &[Transaction]) -> f64 {
        transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn month_totals(transactions: &[Transaction], today: NaiveDate) -> MonthTotals {
        let window = DateWindow::month_containing(today);
        let month = TransactionFilter::new().within(window);
        let income = month.income().total(transactions);
        let expenses = month.expenses().total(transactions);
        MonthTotals {
            window,
            income,
            expenses,
            net: income - expenses,
        }
    }

    /// Newest transactions first, at most `limit` of them.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|txn| Reverse(txn.date));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::expense("Grocery Store", 82.5, at(2026, 1, 3)),
            Transaction::income("Salary", 3200.0, at(2026, 1, 1)),
            Transaction::expense("Netflix", 16.0, at(2026, 1, 9)),
            Transaction::expense("Gas Station", 45.0, at(2025, 12, 28)),
            Transaction::income("Freelance Work", 500.0, at(2025, 12, 20)),
        ]
    }

    #[test]
    fn balance_nets_all_time() {
        assert_eq!(SummaryService::balance(&sample()), 3556.5);
        assert_eq!(SummaryService::balance(&[]), 0.0);
    }

    #[test]
    fn month_totals_cover_current_month_only() {
        let totals =
            SummaryService::month_totals(&sample(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(totals.income, 3200.0);
        assert_eq!(totals.expenses, 98.5);
        assert_eq!(totals.net, 3101.5);
    }

    #[test]
    fn recent_is_newest_first() {
        let txns = sample();
        let recent = SummaryService::recent(&txns, 2);
        let titles: Vec<_> = recent.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Netflix", "Grocery Store"]);
    }
}
