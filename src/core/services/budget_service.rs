//! Provides budget progress helpers for categories over a date window.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{Category, DateWindow, Transaction},
    ledger::TransactionFilter,
};

/// Where a category stands against its limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    NoBudget,
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetStatus {
    pub fn from_progress(budget: f64, progress: f64) -> Self {
        if budget <= 0.0 {
            BudgetStatus::NoBudget
        } else if progress > 1.0 {
            BudgetStatus::OverBudget
        } else if progress > 0.9 {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::NoBudget => "No Budget",
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::NearLimit => "Near Limit",
            BudgetStatus::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryProgress {
    pub category_id: Uuid,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    pub progress: f64,
    pub remaining: f64,
    pub status: BudgetStatus,
}

impl CategoryProgress {
    fn from_parts(category: &Category, spent: f64) -> Self {
        let budget = category.budget_limit();
        let progress = BudgetService::ratio(spent, budget);
        Self {
            category_id: category.id,
            name: category.name.clone(),
            budget,
            spent,
            progress,
            remaining: (budget - spent).max(0.0),
            status: BudgetStatus::from_progress(budget, progress),
        }
    }
}

/// Month-level budget view across all expense categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetOverview {
    pub window: DateWindow,
    pub total_budget: f64,
    pub total_spent: f64,
    pub overall_progress: f64,
    pub categories: Vec<CategoryProgress>,
}

/// Stateless budget evaluation over transaction snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Expense spend inside `window` that references `category`.
    pub fn spent(category: &Category, window: DateWindow, transactions: &[Transaction]) -> f64 {
        TransactionFilter::new()
            .within(window)
            .expenses()
            .in_category(category.id)
            .total(transactions)
    }

    /// `spent / budget`, or `0` for a category without a budget.
    pub fn progress(category: &Category, window: DateWindow, transactions: &[Transaction]) -> f64 {
        let budget = category.budget_limit();
        if budget <= 0.0 {
            return 0.0;
        }
        Self::ratio(Self::spent(category, window, transactions), budget)
    }

    pub fn remaining(category: &Category, window: DateWindow, transactions: &[Transaction]) -> f64 {
        (category.budget_limit() - Self::spent(category, window, transactions)).max(0.0)
    }

    pub fn category_progress(
        category: &Category,
        window: DateWindow,
        transactions: &[Transaction],
    ) -> CategoryProgress {
        CategoryProgress::from_parts(category, Self::spent(category, window, transactions))
    }

    /// Expense spend per referenced category in one pass over `transactions`.
    ///
    /// The map is a snapshot; callers must not reuse it after the collection changes.
    pub fn spent_by_category(window: DateWindow, transactions: &[Transaction]) -> HashMap<Uuid, f64> {
        let mut spent = HashMap::new();
        for txn in TransactionFilter::new()
            .within(window)
            .expenses()
            .select(transactions)
        {
            if let Some(id) = txn.category_id {
                *spent.entry(id).or_insert(0.0) += txn.amount;
            }
        }
        spent
    }

    /// Budget overview for the month window `month`.
    pub fn month_overview(
        categories: &[Category],
        transactions: &[Transaction],
        month: DateWindow,
    ) -> BudgetOverview {
        let spent = Self::spent_by_category(month, transactions);
        let progress: Vec<CategoryProgress> = categories
            .iter()
            .filter(|category| category.is_expense())
            .map(|category| {
                CategoryProgress::from_parts(
                    category,
                    spent.get(&category.id).copied().unwrap_or(0.0),
                )
            })
            .collect();
        let total_budget: f64 = progress.iter().map(|entry| entry.budget).sum();
        let total_spent = TransactionFilter::new()
            .within(month)
            .expenses()
            .total(transactions);
        BudgetOverview {
            window: month,
            total_budget,
            total_spent,
            overall_progress: Self::ratio(total_spent, total_budget),
            categories: progress,
        }
    }

    pub(crate) fn ratio(spent: f64, budget: f64) -> f64 {
        if budget > 0.0 {
            spent / budget
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn january() -> DateWindow {
        DateWindow::month_containing(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    #[test]
    fn progress_and_remaining_follow_spend() {
        let food = Category::expense("Food", 600.0);
        let txns = vec![
            Transaction::expense("Groceries", 450.0, at(2026, 1, 5)).with_category(food.id),
            Transaction::income("Refund", 100.0, at(2026, 1, 6)).with_category(food.id),
            Transaction::expense("December", 300.0, at(2025, 12, 31)).with_category(food.id),
        ];
        assert_eq!(BudgetService::spent(&food, january(), &txns), 450.0);
        assert_eq!(BudgetService::progress(&food, january(), &txns), 0.75);
        assert_eq!(BudgetService::remaining(&food, january(), &txns), 150.0);
    }

    #[test]
    fn no_budget_is_never_over() {
        let misc = Category::expense("Misc", 0.0);
        let txns = vec![Transaction::expense("Thing", 999.0, at(2026, 1, 2)).with_category(misc.id)];
        let progress = BudgetService::category_progress(&misc, january(), &txns);
        assert_eq!(progress.progress, 0.0);
        assert_eq!(progress.remaining, 0.0);
        assert_eq!(progress.status, BudgetStatus::NoBudget);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let fun = Category::expense("Fun", 50.0);
        let txns = vec![Transaction::expense("Concert", 80.0, at(2026, 1, 20)).with_category(fun.id)];
        let progress = BudgetService::category_progress(&fun, january(), &txns);
        assert_eq!(progress.remaining, 0.0);
        assert_eq!(progress.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(BudgetStatus::from_progress(100.0, 0.9), BudgetStatus::OnTrack);
        assert_eq!(BudgetStatus::from_progress(100.0, 0.95), BudgetStatus::NearLimit);
        assert_eq!(BudgetStatus::from_progress(100.0, 1.0), BudgetStatus::NearLimit);
        assert_eq!(BudgetStatus::from_progress(100.0, 1.01), BudgetStatus::OverBudget);
    }

    #[test]
    fn overview_counts_uncategorized_spend_in_total() {
        let food = Category::expense("Food", 600.0);
        let transport = Category::expense("Transport", 200.0);
        let salary = Category::income("Salary");
        let txns = vec![
            Transaction::expense("Groceries", 300.0, at(2026, 1, 5)).with_category(food.id),
            Transaction::expense("Cash", 100.0, at(2026, 1, 8)),
            Transaction::income("Pay", 3000.0, at(2026, 1, 1)).with_category(salary.id),
        ];
        let overview = BudgetService::month_overview(&[food, transport, salary], &txns, january());
        assert_eq!(overview.categories.len(), 2);
        assert_eq!(overview.total_budget, 800.0);
        assert_eq!(overview.total_spent, 400.0);
        assert_eq!(overview.overall_progress, 0.5);
    }
}
