mod common;

use chrono::Duration;
use common::{at, expense, household_ledger};
use spendwise_core::{
    core::services::{AggregationService, BudgetService, StatsPeriod, SummaryService},
    domain::{DateWindow, Transaction},
    ledger::TransactionFilter,
};

/// Spend spread over 400 days with a mix of categories, income, and uncategorized rows.
fn scattered_ledger() -> spendwise_core::ledger::Ledger {
    let (mut ledger, food, transport) = household_ledger();
    let start = at(2025, 1, 1);
    for day in 0..400i64 {
        let when = start + Duration::days(day) + Duration::hours(day % 13);
        let amount = 5.0 + (day % 17) as f64;
        let txn = match day % 4 {
            0 => expense("Groceries", amount, when, &food),
            1 => expense("Bus", amount, when, &transport),
            2 => Transaction::expense("Cash", amount, when),
            _ => Transaction::income("Refund", amount, when),
        };
        ledger.add_transaction(txn);
    }
    ledger
}

#[test]
fn bucket_counts_are_fixed() {
    let ledger = scattered_ledger();
    for day in [1, 15, 28] {
        let now = at(2025, 12, day);
        for period in StatsPeriod::ALL {
            let buckets = AggregationService::spending_buckets(&ledger.transactions, now, period);
            assert_eq!(buckets.len(), period.bucket_count(), "{period} at {now}");
        }
    }
    let empty = AggregationService::spending_buckets(&[], at(2026, 2, 28), StatsPeriod::Month);
    assert_eq!(empty.len(), 30);
    assert!(empty.iter().all(|bucket| bucket.amount == 0.0));
}

#[test]
fn week_buckets_sum_to_trailing_expenses() {
    let ledger = scattered_ledger();
    let now = at(2025, 9, 17);
    let buckets = AggregationService::spending_buckets(&ledger.transactions, now, StatsPeriod::Week);
    let bucket_total: f64 = buckets.iter().map(|bucket| bucket.amount).sum();
    let expected = TransactionFilter::new()
        .within(DateWindow::trailing_days(now.date(), 7))
        .expenses()
        .total(&ledger.transactions);
    assert!((bucket_total - expected).abs() < 1e-9);
    assert_eq!(buckets.last().map(|b| b.label.as_str()), Some("2025-09-17"));
    assert_eq!(buckets.first().map(|b| b.label.as_str()), Some("2025-09-11"));
}

#[test]
fn year_buckets_end_with_current_month() {
    let ledger = scattered_ledger();
    let buckets =
        AggregationService::spending_buckets(&ledger.transactions, at(2026, 1, 20), StatsPeriod::Year);
    let labels: Vec<&str> = buckets.iter().map(|bucket| bucket.label.as_str()).collect();
    assert_eq!(labels.first(), Some(&"2025-02"));
    assert_eq!(labels.last(), Some(&"2026-01"));
    assert!(buckets.iter().all(|bucket| bucket.amount > 0.0));
}

#[test]
fn category_totals_match_categorized_spend() {
    let ledger = scattered_ledger();
    let window = StatsPeriod::Month.window(at(2025, 6, 30).date());
    let totals = AggregationService::category_totals(&ledger.transactions, window, &ledger.categories);
    let breakdown: f64 = totals.iter().map(|entry| entry.amount).sum();
    let categorized: f64 = TransactionFilter::new()
        .within(window)
        .expenses()
        .select(&ledger.transactions)
        .into_iter()
        .filter(|txn| txn.category_id.is_some())
        .map(|txn| txn.amount)
        .sum();
    assert!((breakdown - categorized).abs() < 1e-9);
    assert!(totals.windows(2).all(|pair| pair[0].amount >= pair[1].amount));
    assert!(totals.iter().all(|entry| entry.category.is_expense()));
}

#[test]
fn budget_overview_and_home_totals_agree() {
    let ledger = scattered_ledger();
    let today = at(2025, 8, 20).date();
    let month = DateWindow::month_containing(today);
    let overview = BudgetService::month_overview(&ledger.categories, &ledger.transactions, month);
    let totals = SummaryService::month_totals(&ledger.transactions, today);
    assert!((overview.total_spent - totals.expenses).abs() < 1e-9);
    assert_eq!(overview.total_budget, 900.0);
    let categorized: f64 = overview.categories.iter().map(|entry| entry.spent).sum();
    assert!(categorized < overview.total_spent);
}
