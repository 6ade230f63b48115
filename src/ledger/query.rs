//! Pure selection and summation over transaction slices.

use uuid::Uuid;

use crate::domain::{DateWindow, Direction, Transaction};

/// Returns the transactions accepted by `predicate`, preserving input order.
pub fn select<'a, P>(transactions: &'a [Transaction], predicate: P) -> Vec<&'a Transaction>
where
    P: Fn(&Transaction) -> bool,
{
    transactions.iter().filter(|txn| predicate(txn)).collect()
}

/// Sums transaction magnitudes; an empty input yields zero.
pub fn sum<'a, I>(transactions: I) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(|txn| txn.amount).sum()
}

/// Composable predicate over date window, category, and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    window: Option<DateWindow>,
    category: Option<Uuid>,
    direction: Option<Direction>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category = Some(category_id);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn expenses(self) -> Self {
        self.direction(Direction::Expense)
    }

    pub fn income(self) -> Self {
        self.direction(Direction::Income)
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(window) = &self.window {
            if !window.contains_datetime(txn.date) {
                return false;
            }
        }
        if let Some(direction) = self.direction {
            if txn.direction != direction {
                return false;
            }
        }
        match self.category {
            Some(id) => txn.category_id == Some(id),
            None => true,
        }
    }

    pub fn select<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        select(transactions, |txn| self.matches(txn))
    }

    pub fn total(&self, transactions: &[Transaction]) -> f64 {
        sum(transactions.iter().filter(|txn| self.matches(txn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn sample() -> (Uuid, Vec<Transaction>) {
        let food = Uuid::new_v4();
        let txns = vec![
            Transaction::expense("Groceries", 82.5, at(2026, 1, 3)).with_category(food),
            Transaction::income("Salary", 3200.0, at(2026, 1, 1)),
            Transaction::expense("Gas", 45.0, at(2026, 1, 9)),
            Transaction::expense("Dinner", 60.0, at(2025, 12, 31)).with_category(food),
        ];
        (food, txns)
    }

    #[test]
    fn empty_input_is_empty_result_and_zero_sum() {
        let txns: Vec<Transaction> = Vec::new();
        assert!(select(&txns, |_| true).is_empty());
        assert_eq!(sum(&txns), 0.0);
        assert_eq!(TransactionFilter::new().expenses().total(&txns), 0.0);
    }

    #[test]
    fn select_preserves_input_order() {
        let (_, txns) = sample();
        let titles: Vec<_> = TransactionFilter::new()
            .expenses()
            .select(&txns)
            .into_iter()
            .map(|txn| txn.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Groceries", "Gas", "Dinner"]);
    }

    #[test]
    fn filters_compose() {
        let (food, txns) = sample();
        let january = DateWindow::month_containing(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let filter = TransactionFilter::new()
            .within(january)
            .expenses()
            .in_category(food);
        assert_eq!(filter.total(&txns), 82.5);

        let january_income = TransactionFilter::new().within(january).income();
        assert_eq!(january_income.total(&txns), 3200.0);
    }
}
