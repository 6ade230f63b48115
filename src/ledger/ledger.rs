use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Category, Transaction};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// In-memory snapshot of the host's categories and transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            categories: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// A ledger seeded with the default expense and income categories.
    pub fn with_default_categories(name: impl Into<String>) -> Self {
        let mut ledger = Self::new(name);
        ledger.categories = Category::all_defaults();
        ledger
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    /// Replaces the stored transaction with the same id; returns false when absent.
    pub fn update_transaction(&mut self, transaction: Transaction) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(slot) => {
                *slot = transaction;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    /// Removes a category and detaches its transactions instead of deleting them.
    pub fn remove_category(&mut self, id: Uuid) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        let removed = self.categories.remove(index);
        for txn in &mut self.transactions {
            if txn.category_id == Some(id) {
                txn.category_id = None;
            }
        }
        self.touch();
        Some(removed)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Lists transactions whose category reference no longer resolves.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let category_ids: HashSet<_> = ledger.categories.iter().map(|c| c.id).collect();
    ledger
        .transactions
        .iter()
        .filter_map(|txn| {
            let category = txn.category_id?;
            (!category_ids.contains(&category)).then(|| {
                format!(
                    "transaction {} references missing category {}",
                    txn.id, category
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn removing_category_nullifies_references() {
        let mut ledger = Ledger::new("Household");
        let food = ledger.add_category(Category::expense("Food", 600.0));
        let txn_id =
            ledger.add_transaction(Transaction::expense("Lunch", 12.0, sample_date()).with_category(food));

        let removed = ledger.remove_category(food).expect("category removed");
        assert_eq!(removed.name, "Food");
        let txn = ledger.transaction(txn_id).expect("transaction kept");
        assert_eq!(txn.category_id, None);
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[test]
    fn warnings_flag_dangling_category_refs() {
        let mut ledger = Ledger::new("Household");
        let ghost = Uuid::new_v4();
        ledger.add_transaction(Transaction::expense("Lunch", 12.0, sample_date()).with_category(ghost));
        let warnings = ledger_warnings(&ledger);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(&ghost.to_string()));
    }

    #[test]
    fn update_and_remove_transactions() {
        let mut ledger = Ledger::new("Household");
        let txn = Transaction::expense("Lunch", 12.0, sample_date());
        let id = ledger.add_transaction(txn.clone());

        let mut edited = txn;
        edited.amount = 15.0;
        assert!(ledger.update_transaction(edited));
        assert_eq!(ledger.transaction(id).map(|t| t.amount), Some(15.0));

        assert!(ledger.remove_transaction(id).is_some());
        assert!(ledger.remove_transaction(id).is_none());
        assert!(!ledger.update_transaction(Transaction::expense("Ghost", 1.0, sample_date())));
    }
}
