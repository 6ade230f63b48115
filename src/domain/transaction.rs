use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single income or expense entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    /// Non-negative magnitude; `direction` carries the sign.
    pub amount: f64,
    pub direction: Direction,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        date: NaiveDateTime,
        direction: Direction,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount: amount.abs(),
            direction,
            date,
            note: String::new(),
            category_id: None,
        }
    }

    pub fn expense(title: impl Into<String>, amount: f64, date: NaiveDateTime) -> Self {
        Self::new(title, amount, date, Direction::Expense)
    }

    pub fn income(title: impl Into<String>, amount: f64, date: NaiveDateTime) -> Self {
        Self::new(title, amount, date, Direction::Income)
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.direction.is_expense()
    }

    pub fn is_income(&self) -> bool {
        self.direction.is_income()
    }

    /// Calendar day the transaction occurred on, ignoring time of day.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Amount signed by direction (income positive, expense negative).
    pub fn signed_amount(&self) -> f64 {
        self.direction.sign() * self.amount
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToCategory for Transaction {
    fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = if self.is_income() { '+' } else { '-' };
        format!("{} {}{:.2} [{}]", self.title, sign, self.amount, self.day())
    }
}
