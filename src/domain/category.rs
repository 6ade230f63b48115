//! Domain types representing spending and income categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

const DEFAULT_ICON: &str = "tag.fill";
const DEFAULT_COLOR: &str = "#8E8E93";

/// Groups transactions and carries the monthly budget limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "Category::default_icon")]
    pub icon: String,
    #[serde(default = "Category::default_color")]
    pub color_hex: String,
    /// Monthly limit; `0` means no limit.
    #[serde(default)]
    pub budget: f64,
    pub direction: Direction,
}

impl Category {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: Self::default_icon(),
            color_hex: Self::default_color(),
            budget: 0.0,
            direction,
        }
    }

    pub fn expense(name: impl Into<String>, budget: f64) -> Self {
        Self::new(name, Direction::Expense).with_budget(budget)
    }

    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Income)
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_appearance(mut self, icon: impl Into<String>, color_hex: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color_hex = color_hex.into();
        self
    }

    /// Budget limit with negative and non-finite values clamped to zero.
    pub fn budget_limit(&self) -> f64 {
        if self.budget.is_finite() && self.budget > 0.0 {
            self.budget
        } else {
            0.0
        }
    }

    pub fn has_budget(&self) -> bool {
        self.budget_limit() > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.direction.is_expense()
    }

    /// Categories seeded for a fresh ledger.
    pub fn default_expense_categories() -> Vec<Category> {
        vec![
            Category::expense("Food & Dining", 600.0).with_appearance("fork.knife", "#34C759"),
            Category::expense("Transport", 300.0).with_appearance("car.fill", "#FF9500"),
        ]
    }

    pub fn default_income_categories() -> Vec<Category> {
        vec![
            Category::income("Salary").with_appearance("banknote.fill", "#34C759"),
            Category::income("Freelance").with_appearance("laptopcomputer", "#007AFF"),
            Category::income("Investments")
                .with_appearance("chart.line.uptrend.xyaxis", "#5856D6"),
            Category::income("Other Income").with_appearance("plus.circle.fill", "#8E8E93"),
        ]
    }

    pub fn all_defaults() -> Vec<Category> {
        let mut all = Self::default_expense_categories();
        all.extend(Self::default_income_categories());
        all
    }

    fn default_icon() -> String {
        DEFAULT_ICON.into()
    }

    fn default_color() -> String {
        DEFAULT_COLOR.into()
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.direction)
    }
}
