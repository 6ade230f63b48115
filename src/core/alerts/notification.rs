use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{domain::PeriodKey, errors::Result};

/// Percent-of-budget trip points, evaluated in ascending order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertThreshold {
    Eighty,
    Ninety,
    Hundred,
}

impl AlertThreshold {
    pub const ALL: [AlertThreshold; 3] = [
        AlertThreshold::Eighty,
        AlertThreshold::Ninety,
        AlertThreshold::Hundred,
    ];

    pub fn percent(self) -> u8 {
        match self {
            AlertThreshold::Eighty => 80,
            AlertThreshold::Ninety => 90,
            AlertThreshold::Hundred => 100,
        }
    }

    pub fn from_percent(percent: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.percent() == percent)
    }

    pub fn priority(self) -> AlertPriority {
        match self {
            AlertThreshold::Eighty => AlertPriority::Passive,
            AlertThreshold::Ninety | AlertThreshold::Hundred => AlertPriority::TimeSensitive,
        }
    }
}

impl fmt::Display for AlertThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Delivery urgency hint for the notification channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertPriority {
    /// Low priority; delivered quietly.
    Passive,
    /// High priority; may break through focus modes.
    TimeSensitive,
}

/// A decision that one threshold was newly crossed for a category this month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRequest {
    pub category_id: Uuid,
    pub category_name: String,
    pub threshold: AlertThreshold,
    pub period_key: PeriodKey,
    pub amount_spent: f64,
    pub budget_amount: f64,
    pub amount_spent_formatted: String,
    pub budget_amount_formatted: String,
}

impl AlertRequest {
    pub fn threshold_percent(&self) -> u8 {
        self.threshold.percent()
    }

    pub fn priority(&self) -> AlertPriority {
        self.threshold.priority()
    }

    /// Renders the user-visible notification for this request.
    pub fn notification(&self) -> AlertNotification {
        let name = &self.category_name;
        let amounts = format!(
            "({} of {})",
            self.amount_spent_formatted, self.budget_amount_formatted
        );
        let body = match self.threshold {
            AlertThreshold::Eighty => {
                format!("You've used 80% of your {name} budget {amounts}")
            }
            AlertThreshold::Ninety => {
                format!("Warning: 90% of your {name} budget spent! {amounts}")
            }
            AlertThreshold::Hundred => {
                format!("You've exceeded your {name} budget! {amounts}")
            }
        };
        AlertNotification {
            identifier: format!("budget-{}-{}", name.to_lowercase(), self.threshold.percent()),
            title: format!("Budget Alert: {name}"),
            body,
            priority: self.priority(),
        }
    }
}

/// Platform-neutral notification payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertNotification {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub priority: AlertPriority,
}

/// Channel that schedules user-visible alerts. Delivery guarantees belong to the implementor.
pub trait NotificationSink {
    fn schedule(&self, notification: &AlertNotification) -> Result<()>;
}
