//! At-most-once budget threshold alerts per category per calendar month.

pub mod notification;
pub mod state;
pub mod tracker;

pub use notification::{
    AlertNotification, AlertPriority, AlertRequest, AlertThreshold, NotificationSink,
};
pub use state::{AlertState, PeriodAlerts};
pub use tracker::{AlertSettings, ThresholdAlertTracker};
