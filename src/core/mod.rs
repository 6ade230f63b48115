//! Aggregation, budget evaluation, and threshold alerting services.

pub mod alerts;
pub mod services;
pub mod time;
