#![doc(test(attr(deny(warnings))))]

//! Spendwise Core offers the period aggregation, budget progress, and
//! threshold alerting primitives that sit underneath the Spendwise tracker.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use errors::{Result, SpendError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendwise Core tracing initialized.");
    });
}
