//! Ledger snapshots and the pure query layer over transaction collections.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod query;

pub use ledger::{ledger_warnings, Ledger};
pub use query::{select, sum, TransactionFilter};
