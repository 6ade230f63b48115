pub mod json_backend;
pub mod memory;

use crate::{core::alerts::AlertState, errors::Result};

/// Durable home for alert state. Implementations read and write the whole mapping at once.
pub trait AlertStore: Send {
    fn read_all(&self) -> Result<AlertState>;
    fn write_all(&mut self, state: &AlertState) -> Result<()>;
}

pub use json_backend::{load_ledger_from_path, save_ledger_to_path, JsonAlertStore};
pub use memory::MemoryAlertStore;
