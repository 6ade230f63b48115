use crate::{core::alerts::AlertState, errors::Result};

use super::AlertStore;

/// Keeps alert state in process memory. Useful for hosts without durable storage and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAlertStore {
    state: AlertState,
    writes: usize,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AlertState) -> Self {
        Self { state, writes: 0 }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Number of `write_all` calls served so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl AlertStore for MemoryAlertStore {
    fn read_all(&self) -> Result<AlertState> {
        Ok(self.state.clone())
    }

    fn write_all(&mut self, state: &AlertState) -> Result<()> {
        self.state = state.clone();
        self.writes += 1;
        Ok(())
    }
}
