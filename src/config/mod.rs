use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    currency::CurrencyCode,
    errors::{Result, SpendError},
    storage::json_backend::{tmp_path, write_atomic},
    utils::paths::{config_file_in, ensure_dir, resolve_base},
};

pub const DEFAULT_ALERT_HISTORY_MONTHS: u32 = 3;

fn default_true() -> bool {
    true
}

fn default_history() -> u32 {
    DEFAULT_ALERT_HISTORY_MONTHS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_history")]
    pub alert_history_months: u32,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en-US".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            notifications_enabled: true,
            alert_history_months: DEFAULT_ALERT_HISTORY_MONTHS,
            locale: default_locale(),
        }
    }
}

impl Config {
    /// Month keys kept in alert state, never less than one.
    pub fn history_months(&self) -> u32 {
        self.alert_history_months.max(1)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for `config.json` inside `base`, or inside the application data directory.
    pub fn with_base_dir(base: Option<PathBuf>) -> Self {
        Self::new(config_file_in(&resolve_base(base)))
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            SpendError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
