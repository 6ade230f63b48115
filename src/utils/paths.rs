use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".spendwise";
const ALERTS_DIR: &str = "alerts";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.spendwise`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SPENDWISE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Uses `root` when provided, otherwise the application data directory.
pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(app_data_dir)
}

pub fn alerts_dir_in(base: &Path) -> PathBuf {
    base.join(ALERTS_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
