use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    core::alerts::{AlertState, PeriodAlerts},
    domain::PeriodKey,
    errors::{Result, SpendError},
    ledger::Ledger,
    utils::paths::{alerts_dir_in, ensure_dir, resolve_base},
};

use super::AlertStore;

const STATE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores alert state as one `<yyyy-MM>.json` file per month.
///
/// Each file maps category ids to the thresholds already alerted in that month.
#[derive(Debug, Clone)]
pub struct JsonAlertStore {
    dir: PathBuf,
}

impl JsonAlertStore {
    /// Opens the store under `root/alerts`, defaulting to the application data directory.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = resolve_base(root);
        Self::in_dir(alerts_dir_in(&base))
    }

    pub fn in_dir(dir: PathBuf) -> Result<Self> {
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &PeriodKey) -> PathBuf {
        self.dir.join(format!("{key}.{STATE_EXTENSION}"))
    }

    /// Month keys that currently have a file on disk.
    fn stored_keys(&self) -> Result<Vec<(PeriodKey, PathBuf)>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(STATE_EXTENSION) {
                continue;
            }
            let key = match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(PeriodKey::parse)
            {
                Some(Ok(key)) => key,
                _ => {
                    debug!(path = %path.display(), "ignoring file without a month key");
                    continue;
                }
            };
            keys.push((key, path));
        }
        keys.sort_by_key(|(key, _)| *key);
        Ok(keys)
    }

    fn prune_except(&self, live: &HashSet<PeriodKey>) {
        let stored = match self.stored_keys() {
            Ok(stored) => stored,
            Err(err) => {
                warn!("could not list alert state in {}: {}", self.dir.display(), err);
                return;
            }
        };
        for (key, path) in stored {
            if live.contains(&key) {
                continue;
            }
            debug!(%key, "removing alert state for dropped month");
            if let Err(err) = fs::remove_file(&path) {
                warn!("could not remove stale alert state {}: {}", path.display(), err);
            }
        }
    }
}

impl AlertStore for JsonAlertStore {
    fn read_all(&self) -> Result<AlertState> {
        let mut state = AlertState::new();
        for (key, path) in self.stored_keys()? {
            let parsed = fs::read_to_string(&path)
                .map_err(SpendError::from)
                .and_then(|data| {
                    serde_json::from_str::<PeriodAlerts>(&data).map_err(SpendError::from)
                });
            match parsed {
                Ok(alerts) => state.insert_period(key, alerts),
                Err(err) => {
                    warn!("discarding unreadable alert state {}: {}", path.display(), err);
                }
            }
        }
        Ok(state)
    }

    /// Writes every month in `state`, then prunes files for months it no longer holds.
    ///
    /// Pruning is best-effort: once the live months are on disk the write has succeeded, and a
    /// leftover file is only logged.
    fn write_all(&mut self, state: &AlertState) -> Result<()> {
        ensure_dir(&self.dir)?;
        let mut live = HashSet::new();
        for (key, alerts) in state.periods() {
            let path = self.path_for(key);
            let json = serde_json::to_string_pretty(alerts)?;
            let tmp = tmp_path(&path);
            write_atomic(&tmp, &json)?;
            fs::rename(&tmp, &path)?;
            live.insert(*key);
        }
        self.prune_except(&live);
        Ok(())
    }
}

pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    Ok(ledger)
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
