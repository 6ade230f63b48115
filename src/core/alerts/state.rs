use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::PeriodKey;

/// Thresholds already alerted for each category within one month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PeriodAlerts {
    categories: BTreeMap<Uuid, BTreeSet<u8>>,
}

impl PeriodAlerts {
    pub fn contains(&self, category_id: Uuid, threshold: u8) -> bool {
        self.categories
            .get(&category_id)
            .is_some_and(|set| set.contains(&threshold))
    }

    /// Adds `threshold` for `category_id`; returns false when it was already present.
    pub fn record(&mut self, category_id: Uuid, threshold: u8) -> bool {
        self.categories
            .entry(category_id)
            .or_default()
            .insert(threshold)
    }

    pub fn thresholds(&self, category_id: Uuid) -> Option<&BTreeSet<u8>> {
        self.categories.get(&category_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &BTreeSet<u8>)> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeSet::is_empty)
    }
}

/// Alert history keyed by calendar month.
///
/// A month's sets only grow; a new month starts from an empty entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AlertState {
    periods: BTreeMap<PeriodKey, PeriodAlerts>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self, key: &PeriodKey) -> Option<&PeriodAlerts> {
        self.periods.get(key)
    }

    pub fn insert_period(&mut self, key: PeriodKey, alerts: PeriodAlerts) {
        self.periods.insert(key, alerts);
    }

    pub fn has_alerted(&self, key: &PeriodKey, category_id: Uuid, threshold: u8) -> bool {
        self.period(key)
            .is_some_and(|alerts| alerts.contains(category_id, threshold))
    }

    pub fn record(&mut self, key: PeriodKey, category_id: Uuid, threshold: u8) -> bool {
        self.periods
            .entry(key)
            .or_default()
            .record(category_id, threshold)
    }

    /// Drops every month older than the `months` most recent ones ending at `current`.
    pub fn retain_recent(&mut self, current: PeriodKey, months: u32) -> Vec<PeriodKey> {
        let cutoff = current.months_before(months.max(1) - 1);
        let stale: Vec<PeriodKey> = self
            .periods
            .keys()
            .filter(|key| **key < cutoff)
            .copied()
            .collect();
        for key in &stale {
            self.periods.remove(key);
        }
        stale
    }

    pub fn clear(&mut self) {
        self.periods.clear();
    }

    pub fn periods(&self) -> impl Iterator<Item = (&PeriodKey, &PeriodAlerts)> {
        self.periods.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.values().all(PeriodAlerts::is_empty)
    }
}
