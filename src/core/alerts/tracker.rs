use std::{
    collections::{BTreeSet, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::{Config, DEFAULT_ALERT_HISTORY_MONTHS},
    core::{services::BudgetService, time::Clock},
    currency::{format_currency, CurrencyCode},
    domain::{Category, PeriodKey, Transaction},
    errors::Result,
    storage::AlertStore,
};

use super::{AlertRequest, AlertState, AlertThreshold, NotificationSink};

/// The slice of user configuration the tracker depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSettings {
    pub enabled: bool,
    pub currency: CurrencyCode,
    pub history_months: u32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            currency: CurrencyCode::default(),
            history_months: DEFAULT_ALERT_HISTORY_MONTHS,
        }
    }
}

impl From<&Config> for AlertSettings {
    fn from(config: &Config) -> Self {
        Self {
            enabled: config.notifications_enabled,
            currency: config.currency.clone(),
            history_months: config.history_months(),
        }
    }
}

/// Remembers which budget thresholds already fired for each category this month.
///
/// The whole read-decide-write cycle of [`ThresholdAlertTracker::evaluate`] runs under one lock,
/// so concurrent callers never interleave their updates to the store.
pub struct ThresholdAlertTracker {
    store: Mutex<Box<dyn AlertStore>>,
    settings: AlertSettings,
}

impl ThresholdAlertTracker {
    pub fn new(store: impl AlertStore + 'static, settings: AlertSettings) -> Self {
        Self::from_boxed(Box::new(store), settings)
    }

    pub fn from_boxed(store: Box<dyn AlertStore>, settings: AlertSettings) -> Self {
        Self {
            store: Mutex::new(store),
            settings,
        }
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.settings
    }

    /// Returns one request per threshold newly crossed in the month containing `now`.
    ///
    /// Requests come out grouped by category in input order, thresholds ascending. State is
    /// written back only when something new fired; a failed write discards the requests.
    pub fn evaluate(
        &self,
        categories: &[Category],
        transactions: &[Transaction],
        now: NaiveDateTime,
    ) -> Result<Vec<AlertRequest>> {
        if !self.settings.enabled {
            debug!("budget notifications disabled; skipping evaluation");
            return Ok(Vec::new());
        }

        let key = PeriodKey::from_datetime(now);
        let window = key.month_window();
        let mut store = self.lock_store();
        let mut state = read_state(store.as_ref());
        let spent_by_category = BudgetService::spent_by_category(window, transactions);

        let mut requests = Vec::new();
        let mut seen = HashSet::new();
        for category in categories {
            if !category.is_expense() || !category.has_budget() || !seen.insert(category.id) {
                continue;
            }
            let budget = category.budget_limit();
            let spent = spent_by_category.get(&category.id).copied().unwrap_or(0.0);
            let percent = percent_used(spent, budget);
            for threshold in AlertThreshold::ALL {
                if percent < i64::from(threshold.percent()) {
                    break;
                }
                if state.record(key, category.id, threshold.percent()) {
                    requests.push(self.request(category, threshold, key, spent, budget));
                }
            }
        }

        if requests.is_empty() {
            debug!("no new budget thresholds crossed for {}", key);
            return Ok(requests);
        }

        let stale = state.retain_recent(key, self.settings.history_months);
        if !stale.is_empty() {
            debug!("dropping alert history for {} stale month(s)", stale.len());
        }
        store.write_all(&state)?;
        for request in &requests {
            info!(
                "budget alert: {} reached {} ({} of {})",
                request.category_name,
                request.threshold,
                request.amount_spent_formatted,
                request.budget_amount_formatted
            );
        }
        Ok(requests)
    }

    /// [`Self::evaluate`] at the instant reported by `clock`.
    pub fn evaluate_at(
        &self,
        clock: &dyn Clock,
        categories: &[Category],
        transactions: &[Transaction],
    ) -> Result<Vec<AlertRequest>> {
        self.evaluate(categories, transactions, clock.now())
    }

    /// Evaluates and hands every resulting notification to `sink`.
    ///
    /// A notification the sink rejects is logged and stays recorded as sent.
    pub fn evaluate_and_dispatch(
        &self,
        categories: &[Category],
        transactions: &[Transaction],
        now: NaiveDateTime,
        sink: &dyn NotificationSink,
    ) -> Result<Vec<AlertRequest>> {
        let requests = self.evaluate(categories, transactions, now)?;
        for request in &requests {
            let notification = request.notification();
            if let Err(err) = sink.schedule(&notification) {
                warn!(
                    "failed to schedule notification `{}`: {}",
                    notification.identifier, err
                );
            }
        }
        Ok(requests)
    }

    /// Forgets every recorded threshold so the next evaluation fires again.
    pub fn reset_monthly_alerts(&self) -> Result<()> {
        let mut store = self.lock_store();
        store.write_all(&AlertState::new())?;
        info!("budget alert history cleared");
        Ok(())
    }

    /// Thresholds already alerted for `category_id` in `key`.
    pub fn alerted_thresholds(&self, category_id: Uuid, key: PeriodKey) -> BTreeSet<u8> {
        let store = self.lock_store();
        read_state(store.as_ref())
            .period(&key)
            .and_then(|alerts| alerts.thresholds(category_id))
            .cloned()
            .unwrap_or_default()
    }

    fn request(
        &self,
        category: &Category,
        threshold: AlertThreshold,
        period_key: PeriodKey,
        spent: f64,
        budget: f64,
    ) -> AlertRequest {
        AlertRequest {
            category_id: category.id,
            category_name: category.name.clone(),
            threshold,
            period_key,
            amount_spent: spent,
            budget_amount: budget,
            amount_spent_formatted: format_currency(spent, &self.settings.currency),
            budget_amount_formatted: format_currency(budget, &self.settings.currency),
        }
    }

    fn lock_store(&self) -> MutexGuard<'_, Box<dyn AlertStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_state(store: &dyn AlertStore) -> AlertState {
    match store.read_all() {
        Ok(state) => state,
        Err(err) => {
            warn!("alert state unreadable, starting from empty: {}", err);
            AlertState::new()
        }
    }
}

/// Whole percent of `budget` consumed, rounded down.
pub(crate) fn percent_used(spent: f64, budget: f64) -> i64 {
    if budget <= 0.0 {
        return 0;
    }
    let percent = (spent * 100.0 / budget).floor();
    if percent.is_finite() {
        percent as i64
    } else {
        0
    }
}
