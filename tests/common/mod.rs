#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use spendwise_core::{
    config::ConfigManager,
    domain::{Category, Transaction},
    ledger::Ledger,
    storage::{save_ledger_to_path, JsonAlertStore},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an alert store and config manager backed by the same fresh directory.
pub fn setup_test_env() -> (JsonAlertStore, ConfigManager, PathBuf) {
    let base = temp_base();
    let store = JsonAlertStore::new(Some(base.clone())).expect("create alert store");
    let config = ConfigManager::with_base_dir(Some(base.clone()));
    (store, config, base)
}

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

/// A ledger with a $600 Food budget and a $300 Transport budget.
pub fn household_ledger() -> (Ledger, Category, Category) {
    let mut ledger = Ledger::new("Household");
    let food = Category::expense("Food & Dining", 600.0);
    let transport = Category::expense("Transport", 300.0);
    ledger.add_category(food.clone());
    ledger.add_category(transport.clone());
    ledger.add_category(Category::income("Salary"));
    (ledger, food, transport)
}

pub fn expense(title: &str, amount: f64, date: NaiveDateTime, category: &Category) -> Transaction {
    Transaction::expense(title, amount, date).with_category(category.id)
}

pub fn write_ledger(ledger: &Ledger, base: &std::path::Path) -> PathBuf {
    let path = base.join("ledger.json");
    save_ledger_to_path(ledger, &path).expect("save ledger snapshot");
    path
}
