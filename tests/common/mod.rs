#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use fintrack::{
    fintrack_config::Config, fintrack_core::FixedClock, fintrack_storage_json::JsonLedgerStore,
    FinanceTracker,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_root() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A tracker over an isolated JSON store whose clock is pinned to `today`.
pub fn setup_test_env(today: NaiveDate) -> (FinanceTracker, PathBuf) {
    let base = temp_root();
    let config = Config {
        data_root: Some(base.clone()),
        backup_retention: 3,
        ..Config::default()
    };
    let store = JsonLedgerStore::under_root(&base, config.backup_retention)
        .expect("create json store");
    let tracker = FinanceTracker::new(config, Box::new(store), Box::new(FixedClock(today)));
    (tracker, base)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
