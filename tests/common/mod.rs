#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};
use expense_tracker::{
    core::{services::ExpenseService, time::ManualClock},
    storage::{json_backend::JsonStorage, AccumulatorStore},
};
use tempfile::TempDir;

/// Isolated tracker backed by a JSON file in its own temp directory.
pub struct TestEnv {
    pub dir: TempDir,
    pub clock: Arc<ManualClock>,
}

impl TestEnv {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
            clock: Arc::new(ManualClock::new(start)),
        }
    }

    pub fn record_path(&self) -> PathBuf {
        self.dir.path().join("kakeibo_data.json")
    }

    pub fn store(&self) -> AccumulatorStore {
        AccumulatorStore::new(Box::new(JsonStorage::new(self.record_path())))
    }

    /// Opens a service the way a fresh process start would.
    pub fn open(&self) -> ExpenseService {
        ExpenseService::open(self.store(), self.clock.clone())
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}
