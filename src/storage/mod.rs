pub mod json_backend;
pub mod memory_backend;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::{
    errors::Result,
    ledger::{AccumulatorRecord, RecordSnapshot},
};

/// Abstraction over persistence backends capable of storing the accumulator record.
///
/// `load` distinguishes "nothing stored yet" (`Ok(None)`) from unreadable content
/// (`Err`). Writes always replace the whole record.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Option<RecordSnapshot>>;
    fn save(&self, snapshot: &RecordSnapshot) -> Result<()>;

    /// Human readable location used in log and error messages.
    fn describe(&self) -> String;
}

/// Decodes a stored JSON document into a snapshot.
pub fn decode_snapshot(data: &str) -> Result<RecordSnapshot> {
    Ok(serde_json::from_str(data)?)
}

pub fn encode_snapshot(snapshot: &RecordSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Owns the persistence backend and converts between stored and in-memory records.
pub struct AccumulatorStore {
    backend: Box<dyn StorageBackend>,
}

impl AccumulatorStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Loads the stored record, substituting a fresh one when nothing usable is stored.
    pub fn load(&self, now: NaiveDateTime) -> AccumulatorRecord {
        let snapshot = match self.backend.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(location = %self.backend.describe(), "no stored record, starting fresh");
                return AccumulatorRecord::fresh(now);
            }
            Err(err) => {
                warn!(
                    location = %self.backend.describe(),
                    error = %err,
                    "stored record unreadable, starting fresh"
                );
                return AccumulatorRecord::fresh(now);
            }
        };
        match snapshot.into_record(now) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    location = %self.backend.describe(),
                    error = %err,
                    "stored record has an invalid timestamp, starting fresh"
                );
                AccumulatorRecord::fresh(now)
            }
        }
    }

    pub fn save(&self, record: &AccumulatorRecord) -> Result<()> {
        self.backend.save(&record.to_snapshot())
    }

    pub fn location(&self) -> String {
        self.backend.describe()
    }
}
