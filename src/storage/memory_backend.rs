use std::sync::{Arc, Mutex};

use crate::{
    errors::{Result, TrackerError},
    ledger::RecordSnapshot,
};

use super::{decode_snapshot, encode_snapshot, StorageBackend};

/// In-process backend holding the serialized record. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw stored content, valid or not.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(content.into()))),
            fail_writes: false,
        }
    }

    /// Backend that rejects every write, for exercising save failures.
    pub fn read_only(self) -> Self {
        Self {
            fail_writes: true,
            ..self
        }
    }

    pub fn content(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<RecordSnapshot>> {
        let guard = self
            .slot
            .lock()
            .map_err(|_| TrackerError::StorageError("memory slot poisoned".into()))?;
        guard.as_deref().map(decode_snapshot).transpose()
    }

    fn save(&self, snapshot: &RecordSnapshot) -> Result<()> {
        if self.fail_writes {
            return Err(TrackerError::StorageError(
                "memory storage is read-only".into(),
            ));
        }
        let data = encode_snapshot(snapshot)?;
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| TrackerError::StorageError("memory slot poisoned".into()))?;
        *guard = Some(data);
        Ok(())
    }

    fn describe(&self) -> String {
        String::from("memory")
    }
}
