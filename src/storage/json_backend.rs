use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    core::utils::ensure_dir,
    errors::Result,
    ledger::RecordSnapshot,
};

use super::{decode_snapshot, encode_snapshot, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for the accumulator record.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<RecordSnapshot>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_snapshot(&data).map(Some)
    }

    fn save(&self, snapshot: &RecordSnapshot) -> Result<()> {
        let json = encode_snapshot(snapshot)?;
        write_atomic(&self.path, &json)?;
        info!(path = %self.path.display(), "record saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
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

/// Stages `data` next to `path`, flushes it to disk, then renames it into place.
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let staged = File::create(&tmp).and_then(|mut file| {
        file.write_all(data.as_bytes())?;
        file.flush()?;
        file.sync_all()
    });
    if let Err(err) = staged {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
