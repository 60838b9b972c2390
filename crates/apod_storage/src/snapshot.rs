//! Flat-file snapshot of collected records.

use apod_core::PictureRecord;
use apod_error::{ApodResult, JsonError, StorageError, StorageErrorKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Schema version written into every new snapshot.
///
/// Files without a version (a bare JSON array) are read as version 0.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotFile<'a> {
    schema_version: u32,
    records: &'a [PictureRecord],
}

/// Whole-file snapshot of the collected record list.
///
/// `save` replaces the file wholesale; there is no patching or appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Snapshot stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Serialize `records` in order and replace the snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be written.
    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    pub fn save(&self, records: &[PictureRecord]) -> ApodResult<()> {
        let json = serde_json::to_string_pretty(&SnapshotFile {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            records,
        })
        .map_err(|e| JsonError::new(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        info!("Saved snapshot");
        Ok(())
    }

    /// Read the whole snapshot back, in the order it was saved.
    ///
    /// # Errors
    ///
    /// - `StorageErrorKind::NotFound` when the file does not exist
    ///   (see [`apod_error::ApodError::is_not_found`])
    /// - `StorageErrorKind::InvalidSnapshot` when it is empty or not a record list
    /// - `StorageErrorKind::UnsupportedVersion` when written by a newer schema
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> ApodResult<Vec<PictureRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            let detail = format!("{}: {}", self.path.display(), e);
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(detail))
            } else {
                StorageError::new(StorageErrorKind::FileRead(detail))
            }
        })?;

        let records = parse_snapshot(&content)?;
        debug!(count = records.len(), "Loaded snapshot");
        Ok(records)
    }

    /// Like [`load`](Self::load), but `Ok(None)` when no snapshot exists yet.
    pub fn load_if_present(&self) -> ApodResult<Option<Vec<PictureRecord>>> {
        match self.load() {
            Ok(records) => Ok(Some(records)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn invalid(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorKind::InvalidSnapshot(message.into()))
}

fn parse_snapshot(content: &str) -> Result<Vec<PictureRecord>, StorageError> {
    if content.trim().is_empty() {
        return Err(invalid("file is empty"));
    }

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;

    let records = match value {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut object) => {
            let version = object
                .get("schema_version")
                .and_then(serde_json::Value::as_u64)
                .ok_or_else(|| invalid("missing schema_version"))?;
            if version > u64::from(SNAPSHOT_SCHEMA_VERSION) {
                return Err(StorageError::new(StorageErrorKind::UnsupportedVersion(
                    u32::try_from(version).unwrap_or(u32::MAX),
                )));
            }
            object
                .remove("records")
                .ok_or_else(|| invalid("missing records"))?
        }
        _ => return Err(invalid("expected a list of records")),
    };

    serde_json::from_value(records).map_err(|e| invalid(e.to_string()))
}
