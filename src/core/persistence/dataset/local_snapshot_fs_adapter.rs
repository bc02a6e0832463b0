use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::persistence::storage_io::{classify_write_error, write_atomic};

use super::local_snapshot_repository_trait::{LocalSaveOutcome, LocalSnapshotRepository};
use super::run_record_entity::{Dataset, RunRecordEntity};

/// FS adapter for the local snapshot (`latest.json`) and dataset export.
///
/// All writes are best effort; a read-only filesystem is reported as a skip.
#[derive(Debug, Clone)]
pub struct LocalSnapshotFsAdapter {
    snapshot_path: PathBuf,
    export_path: PathBuf,
}

impl LocalSnapshotFsAdapter {
    pub fn new(snapshot_path: PathBuf, export_path: PathBuf) -> Self {
        Self {
            snapshot_path,
            export_path,
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> LocalSaveOutcome {
        let bytes = match serde_json::to_vec_pretty(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(?path, error = %e, "Failed to serialize local data");
                return LocalSaveOutcome::Failed(e.to_string());
            }
        };

        match write_atomic(path, &bytes) {
            Ok(()) => {
                debug!(?path, bytes = bytes.len(), "Wrote local file");
                LocalSaveOutcome::Saved
            }
            Err(e) => {
                let outcome = classify_write_error(&e);
                match &outcome {
                    LocalSaveOutcome::SkippedReadOnly => {
                        info!(?path, "Read-only filesystem; skipping local save")
                    }
                    _ => warn!(?path, error = %e, "Local save failed"),
                }
                outcome
            }
        }
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(?path, error = %e, "No local file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(?path, error = %e, "Ignoring unreadable local file");
                None
            }
        }
    }
}

impl LocalSnapshotRepository for LocalSnapshotFsAdapter {
    fn try_save(&self, record: &RunRecordEntity) -> LocalSaveOutcome {
        Self::write_json(&self.snapshot_path, record)
    }

    fn load_last(&self) -> Option<RunRecordEntity> {
        Self::read_json(&self.snapshot_path)
    }

    fn try_export(&self, dataset: &Dataset) -> LocalSaveOutcome {
        Self::write_json(&self.export_path, dataset)
    }

    fn load_export(&self) -> Option<Dataset> {
        Self::read_json(&self.export_path)
    }
}
