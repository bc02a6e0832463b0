use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::persistence::dataset::local_snapshot_repository_trait::LocalSaveOutcome;
use crate::core::persistence::storage_io::{classify_write_error, write_atomic};

use super::aggregate_summary_entity::AggregateSummaryEntity;

/// Writes the aggregate summary file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct AggregateFsAdapter {
    path: PathBuf,
}

impl AggregateFsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn try_save(&self, summary: &AggregateSummaryEntity) -> LocalSaveOutcome {
        let bytes = match serde_json::to_vec_pretty(summary) {
            Ok(bytes) => bytes,
            Err(e) => return LocalSaveOutcome::Failed(e.to_string()),
        };

        match write_atomic(&self.path, &bytes) {
            Ok(()) => {
                info!(path = ?self.path, regions = summary.regions.len(), "✅ Wrote aggregate summary");
                LocalSaveOutcome::Saved
            }
            Err(e) => {
                let outcome = classify_write_error(&e);
                if outcome == LocalSaveOutcome::SkippedReadOnly {
                    info!(path = ?self.path, "Read-only filesystem; skipping summary file");
                } else {
                    warn!(path = ?self.path, error = %e, "Failed to write summary file");
                }
                outcome
            }
        }
    }
}
