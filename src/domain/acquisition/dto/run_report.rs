use chrono::{DateTime, Utc};

use crate::core::client::pricing_client::FetchFailure;
use crate::core::persistence::dataset::local_snapshot_repository_trait::LocalSaveOutcome;
use crate::core::persistence::dataset::remote_dataset_repository_trait::SaveOutcome;

/// Where the prior dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    /// Remote had nothing; the local export of the full dataset was used.
    LocalExport,
    /// Remote had nothing; the single-record local snapshot seeded the history.
    LocalSnapshot,
    Empty,
}

/// What one acquisition run did, step by step.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub fetched: Vec<String>,
    pub failed: Vec<(String, FetchFailure)>,
    pub load_source: LoadSource,
    pub dataset_len: usize,
    pub local_snapshot: LocalSaveOutcome,
    pub local_export: LocalSaveOutcome,
    pub remote_save: SaveOutcome,
}
