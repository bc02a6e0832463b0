use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::persistence::aggregate::aggregate_summary_entity::AggregateSummaryEntity;

use super::run_record_entity::Dataset;

/// Result of reading the remote dataset. Only `Loaded` carries data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Dataset),
    NotFound,
    Unavailable(String),
}

/// Result of replacing a remote document.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created,
    Updated,
    NotConfigured,
    /// The revision check rejected the write; not retried.
    Conflict { status: u16, body: String },
    Failed { status: Option<u16>, body: String },
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Created | SaveOutcome::Updated)
    }
}

/// Source of truth for the dataset, guarded by the document revision token.
#[async_trait]
pub trait RemoteDatasetRepository: Send + Sync {
    async fn load(&self, path: &str) -> LoadOutcome;

    /// Replaces the whole document at `path` with `dataset`.
    async fn save(&self, path: &str, dataset: &Dataset, now: DateTime<Utc>) -> SaveOutcome;

    async fn save_summary(
        &self,
        path: &str,
        summary: &AggregateSummaryEntity,
        now: DateTime<Utc>,
    ) -> SaveOutcome;
}
