use super::run_record_entity::{Dataset, RunRecordEntity};

/// Outcome of a best-effort local write.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalSaveOutcome {
    Saved,
    SkippedReadOnly,
    Failed(String),
}

/// Advisory local copy. Never authoritative, never fails the run.
pub trait LocalSnapshotRepository: Send + Sync {
    /// Overwrites the local snapshot with the latest run record only.
    fn try_save(&self, record: &RunRecordEntity) -> LocalSaveOutcome;

    /// Last snapshot written, if one is readable.
    fn load_last(&self) -> Option<RunRecordEntity>;

    /// Writes the full merged dataset next to the snapshot.
    fn try_export(&self, dataset: &Dataset) -> LocalSaveOutcome;

    /// Reads the exported dataset, if one is readable.
    fn load_export(&self) -> Option<Dataset>;
}
