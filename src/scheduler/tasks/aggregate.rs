use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::app_state::AppState;
use crate::core::persistence::aggregate::aggregate_summary_entity::AggregateSummaryEntity;
use crate::core::persistence::dataset::local_snapshot_repository_trait::{
    LocalSaveOutcome, LocalSnapshotRepository,
};
use crate::core::persistence::dataset::remote_dataset_repository_trait::{
    LoadOutcome, RemoteDatasetRepository,
};
use crate::core::persistence::dataset::run_record_entity::Dataset;
use crate::domain::aggregate::service::aggregate_service::aggregate;

/// Rebuilds the summary from the persisted dataset and publishes it.
///
/// Fails only when the summary could be written nowhere.
pub async fn run(state: AppState, now: DateTime<Utc>) -> Result<AggregateSummaryEntity> {
    debug!("Running aggregate task...");

    let dataset = load_dataset(&state).await;
    let summary = aggregate(&dataset, &state.config.regions);
    info!(
        records = dataset.len(),
        regions = summary.regions.len(),
        "Aggregated dataset"
    );

    let local = state.summary_fs.try_save(&summary);
    let remote = state
        .remote
        .save_summary(&state.config.summary_path, &summary, now)
        .await;

    if let LocalSaveOutcome::Failed(reason) = &local {
        if !remote.is_success() {
            return Err(anyhow!(
                "summary not persisted (local: {}, remote: {:?})",
                reason,
                remote
            ));
        }
    }

    Ok(summary)
}

async fn load_dataset(state: &AppState) -> Dataset {
    match state.remote.load(&state.config.dataset_path).await {
        LoadOutcome::Loaded(dataset) => return dataset,
        LoadOutcome::NotFound => {}
        LoadOutcome::Unavailable(reason) => {
            warn!(%reason, "Remote dataset unavailable; using local export");
        }
    }

    state.local.load_export().unwrap_or_else(|| {
        warn!("No dataset found; summary will be empty");
        Vec::new()
    })
}
