use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::app_state::AppState;
use crate::domain::acquisition::dto::run_report::RunReport;

/// One acquisition pass. Expected failures end up in the report, not in `Err`.
pub async fn run(state: AppState, now: DateTime<Utc>) -> Result<RunReport> {
    debug!(regions = state.config.regions.len(), "Running collect task...");

    let report = state.acquisition_service().run(now).await;
    Ok(report)
}
