use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use spotwatch_core::app_state::build_app_state;
use spotwatch_core::core::config::app_config::AppConfig;
use spotwatch_core::scheduler::tasks;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(writer)
        .try_init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "❌ Run aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    info!(
        regions = config.regions.len(),
        remote = config.github.is_some(),
        data_dir = ?config.data_dir,
        item_selection = config.item_selection.as_code(),
        "Configuration loaded"
    );

    let state = build_app_state(config)?;
    let now = Utc::now();

    match std::env::args().nth(1).as_deref() {
        Some("aggregate") => {
            let summary = tasks::aggregate::run(state, now).await?;
            info!(regions = summary.regions.len(), "✅ Aggregate task completed");
        }
        None | Some("collect") => {
            let report = tasks::collect::run(state, now).await?;
            info!(
                fetched = report.fetched.len(),
                records = report.dataset_len,
                "✅ Collect task completed"
            );
        }
        Some(other) => anyhow::bail!("unknown task '{other}' (expected 'collect' or 'aggregate')"),
    }

    Ok(())
}
