use std::sync::Arc;

use crate::core::client::github_contents_client::GithubContentsClient;
use crate::core::client::http_client::build_http_client;
use crate::core::client::pricing_client::{PriceFetcher, RetailPricesClient};
use crate::core::config::app_config::AppConfig;
use crate::core::persistence::aggregate::aggregate_fs_adapter::AggregateFsAdapter;
use crate::core::persistence::dataset::github_dataset_repository::GithubDatasetRepository;
use crate::core::persistence::dataset::local_snapshot_fs_adapter::LocalSnapshotFsAdapter;
use crate::core::persistence::dataset::local_snapshot_repository_trait::LocalSnapshotRepository;
use crate::core::persistence::dataset::remote_dataset_repository_trait::RemoteDatasetRepository;
use crate::domain::acquisition::service::acquisition_service::AcquisitionService;
use crate::errors::AppError;

/// Everything a task needs, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fetcher: Arc<dyn PriceFetcher>,
    pub remote: Arc<dyn RemoteDatasetRepository>,
    pub local: Arc<dyn LocalSnapshotRepository>,
    pub summary_fs: Arc<AggregateFsAdapter>,
}

pub fn build_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let http = build_http_client(config.http_timeout())?;

    let fetcher = RetailPricesClient::new(http.clone(), config.pricing.clone(), config.item_selection);

    let remote = match config.github.clone() {
        Some(gh) => GithubDatasetRepository::new(GithubContentsClient::new(http, gh)),
        None => GithubDatasetRepository::disabled(),
    };

    let local = LocalSnapshotFsAdapter::new(config.local_snapshot_path(), config.local_dataset_path());
    let summary_fs = AggregateFsAdapter::new(config.local_summary_path());

    Ok(AppState {
        config: Arc::new(config),
        fetcher: Arc::new(fetcher),
        remote: Arc::new(remote),
        local: Arc::new(local),
        summary_fs: Arc::new(summary_fs),
    })
}

impl AppState {
    pub fn acquisition_service(&self) -> AcquisitionService {
        AcquisitionService::new(
            self.fetcher.clone(),
            self.remote.clone(),
            self.local.clone(),
            self.config.regions.clone(),
            self.config.dataset_path.clone(),
            self.config.request_delay,
        )
    }
}
