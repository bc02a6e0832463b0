use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::core::client::pricing_client::PriceFetcher;
use crate::core::config::region_config::RegionConfig;
use crate::core::persistence::dataset::local_snapshot_repository_trait::LocalSnapshotRepository;
use crate::core::persistence::dataset::remote_dataset_repository_trait::{
    LoadOutcome, RemoteDatasetRepository,
};
use crate::core::persistence::dataset::run_record_entity::{Dataset, RunRecordEntity};
use crate::domain::acquisition::dto::run_report::{LoadSource, RunReport};

/// Fetch, merge and commit one run record.
pub struct AcquisitionService {
    fetcher: Arc<dyn PriceFetcher>,
    remote: Arc<dyn RemoteDatasetRepository>,
    local: Arc<dyn LocalSnapshotRepository>,
    regions: Vec<RegionConfig>,
    dataset_path: String,
    request_delay: Duration,
}

impl AcquisitionService {
    pub fn new(
        fetcher: Arc<dyn PriceFetcher>,
        remote: Arc<dyn RemoteDatasetRepository>,
        local: Arc<dyn LocalSnapshotRepository>,
        regions: Vec<RegionConfig>,
        dataset_path: String,
        request_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            remote,
            local,
            regions,
            dataset_path,
            request_delay,
        }
    }

    /// Appends exactly one run record to the dataset. Store failures are reported, not raised.
    pub async fn run(&self, now: DateTime<Utc>) -> RunReport {
        // --- Step 1: fetch every region in order ---
        let mut record = RunRecordEntity::new(now);
        let mut fetched = Vec::new();
        let mut failed = Vec::new();

        for (idx, region) in self.regions.iter().enumerate() {
            if idx > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            match self.fetcher.fetch(region).await {
                Ok(sample) => {
                    info!(
                        region = %region.key,
                        price = sample.retail_price,
                        currency = %sample.currency_code,
                        "✅ Fetched spot price"
                    );
                    fetched.push(region.key.clone());
                    record.insert(sample);
                }
                Err(e) => {
                    error!(region = %region.key, error = %e, "❌ Failed to fetch spot price");
                    failed.push((region.key.clone(), e));
                }
            }
        }

        // --- Step 2: prior dataset ---
        let (mut dataset, load_source) = self.load_prior().await;

        // --- Step 3: merge ---
        dataset.push(record.clone());
        debug!(records = dataset.len(), "Merged run record into dataset");

        // --- Step 4: local copies ---
        let local_snapshot = self.local.try_save(&record);
        let local_export = self.local.try_export(&dataset);

        // --- Step 5: remote commit ---
        let remote_save = self.remote.save(&self.dataset_path, &dataset, now).await;

        let report = RunReport {
            timestamp: now,
            fetched,
            failed,
            load_source,
            dataset_len: dataset.len(),
            local_snapshot,
            local_export,
            remote_save,
        };

        info!(
            fetched = report.fetched.len(),
            failed = report.failed.len(),
            source = ?report.load_source,
            records = report.dataset_len,
            local = ?report.local_snapshot,
            remote_saved = report.remote_save.is_success(),
            "Acquisition run finished"
        );

        report
    }

    async fn load_prior(&self) -> (Dataset, LoadSource) {
        match self.remote.load(&self.dataset_path).await {
            LoadOutcome::Loaded(dataset) if !dataset.is_empty() => {
                return (dataset, LoadSource::Remote);
            }
            LoadOutcome::Loaded(_) | LoadOutcome::NotFound => {}
            LoadOutcome::Unavailable(reason) => {
                warn!(%reason, "Remote dataset unavailable; trying local copies");
            }
        }

        if let Some(export) = self.local.load_export().filter(|d| !d.is_empty()) {
            info!(records = export.len(), "Seeding dataset from local export");
            return (export, LoadSource::LocalExport);
        }

        match self.local.load_last() {
            Some(last) => {
                info!(timestamp = %last.timestamp, "Seeding dataset from local snapshot");
                (vec![last], LoadSource::LocalSnapshot)
            }
            None => (Vec::new(), LoadSource::Empty),
        }
    }
}
