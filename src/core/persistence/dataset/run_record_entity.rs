use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sample_entity::SampleEntity;

/// Samples collected in one invocation. A region missing from `regions` failed that run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecordEntity {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub regions: BTreeMap<String, SampleEntity>,
}

impl RunRecordEntity {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            regions: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, sample: SampleEntity) {
        self.regions.insert(sample.region.clone(), sample);
    }
}

/// Append-only history of run records, in append order.
pub type Dataset = Vec<RunRecordEntity>;
