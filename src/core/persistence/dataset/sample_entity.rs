use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One spot price observation for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleEntity {
    /// Region key (e.g. `eastus2`).
    pub region: String,
    /// Fetch instant (UTC).
    pub timestamp: DateTime<Utc>,
    pub retail_price: f64,
    pub unit_price: f64,
    pub currency_code: String,
    /// Display location reported by the pricing API.
    pub location: String,
    pub effective_start_date: String,
    pub meter_name: String,
    pub sku_name: String,
}
