use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::app_config::{ItemSelection, PricingQueryConfig};
use crate::core::config::region_config::RegionConfig;
use crate::core::persistence::dataset::sample_entity::SampleEntity;

use super::pricing_dto::{RetailPriceItem, RetailPricesResponse};

/// Why a region produced no sample this run. Never aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("pricing API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode pricing response: {0}")]
    Decode(String),

    #[error("no matching price items")]
    NoItems,

    #[error("{0} price items matched, expected exactly one")]
    Ambiguous(usize),

    #[error("negative retail price {0}")]
    InvalidPrice(f64),
}

/// Source of one price sample per region.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch(&self, region: &RegionConfig) -> Result<SampleEntity, FetchFailure>;
}

/// Client for the public retail prices API.
pub struct RetailPricesClient {
    client: Client,
    query: PricingQueryConfig,
    selection: ItemSelection,
}

impl RetailPricesClient {
    pub fn new(client: Client, query: PricingQueryConfig, selection: ItemSelection) -> Self {
        Self {
            client,
            query,
            selection,
        }
    }

    /// OData filter for the configured spot SKU in one region.
    pub fn build_filter(&self, region_key: &str) -> String {
        format!(
            "serviceName eq '{}' and productName eq '{}' and armRegionName eq '{}' and armSkuName eq '{}' and contains(skuName, 'Spot')",
            odata_literal(&self.query.service_name),
            odata_literal(&self.query.product_name),
            odata_literal(region_key),
            odata_literal(&self.query.sku_name),
        )
    }

    pub fn build_url(&self, region_key: &str) -> String {
        format!(
            "{}?api-version={}&$filter={}",
            self.query.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.query.api_version),
            urlencoding::encode(&self.build_filter(region_key)),
        )
    }

    fn select_item(&self, region_key: &str, items: Vec<RetailPriceItem>) -> Result<RetailPriceItem, FetchFailure> {
        let count = items.len();
        if count > 1 {
            match self.selection {
                ItemSelection::RequireUnique => return Err(FetchFailure::Ambiguous(count)),
                ItemSelection::First => {
                    warn!(region = %region_key, count, "Multiple price items matched; using the first");
                }
            }
        }

        items.into_iter().next().ok_or(FetchFailure::NoItems)
    }
}

#[async_trait]
impl PriceFetcher for RetailPricesClient {
    async fn fetch(&self, region: &RegionConfig) -> Result<SampleEntity, FetchFailure> {
        let url = self.build_url(&region.key);
        debug!(region = %region.key, %url, "Fetching spot price");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RetailPricesResponse = resp
            .json()
            .await
            .map_err(|e| FetchFailure::Decode(e.to_string()))?;

        let item = self.select_item(&region.key, parsed.items)?;
        if item.retail_price < 0.0 {
            return Err(FetchFailure::InvalidPrice(item.retail_price));
        }

        Ok(SampleEntity {
            region: region.key.clone(),
            timestamp: Utc::now(),
            retail_price: item.retail_price,
            unit_price: item.unit_price,
            currency_code: item.currency_code,
            location: item.location,
            effective_start_date: item.effective_start_date,
            meter_name: item.meter_name,
            sku_name: item.sku_name,
        })
    }
}

/// Single quotes are doubled inside OData string literals.
fn odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}
