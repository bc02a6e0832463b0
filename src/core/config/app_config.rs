use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use validator::Validate;

use crate::errors::{config_error, AppError};

use super::region_config::{default_regions, RegionConfig};

pub const DEFAULT_PRICING_URL: &str = "https://prices.azure.com/api/retail/prices";
pub const PRICING_API_VERSION: &str = "2023-01-01-preview";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// How to pick the price row when the filter matches more than one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSelection {
    /// Take the first item; extra matches are only logged.
    #[default]
    First,
    /// More than one match is a fetch failure.
    RequireUnique,
}

impl ItemSelection {
    pub fn as_code(&self) -> &'static str {
        match self {
            ItemSelection::First => "FIRST",
            ItemSelection::RequireUnique => "UNIQUE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "FIRST" => Some(ItemSelection::First),
            "UNIQUE" | "REQUIRE_UNIQUE" => Some(ItemSelection::RequireUnique),
            _ => None,
        }
    }
}

/// Fixed parameters of the retail pricing query.
#[derive(Debug, Clone, Validate)]
pub struct PricingQueryConfig {
    #[validate(url)]
    pub endpoint: String,
    pub api_version: String,
    #[validate(length(min = 1))]
    pub service_name: String,
    #[validate(length(min = 1))]
    pub product_name: String,
    #[validate(length(min = 1))]
    pub sku_name: String,
}

impl Default for PricingQueryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PRICING_URL.into(),
            api_version: PRICING_API_VERSION.into(),
            service_name: "Virtual Machines".into(),
            product_name: "Virtual Machines Dsv5 Series".into(),
            sku_name: "Standard_D2s_v5".into(),
        }
    }
}

/// Credentials and coordinates of the repository holding the dataset.
#[derive(Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub branch: String,
}

impl GithubConfig {
    /// Mask the token for safe display (keeps last 4 chars).
    pub fn masked_token(&self) -> String {
        let n = self.token.chars().count();
        if n <= 8 {
            "***".into()
        } else {
            let tail: String = self.token.chars().skip(n - 4).collect();
            format!("***{tail}")
        }
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.masked_token())
            .field("branch", &self.branch)
            .finish()
    }
}

/// Process configuration, built once in `main` and handed to every component.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1, message = "at least one region must be configured"))]
    pub regions: Vec<RegionConfig>,
    #[validate(nested)]
    pub pricing: PricingQueryConfig,
    /// `None` when owner, repo or token is missing; remote persistence is then a no-op.
    pub github: Option<GithubConfig>,
    #[validate(length(min = 1))]
    pub dataset_path: String,
    #[validate(length(min = 1))]
    pub summary_path: String,
    pub data_dir: PathBuf,
    pub request_delay: Duration,
    #[validate(range(min = 1, max = 300))]
    pub http_timeout_secs: u64,
    pub item_selection: ItemSelection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            pricing: PricingQueryConfig::default(),
            github: None,
            dataset_path: "data/spot-prices.json".into(),
            summary_path: "data/spot-summary.json".into(),
            data_dir: PathBuf::from("data"),
            request_delay: Duration::from_millis(1000),
            http_timeout_secs: 30,
            item_selection: ItemSelection::First,
        }
    }
}

impl AppConfig {
    /// Reads the process environment (after an optional `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = AppConfig::default();

        if let Some(v) = get("SPOTWATCH_REGIONS") {
            cfg.regions = RegionConfig::parse_list(&v);
        }
        if let Some(v) = get("SPOTWATCH_PRICING_URL") {
            cfg.pricing.endpoint = v;
        }
        if let Some(v) = get("SPOTWATCH_SERVICE") {
            cfg.pricing.service_name = v;
        }
        if let Some(v) = get("SPOTWATCH_PRODUCT") {
            cfg.pricing.product_name = v;
        }
        if let Some(v) = get("SPOTWATCH_SKU") {
            cfg.pricing.sku_name = v;
        }
        if let Some(v) = get("SPOTWATCH_DATASET_PATH") {
            cfg.dataset_path = v;
        }
        if let Some(v) = get("SPOTWATCH_SUMMARY_PATH") {
            cfg.summary_path = v;
        }
        if let Some(v) = get("SPOTWATCH_DATA_DIR") {
            cfg.data_dir = PathBuf::from(v);
        }
        if let Some(v) = get("SPOTWATCH_REQUEST_DELAY_MS") {
            let ms: u64 = v
                .parse()
                .map_err(|e| config_error(format!("SPOTWATCH_REQUEST_DELAY_MS: {e}")))?;
            cfg.request_delay = Duration::from_millis(ms);
        }
        if let Some(v) = get("SPOTWATCH_HTTP_TIMEOUT_SECS") {
            cfg.http_timeout_secs = v
                .parse()
                .map_err(|e| config_error(format!("SPOTWATCH_HTTP_TIMEOUT_SECS: {e}")))?;
        }
        if let Some(v) = get("SPOTWATCH_ITEM_SELECTION") {
            cfg.item_selection = ItemSelection::from_code(&v).ok_or_else(|| {
                config_error(format!("SPOTWATCH_ITEM_SELECTION: unknown policy '{v}'"))
            })?;
        }

        cfg.github = match (get("GITHUB_OWNER"), get("GITHUB_REPO"), get("GITHUB_TOKEN")) {
            (Some(owner), Some(repo), Some(token)) => Some(GithubConfig {
                api_url: get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API_URL.into()),
                owner,
                repo,
                token,
                branch: get("GITHUB_BRANCH").unwrap_or_else(|| "main".into()),
            }),
            _ => None,
        };

        cfg.validate().map_err(config_error)?;
        Ok(cfg)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Local copy of the latest run record.
    pub fn local_snapshot_path(&self) -> PathBuf {
        self.data_dir.join("latest.json")
    }

    /// Local export of the full dataset.
    pub fn local_dataset_path(&self) -> PathBuf {
        self.data_dir.join("spot-prices.json")
    }

    /// Local aggregate summary.
    pub fn local_summary_path(&self) -> PathBuf {
        self.data_dir.join("spot-summary.json")
    }
}
