use serde::{Deserialize, Serialize};

/// A queried deployment location: stable key plus the name shown in summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub key: String,
    pub display_name: String,
}

impl RegionConfig {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }

    /// Parses `key` or `key=Display Name`. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.split_once('=') {
            Some((key, name)) => {
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                let name = name.trim();
                Some(Self::new(key, if name.is_empty() { key } else { name }))
            }
            None => Some(Self::new(raw, raw)),
        }
    }

    /// Comma separated list, order preserved.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::parse).collect()
    }
}

pub fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig::new("eastus", "East US"),
        RegionConfig::new("eastus2", "East US 2"),
        RegionConfig::new("westus2", "West US 2"),
        RegionConfig::new("northeurope", "North Europe"),
        RegionConfig::new("westeurope", "West Europe"),
        RegionConfig::new("southeastasia", "Southeast Asia"),
    ]
}
