use serde::Deserialize;

/// Response envelope of the retail prices endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetailPricesResponse {
    #[serde(default)]
    pub items: Vec<RetailPriceItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailPriceItem {
    pub retail_price: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub effective_start_date: String,
    #[serde(default)]
    pub meter_name: String,
    #[serde(default)]
    pub sku_name: String,
}
