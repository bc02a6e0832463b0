pub mod http_client;

// Retail prices API
pub mod pricing_client;
pub mod pricing_dto;

// Repository contents API
pub mod github_contents_client;
