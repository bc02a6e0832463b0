pub mod app_config;
pub mod region_config;
