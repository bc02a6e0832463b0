use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::errors::AppError;

pub const USER_AGENT: &str = concat!("spotwatch/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client with a bounded per-request timeout.
pub fn build_http_client(timeout: Duration) -> Result<Client, AppError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::HttpClient(format!("Failed to build HTTP client: {e}")))?;

    debug!(?timeout, "HTTP client initialized");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(build_http_client(Duration::from_secs(30)).is_ok());
        assert!(USER_AGENT.starts_with("spotwatch/"));
    }
}
