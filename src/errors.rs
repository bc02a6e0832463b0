use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Dataset codec error: {0}")]
    Codec(String),
}

/// Helper for mapping any unknown error into a configuration error
pub fn config_error<E: ToString>(err: E) -> AppError {
    AppError::Configuration(err.to_string())
}
