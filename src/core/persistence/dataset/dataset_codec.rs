use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::errors::AppError;

use super::run_record_entity::Dataset;

/// Pretty JSON bytes of the dataset, as stored in files and remote documents.
pub fn dataset_to_json(dataset: &Dataset) -> Result<Vec<u8>, AppError> {
    serde_json::to_vec_pretty(dataset).map_err(|e| AppError::Codec(e.to_string()))
}

pub fn dataset_from_json(bytes: &[u8]) -> Result<Dataset, AppError> {
    serde_json::from_slice(bytes).map_err(|e| AppError::Codec(e.to_string()))
}

/// Base64 body for the contents API.
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes contents API base64, which arrives wrapped at 60 columns.
pub fn decode_content(encoded: &str) -> Result<Vec<u8>, AppError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AppError::Codec(format!("invalid base64 content: {e}")))
}

pub fn encode_dataset(dataset: &Dataset) -> Result<String, AppError> {
    Ok(encode_content(&dataset_to_json(dataset)?))
}

pub fn decode_dataset(encoded: &str) -> Result<Dataset, AppError> {
    dataset_from_json(&decode_content(encoded)?)
}
