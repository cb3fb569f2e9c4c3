//! Error types for a3s-mask

use thiserror::Error;

/// Errors that can occur while managing documents
///
/// Lookups of unknown documents or detections are not errors; they
/// resolve to `None` or a no-op.
#[derive(Debug, Error)]
pub enum MaskError {
    /// Preview handle could not be acquired for a file
    #[error("Failed to create preview for '{name}': {reason}")]
    Preview {
        name: String,
        reason: String,
    },

    /// Detection source failed to produce seeds
    #[error("Detection source '{source_name}' failed for '{name}': {reason}")]
    Detection {
        source_name: String,
        name: String,
        reason: String,
    },

    /// File media type is not in the accepted list
    #[error("Unsupported media type '{media_type}' for '{name}'")]
    UnsupportedMediaType {
        name: String,
        media_type: String,
    },

    /// File exceeds the configured size limit
    #[error("File '{name}' is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        name: String,
        size: u64,
        limit: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for mask operations
pub type Result<T> = std::result::Result<T, MaskError>;
