//! Store and detection source configuration
//!
//! All configs deserialize from camelCase JSON and fall back to defaults
//! for missing fields.

use crate::error::{MaskError, Result};
use crate::kind::PiiKind;
use crate::types::FileMetadata;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Document store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Accepted MIME types; empty accepts everything
    pub accepted_media_types: Vec<String>,

    /// Maximum upload size in bytes (no limit when `None`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_bytes: Option<u64>,

    /// Number of documents returned by `recent()`
    pub recent_limit: usize,

    /// Settings for the mock detection source
    pub mock_source: MockSourceConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            accepted_media_types: vec![
                "application/pdf".to_string(),
                "image/jpeg".to_string(),
                "image/png".to_string(),
            ],
            max_file_bytes: None,
            recent_limit: 5,
            mock_source: MockSourceConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MaskError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "Store config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_file_bytes == Some(0) {
            return Err(MaskError::Config(
                "maxFileBytes must be greater than 0".to_string(),
            ));
        }
        self.mock_source.validate()
    }

    /// Check an upload against the accepted types and size limit
    pub fn check_upload(&self, file: &FileMetadata) -> Result<()> {
        if !self.accepted_media_types.is_empty()
            && !self
                .accepted_media_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&file.media_type))
        {
            return Err(MaskError::UnsupportedMediaType {
                name: file.name.clone(),
                media_type: file.media_type.clone(),
            });
        }

        if let Some(limit) = self.max_file_bytes {
            if file.size_bytes > limit {
                return Err(MaskError::FileTooLarge {
                    name: file.name.clone(),
                    size: file.size_bytes,
                    limit,
                });
            }
        }

        Ok(())
    }
}

/// Mock detection source configuration
///
/// The ranges are demo values, not guarantees about real detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MockSourceConfig {
    /// Minimum detections per document (inclusive)
    pub min_detections: usize,

    /// Maximum detections per document (inclusive)
    pub max_detections: usize,

    pub min_confidence: f64,
    pub max_confidence: f64,

    /// Kinds to draw from
    pub kinds: Vec<PiiKind>,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            min_detections: 3,
            max_detections: 7,
            min_confidence: 0.7,
            max_confidence: 1.0,
            kinds: vec![
                PiiKind::Aadhaar,
                PiiKind::Pan,
                PiiKind::Name,
                PiiKind::Address,
                PiiKind::Phone,
                PiiKind::Email,
                PiiKind::Account,
            ],
        }
    }
}

impl MockSourceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_detections > self.max_detections {
            return Err(MaskError::Config(format!(
                "minDetections ({}) exceeds maxDetections ({})",
                self.min_detections, self.max_detections
            )));
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.min_confidence)
            || !in_unit(self.max_confidence)
            || self.min_confidence > self.max_confidence
        {
            return Err(MaskError::Config(format!(
                "Confidence range [{}, {}] must lie within [0, 1]",
                self.min_confidence, self.max_confidence
            )));
        }
        if self.kinds.is_empty() && self.max_detections > 0 {
            return Err(MaskError::Config(
                "kinds cannot be empty when detections are generated".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file(media_type: &str, size: u64) -> FileMetadata {
        FileMetadata {
            name: "upload".to_string(),
            media_type: media_type.to_string(),
            size_bytes: size,
            last_modified: 0,
        }
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.accepted_media_types.len(), 3);
        assert!(config.max_file_bytes.is_none());
        assert_eq!(config.recent_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_check_upload_media_type() {
        let config = StoreConfig::default();
        assert!(config.check_upload(&file("application/pdf", 10)).is_ok());
        assert!(config.check_upload(&file("IMAGE/PNG", 10)).is_ok());

        let err = config.check_upload(&file("text/plain", 10)).unwrap_err();
        assert!(matches!(err, MaskError::UnsupportedMediaType { .. }));
    }

    #[test]
    fn test_check_upload_accepts_all_when_empty() {
        let config = StoreConfig {
            accepted_media_types: vec![],
            ..Default::default()
        };
        assert!(config.check_upload(&file("text/plain", 10)).is_ok());
    }

    #[test]
    fn test_check_upload_size_limit() {
        let config = StoreConfig {
            max_file_bytes: Some(100),
            ..Default::default()
        };
        assert!(config.check_upload(&file("image/png", 100)).is_ok());
        let err = config.check_upload(&file("image/png", 101)).unwrap_err();
        assert!(matches!(err, MaskError::FileTooLarge { size: 101, limit: 100, .. }));
    }

    #[test]
    fn test_from_json_partial() {
        let config = StoreConfig::from_json(r#"{"maxFileBytes": 1048576, "recentLimit": 3}"#).unwrap();
        assert_eq!(config.max_file_bytes, Some(1_048_576));
        assert_eq!(config.recent_limit, 3);
        assert_eq!(config.accepted_media_types.len(), 3);
        assert_eq!(config.mock_source.max_detections, 7);
    }

    #[test]
    fn test_from_json_invalid_range() {
        let err = StoreConfig::from_json(
            r#"{"mockSource": {"minDetections": 5, "maxDetections": 2}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MaskError::Config(_)));

        let err = StoreConfig::from_json(r#"{"mockSource": {"maxConfidence": 1.5}}"#).unwrap_err();
        assert!(matches!(err, MaskError::Config(_)));

        let err = StoreConfig::from_json(r#"{"maxFileBytes": 0}"#).unwrap_err();
        assert!(matches!(err, MaskError::Config(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = StoreConfig::from_json("{").unwrap_err();
        assert!(matches!(err, MaskError::Serialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"acceptedMediaTypes": ["image/png"]}}"#).unwrap();

        let config = StoreConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.accepted_media_types, vec!["image/png"]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = StoreConfig::from_file("/tmp/nonexistent-a3s-mask-config.json").unwrap_err();
        assert!(matches!(err, MaskError::Config(_)));
    }

    #[test]
    fn test_config_serialization() {
        let json = serde_json::to_string(&StoreConfig::default()).unwrap();
        assert!(json.contains("\"acceptedMediaTypes\""));
        assert!(json.contains("\"minConfidence\":0.7"));
        assert!(!json.contains("maxFileBytes"));
    }
}
