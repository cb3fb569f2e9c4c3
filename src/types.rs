//! Core document and detection types
//!
//! All serializable types use camelCase JSON for the view layer.

use crate::kind::PiiKind;
use crate::preview::PreviewHandle;
use crate::stats::DocumentProtection;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable metadata copied from an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Original file name
    pub name: String,

    /// MIME type (e.g. "application/pdf")
    pub media_type: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Last-modified time in Unix milliseconds
    pub last_modified: u64,
}

/// An uploaded file: metadata plus its raw contents
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub metadata: FileMetadata,
    pub contents: Bytes,
}

impl SourceFile {
    /// Create a file stamped with the current time
    ///
    /// The size is taken from `contents`.
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        contents: impl Into<Bytes>,
    ) -> Self {
        let contents = contents.into();
        Self {
            metadata: FileMetadata {
                name: name.into(),
                media_type: media_type.into(),
                size_bytes: contents.len() as u64,
                last_modified: now_millis(),
            },
            contents,
        }
    }

    /// Override the last-modified timestamp (Unix milliseconds)
    pub fn with_last_modified(mut self, millis: u64) -> Self {
        self.metadata.last_modified = millis;
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Normalized bounding box, each field a percentage of the page extent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Clamp every field into `[0, 100]`; NaN becomes 0
    pub fn clamped(self) -> Self {
        fn clamp(v: f64) -> f64 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 100.0)
            }
        }
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
            width: clamp(self.width),
            height: clamp(self.height),
        }
    }
}

/// A detection as produced by a `DetectionSource`, before it joins a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSeed {
    pub kind: PiiKind,
    pub text: String,
    pub region: Region,
    pub confidence: f64,
}

impl DetectionSeed {
    pub fn new(kind: PiiKind, text: impl Into<String>, region: Region, confidence: f64) -> Self {
        Self {
            kind,
            text: text.into(),
            region,
            confidence,
        }
    }

    /// True when `confidence` is a finite score in `[0, 1]`
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}

/// One identified PII span within a document
///
/// `masked` is the only field that changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Identifier, unique within the owning document (det-<uuid>)
    pub id: String,
    pub kind: PiiKind,
    pub text: String,
    pub region: Region,
    pub confidence: f64,
    pub masked: bool,
}

impl Detection {
    /// Create an unmasked detection from a seed
    pub fn from_seed(seed: DetectionSeed) -> Self {
        Self {
            id: format!("det-{}", uuid::Uuid::new_v4()),
            kind: seed.kind,
            text: seed.text,
            region: seed.region.clamped(),
            confidence: seed.confidence,
            masked: false,
        }
    }
}

/// An uploaded document under protection review
///
/// Owns its preview handle; dropping the document releases it.
/// Detections are only mutated through `DocumentCollection`.
#[derive(Debug)]
pub struct Document {
    /// Unique document identifier (doc-<uuid>)
    pub id: String,
    pub metadata: FileMetadata,
    preview: PreviewHandle,
    detections: Vec<Detection>,
}

impl Document {
    /// Create a document together with its full initial detection set
    pub fn new(metadata: FileMetadata, preview: PreviewHandle, seeds: Vec<DetectionSeed>) -> Self {
        Self {
            id: format!("doc-{}", uuid::Uuid::new_v4()),
            metadata,
            preview,
            detections: seeds.into_iter().map(Detection::from_seed).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn detection(&self, detection_id: &str) -> Option<&Detection> {
        self.detections.iter().find(|d| d.id == detection_id)
    }

    /// Masked/total counts, recomputed from the detection list
    pub fn protection(&self) -> DocumentProtection {
        DocumentProtection {
            masked: self.detections.iter().filter(|d| d.masked).count(),
            total: self.detections.len(),
        }
    }

    /// Size in kilobytes, rounded to the nearest whole KB
    pub fn size_kb(&self) -> u64 {
        let bytes = self.metadata.size_bytes;
        bytes / 1024 + u64::from(bytes % 1024 >= 512)
    }

    /// Last-modified time as a UTC timestamp
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.metadata.last_modified).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Flip one detection, returning its new state
    pub(crate) fn toggle(&mut self, detection_id: &str) -> Option<bool> {
        let detection = self.detections.iter_mut().find(|d| d.id == detection_id)?;
        detection.masked = !detection.masked;
        Some(detection.masked)
    }

    pub(crate) fn set_all_masked(&mut self, masked: bool) {
        for detection in &mut self.detections {
            detection.masked = masked;
        }
    }

    /// Owned copy for views
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            id: self.id.clone(),
            metadata: self.metadata.clone(),
            preview: self.preview.key().to_string(),
            detections: self.detections.clone(),
            protection: self.protection(),
        }
    }
}

/// Point-in-time copy of a document, taken under a single read
///
/// Snapshots are for rendering only; mutations always go back through
/// the store by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub id: String,
    #[serde(flatten)]
    pub metadata: FileMetadata,
    /// Opaque preview key (e.g. `blob:<uuid>`)
    pub preview: String,
    pub detections: Vec<Detection>,
    pub protection: DocumentProtection,
}

impl DocumentSnapshot {
    pub fn detection(&self, detection_id: &str) -> Option<&Detection> {
        self.detections.iter().find(|d| d.id == detection_id)
    }
}

/// Current time in Unix milliseconds
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
