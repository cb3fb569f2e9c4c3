//! Protection aggregates derived from the document collection
//!
//! Nothing here is stored: every value is recomputed from the detection
//! lists it summarizes.

use crate::types::Document;
use serde::{Deserialize, Serialize};

/// Masked/total detection counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProtection {
    pub masked: usize,
    pub total: usize,
}

impl DocumentProtection {
    /// Fraction of detections masked; `None` for a document with no detections
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.masked as f64 / self.total as f64)
        }
    }

    /// True when every detection is masked (including 0 of 0)
    pub fn is_fully_protected(&self) -> bool {
        self.masked == self.total
    }

    pub fn status(&self) -> ProtectionStatus {
        if self.is_fully_protected() {
            ProtectionStatus::Protected
        } else if self.masked > 0 {
            ProtectionStatus::Partial
        } else {
            ProtectionStatus::Exposed
        }
    }
}

/// Per-document protection status shown in list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionStatus {
    /// All detections masked
    Protected,
    /// Some, but not all, detections masked
    Partial,
    /// No detections masked
    Exposed,
}

/// Overall grade for the dashboard protection rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionGrade {
    /// Rate >= 90%
    Good,
    /// Rate >= 60%
    Fair,
    Poor,
}

impl ProtectionGrade {
    pub fn from_rate(rate: u32) -> Self {
        match rate {
            90.. => Self::Good,
            60..=89 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Dashboard totals across all documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionStats {
    pub total_documents: usize,
    pub total_detections: usize,
    pub masked_detections: usize,
}

impl ProtectionStats {
    /// Sum over a set of documents
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        documents
            .into_iter()
            .fold(Self::default(), |mut stats, doc| {
                let protection = doc.protection();
                stats.total_documents += 1;
                stats.total_detections += protection.total;
                stats.masked_detections += protection.masked;
                stats
            })
    }

    /// Masked percentage rounded to the nearest integer; 0 with no detections
    pub fn protection_rate(&self) -> u32 {
        if self.total_detections == 0 {
            return 0;
        }
        let rate = self.masked_detections as f64 * 100.0 / self.total_detections as f64;
        rate.round() as u32
    }

    pub fn grade(&self) -> ProtectionGrade {
        ProtectionGrade::from_rate(self.protection_rate())
    }
}
