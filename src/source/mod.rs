//! Detection source trait — the collaborator that supplies initial detections
//!
//! A source receives the metadata of a newly added file and returns the
//! seeds for its detections. Sources may be random, remote, or fixed; the
//! store assumes nothing about determinism or the number of seeds.

use crate::error::Result;
use crate::types::{DetectionSeed, FileMetadata};
use async_trait::async_trait;

pub mod mock;

/// Backend that produces the initial detections for a file
#[async_trait]
pub trait DetectionSource: Send + Sync {
    /// Generate detection seeds for a file
    ///
    /// An empty result is valid and yields a trivially protected document.
    async fn generate(&self, file: &FileMetadata) -> Result<Vec<DetectionSeed>>;

    /// Source name (e.g., "mock", "static")
    fn name(&self) -> &str;
}

/// Source that returns the same seeds for every file
#[derive(Debug, Clone, Default)]
pub struct StaticDetectionSource {
    seeds: Vec<DetectionSeed>,
}

impl StaticDetectionSource {
    pub fn new(seeds: Vec<DetectionSeed>) -> Self {
        Self { seeds }
    }

    pub fn seeds(&self) -> &[DetectionSeed] {
        &self.seeds
    }
}

#[async_trait]
impl DetectionSource for StaticDetectionSource {
    async fn generate(&self, _file: &FileMetadata) -> Result<Vec<DetectionSeed>> {
        Ok(self.seeds.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
