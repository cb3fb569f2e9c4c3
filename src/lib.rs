//! # a3s-mask
//!
//! Document and PII detection state engine with reversible masking for the
//! A3S ecosystem.
//!
//! ## Overview
//!
//! `a3s-mask` keeps the documents a user has uploaded, the PII detections
//! found in each, and which document is currently selected. Detections are
//! toggled between masked and visible; list, preview, and dashboard views
//! read from the same store and never disagree about a detection's state.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_mask::{DocumentStore, SourceFile, StoreConfig};
//!
//! # async fn example() -> a3s_mask::Result<()> {
//! // Mock detections and in-memory previews
//! let store = DocumentStore::in_memory(StoreConfig::default())?;
//!
//! let doc = store
//!     .add_document(SourceFile::new("kyc.pdf", "application/pdf", vec![0u8; 1024]))
//!     .await?;
//!
//! // The new document is selected; mask everything in it
//! store.mask_all().await;
//!
//! let stats = store.stats().await;
//! println!("{}: {}% protected", doc.metadata.name, stats.protection_rate());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **DetectionSource** trait — supplies the initial detections for a file
//! - **PreviewProvider** trait — creates and releases opaque preview keys
//! - **DocumentCollection** — synchronous core; the cursor is an id resolved on read
//! - **DocumentStore** — async API that commits each mutation under one lock

pub mod collection;
pub mod config;
pub mod error;
pub mod kind;
pub mod preview;
pub mod source;
pub mod stats;
pub mod store;
pub mod types;

// Re-export core types
pub use collection::DocumentCollection;
pub use config::{MockSourceConfig, StoreConfig};
pub use error::{MaskError, Result};
pub use kind::{PiiKind, RiskLevel};
pub use preview::{MemoryPreviewProvider, PreviewHandle, PreviewProvider};
pub use source::mock::MockDetectionSource;
pub use source::{DetectionSource, StaticDetectionSource};
pub use stats::{DocumentProtection, ProtectionGrade, ProtectionStats, ProtectionStatus};
pub use store::DocumentStore;
pub use types::{
    Detection, DetectionSeed, Document, DocumentSnapshot, FileMetadata, Region, SourceFile,
};
