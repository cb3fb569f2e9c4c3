//! Async document store built on pluggable collaborators
//!
//! `DocumentStore` wraps a `DocumentCollection` with a detection source and a
//! preview provider. Collaborator calls run outside the lock; each mutation
//! commits under a single write guard, so readers see either the state before
//! an operation or the state after it.

use crate::collection::DocumentCollection;
use crate::config::StoreConfig;
use crate::error::{MaskError, Result};
use crate::preview::{MemoryPreviewProvider, PreviewHandle, PreviewProvider};
use crate::source::mock::MockDetectionSource;
use crate::source::DetectionSource;
use crate::stats::{DocumentProtection, ProtectionStats};
use crate::types::{Document, DocumentSnapshot, SourceFile};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Document store backed by a detection source and a preview provider
pub struct DocumentStore {
    config: StoreConfig,
    source: Box<dyn DetectionSource>,
    previews: Arc<dyn PreviewProvider>,
    collection: RwLock<DocumentCollection>,
}

impl DocumentStore {
    /// Create an empty store with the default config
    pub fn new(source: impl DetectionSource + 'static, previews: Arc<dyn PreviewProvider>) -> Self {
        Self::with_config(StoreConfig::default(), source, previews)
    }

    /// Create an empty store with an explicit config
    ///
    /// The config is used as given; call `StoreConfig::validate` first when
    /// it was not loaded through `StoreConfig::from_json`/`from_file`.
    pub fn with_config(
        config: StoreConfig,
        source: impl DetectionSource + 'static,
        previews: Arc<dyn PreviewProvider>,
    ) -> Self {
        Self {
            config,
            source: Box::new(source),
            previews,
            collection: RwLock::new(DocumentCollection::new()),
        }
    }

    /// Store with the mock detection source and in-memory previews
    pub fn in_memory(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let source = MockDetectionSource::new(config.mock_source.clone())?;
        Ok(Self::with_config(
            config,
            source,
            Arc::new(MemoryPreviewProvider::new()),
        ))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the detection source name
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Get the preview provider name
    pub fn preview_provider_name(&self) -> &str {
        self.previews.name()
    }

    /// Add a file and select it
    ///
    /// The preview and detections are obtained before the collection is
    /// touched. On any failure the store is unchanged and an acquired preview
    /// is released.
    pub async fn add_document(&self, file: SourceFile) -> Result<DocumentSnapshot> {
        if let Err(e) = self.config.check_upload(&file.metadata) {
            tracing::warn!(file = %file.name(), error = %e, "Upload rejected");
            return Err(e);
        }

        let key = self.previews.create(&file).await.map_err(|e| {
            tracing::warn!(
                file = %file.name(),
                provider = self.previews.name(),
                error = %e,
                "Preview creation failed"
            );
            e
        })?;
        let preview = PreviewHandle::new(key, Arc::clone(&self.previews));

        let seeds = self.source.generate(&file.metadata).await.map_err(|e| {
            tracing::warn!(
                file = %file.name(),
                source = self.source.name(),
                error = %e,
                "Detection failed"
            );
            match e {
                detection @ MaskError::Detection { .. } => detection,
                other => MaskError::Detection {
                    source_name: self.source.name().to_string(),
                    name: file.metadata.name.clone(),
                    reason: other.to_string(),
                },
            }
        })?;

        if let Some(seed) = seeds.iter().find(|s| !s.has_valid_confidence()) {
            tracing::warn!(
                file = %file.name(),
                source = self.source.name(),
                kind = %seed.kind,
                confidence = seed.confidence,
                "Detection rejected"
            );
            return Err(MaskError::Detection {
                source_name: self.source.name().to_string(),
                name: file.metadata.name.clone(),
                reason: format!(
                    "{} detection has confidence {} outside [0, 1]",
                    seed.kind, seed.confidence
                ),
            });
        }

        let document = Document::new(file.metadata, preview, seeds);
        let snapshot = {
            let mut collection = self.collection.write().await;
            collection.insert(document).snapshot()
        };

        tracing::info!(
            document = %snapshot.id,
            name = %snapshot.metadata.name,
            detections = snapshot.detections.len(),
            "Document added"
        );

        Ok(snapshot)
    }

    /// Select a document by id, or clear the selection
    ///
    /// Unknown ids clear the selection.
    pub async fn select(&self, document_id: Option<&str>) -> Option<DocumentSnapshot> {
        let mut collection = self.collection.write().await;
        let selected = collection.select(document_id).map(Document::snapshot);
        tracing::debug!(
            requested = ?document_id,
            selected = ?collection.current_id(),
            "Selection changed"
        );
        selected
    }

    /// Flip one detection in the selected document
    ///
    /// Returns the new `masked` value, or `None` if nothing changed.
    pub async fn toggle_mask(&self, detection_id: &str) -> Option<bool> {
        let mut collection = self.collection.write().await;
        let masked = collection.toggle_mask(detection_id);
        match masked {
            Some(masked) => tracing::debug!(
                document = ?collection.current_id(),
                detection = %detection_id,
                masked,
                "Detection toggled"
            ),
            None => tracing::debug!(
                document = ?collection.current_id(),
                detection = %detection_id,
                "Toggle ignored"
            ),
        }
        masked
    }

    /// Mask every detection in the selected document
    pub async fn mask_all(&self) -> Option<DocumentProtection> {
        let mut collection = self.collection.write().await;
        let protection = collection.mask_all();
        tracing::debug!(document = ?collection.current_id(), ?protection, "Mask all");
        protection
    }

    /// Unmask every detection in the selected document
    pub async fn unmask_all(&self) -> Option<DocumentProtection> {
        let mut collection = self.collection.write().await;
        let protection = collection.unmask_all();
        tracing::debug!(document = ?collection.current_id(), ?protection, "Unmask all");
        protection
    }

    /// Remove a document and release its preview
    ///
    /// Returns false for unknown ids.
    pub async fn remove(&self, document_id: &str) -> bool {
        let removed = {
            let mut collection = self.collection.write().await;
            collection.remove(document_id)
        };

        match removed {
            Some(document) => {
                tracing::info!(document = %document.id, name = %document.name(), "Document removed");
                true
            }
            None => false,
        }
    }

    /// Remove every document, returning how many were dropped
    pub async fn clear(&self) -> usize {
        let drained = {
            let mut collection = self.collection.write().await;
            collection.drain()
        };
        let count = drained.len();
        drop(drained);
        tracing::info!(count, "Documents cleared");
        count
    }

    /// The selected document
    pub async fn current(&self) -> Option<DocumentSnapshot> {
        let collection = self.collection.read().await;
        collection.current().map(Document::snapshot)
    }

    /// Id of the selected document
    pub async fn current_id(&self) -> Option<String> {
        let collection = self.collection.read().await;
        collection.current_id().map(str::to_string)
    }

    pub async fn document(&self, document_id: &str) -> Option<DocumentSnapshot> {
        let collection = self.collection.read().await;
        collection.get(document_id).map(Document::snapshot)
    }

    /// All documents in insertion order
    pub async fn documents(&self) -> Vec<DocumentSnapshot> {
        let collection = self.collection.read().await;
        collection.documents().iter().map(Document::snapshot).collect()
    }

    /// The first `recent_limit` documents
    pub async fn recent(&self) -> Vec<DocumentSnapshot> {
        let collection = self.collection.read().await;
        collection
            .recent(self.config.recent_limit)
            .iter()
            .map(Document::snapshot)
            .collect()
    }

    /// Dashboard totals
    pub async fn stats(&self) -> ProtectionStats {
        self.collection.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.collection.read().await.is_empty()
    }

    /// Run a read-only closure against the collection under one read guard
    pub async fn read<R>(&self, f: impl FnOnce(&DocumentCollection) -> R) -> R {
        let collection = self.collection.read().await;
        f(&collection)
    }
}
