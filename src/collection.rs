//! Document collection with a selection cursor
//!
//! `DocumentCollection` is the synchronous core of the store. It owns every
//! `Document` and keeps the cursor as a document id, resolved against the
//! collection on each read. There is no second copy of the current document
//! to fall out of sync: masking changes made through the cursor are the
//! changes seen in the list.
//!
//! Invariant: when `current` is `Some(id)`, a document with that id exists.

use crate::stats::{DocumentProtection, ProtectionStats};
use crate::types::Document;

/// Owned documents plus the id of the selected one
#[derive(Debug, Default)]
pub struct DocumentCollection {
    documents: Vec<Document>,
    current: Option<String>,
}

impl DocumentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and select it
    pub fn insert(&mut self, document: Document) -> &Document {
        self.current = Some(document.id.clone());
        self.documents.push(document);
        &self.documents[self.documents.len() - 1]
    }

    /// Point the cursor at a document, or clear it
    ///
    /// Unknown ids clear the selection.
    pub fn select(&mut self, document_id: Option<&str>) -> Option<&Document> {
        self.current = document_id
            .filter(|id| self.position(id).is_some())
            .map(str::to_string);
        self.current()
    }

    /// The selected document, looked up in the collection
    pub fn current(&self) -> Option<&Document> {
        let id = self.current.as_deref()?;
        self.get(id)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn get(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    /// All documents in insertion order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The first `limit` documents in insertion order
    pub fn recent(&self, limit: usize) -> &[Document] {
        &self.documents[..limit.min(self.documents.len())]
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Flip one detection in the selected document
    ///
    /// Returns the new `masked` value, or `None` when nothing is selected or
    /// the detection is not in the selected document.
    pub fn toggle_mask(&mut self, detection_id: &str) -> Option<bool> {
        self.current_mut()?.toggle(detection_id)
    }

    /// Mask every detection in the selected document
    pub fn mask_all(&mut self) -> Option<DocumentProtection> {
        self.set_all_masked(true)
    }

    /// Unmask every detection in the selected document
    pub fn unmask_all(&mut self) -> Option<DocumentProtection> {
        self.set_all_masked(false)
    }

    /// Remove a document, clearing the cursor if it was selected
    ///
    /// The returned document still holds its preview handle; dropping it
    /// releases the preview.
    pub fn remove(&mut self, document_id: &str) -> Option<Document> {
        let index = self.position(document_id)?;
        if self.current.as_deref() == Some(document_id) {
            self.current = None;
        }
        Some(self.documents.remove(index))
    }

    /// Take every document out and clear the cursor
    ///
    /// Like `remove`, the returned documents still hold their previews until
    /// dropped.
    pub fn drain(&mut self) -> Vec<Document> {
        self.current = None;
        std::mem::take(&mut self.documents)
    }

    /// Totals across all documents
    pub fn stats(&self) -> ProtectionStats {
        ProtectionStats::from_documents(&self.documents)
    }

    /// Masked/total counts for one document
    pub fn protection(&self, document_id: &str) -> Option<DocumentProtection> {
        self.get(document_id).map(Document::protection)
    }

    fn set_all_masked(&mut self, masked: bool) -> Option<DocumentProtection> {
        let document = self.current_mut()?;
        document.set_all_masked(masked);
        Some(document.protection())
    }

    fn current_mut(&mut self) -> Option<&mut Document> {
        let id = self.current.as_deref()?;
        self.documents.iter_mut().find(|d| d.id == id)
    }

    fn position(&self, document_id: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.id == document_id)
    }
}
