//! Preview handles — opaque references to renderable file contents
//!
//! A `PreviewProvider` turns an uploaded file into a key the view layer can
//! render (an object URL in a browser, a blob key in memory). Each key is
//! wrapped in a `PreviewHandle` owned by exactly one `Document`; dropping the
//! handle releases the key back to its provider.

use crate::error::{MaskError, Result};
use crate::types::SourceFile;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Backend that creates and releases preview keys
#[async_trait]
pub trait PreviewProvider: Send + Sync {
    /// Create a preview for a file, returning its opaque key
    async fn create(&self, file: &SourceFile) -> Result<String>;

    /// Release a key previously returned by `create`
    ///
    /// Called from `Drop`, so it must not block on async work. Releasing an
    /// unknown key is a no-op.
    fn release(&self, key: &str);

    /// Provider name (e.g., "memory")
    fn name(&self) -> &str;
}

/// Owned preview key; releases itself on drop
pub struct PreviewHandle {
    key: String,
    provider: Option<Arc<dyn PreviewProvider>>,
}

impl PreviewHandle {
    /// Wrap a key created by `provider`
    pub fn new(key: impl Into<String>, provider: Arc<dyn PreviewProvider>) -> Self {
        Self {
            key: key.into(),
            provider: Some(provider),
        }
    }

    /// A handle with no provider behind it; dropping it does nothing
    pub fn detached(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            provider: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("key", &self.key)
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            provider.release(&self.key);
            tracing::debug!(key = %self.key, provider = provider.name(), "Preview released");
        }
    }
}

/// In-memory preview provider
///
/// Keeps file contents under `blob:<uuid>` keys until released. Useful for
/// tests and single-process use.
#[derive(Default)]
pub struct MemoryPreviewProvider {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryPreviewProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of previews currently held
    pub fn live(&self) -> usize {
        match self.blobs.read() {
            Ok(blobs) => blobs.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Contents stored under a key
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let blobs = self.blobs.read().ok()?;
        blobs.get(key).cloned()
    }
}

#[async_trait]
impl PreviewProvider for MemoryPreviewProvider {
    async fn create(&self, file: &SourceFile) -> Result<String> {
        let key = format!("blob:{}", uuid::Uuid::new_v4());
        let mut blobs = self.blobs.write().map_err(|e| MaskError::Preview {
            name: file.metadata.name.clone(),
            reason: format!("Preview store lock poisoned: {}", e),
        })?;
        blobs.insert(key.clone(), file.contents.clone());
        Ok(key)
    }

    fn release(&self, key: &str) {
        match self.blobs.write() {
            Ok(mut blobs) => {
                blobs.remove(key);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to release preview");
            }
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_create_and_get() {
        let provider = MemoryPreviewProvider::new();
        let file = SourceFile::new("scan.png", "image/png", vec![1u8, 2, 3]);

        let key = provider.create(&file).await.unwrap();
        assert!(key.starts_with("blob:"));
        assert_eq!(provider.live(), 1);
        assert_eq!(provider.get(&key).unwrap().as_ref(), &[1u8, 2, 3]);
    }

    #[tokio::test]
    async fn test_handle_releases_on_drop() {
        let provider = Arc::new(MemoryPreviewProvider::new());
        let file = SourceFile::new("scan.png", "image/png", vec![0u8; 4]);

        let key = provider.create(&file).await.unwrap();
        let handle = PreviewHandle::new(key.clone(), provider.clone());
        assert_eq!(handle.key(), key);
        assert_eq!(provider.live(), 1);

        drop(handle);
        assert_eq!(provider.live(), 0);
        assert!(provider.get(&key).is_none());
    }

    #[test]
    fn test_release_unknown_key_is_noop() {
        let provider = MemoryPreviewProvider::new();
        provider.release("blob:missing");
        assert_eq!(provider.live(), 0);
    }

    #[test]
    fn test_detached_handle_debug() {
        let handle = PreviewHandle::detached("blob:x");
        let debug = format!("{:?}", handle);
        assert!(debug.contains("blob:x"));
        assert!(debug.contains("None"));
    }
}
