use std::path::Path;
use std::sync::Arc;

use crate::fs::{FileStore, FsError, InMemoryFileStore, SnapshotCodec};

use super::mount::import;
use super::types::*;

/// A sandbox's file surface: one store plus mount and snapshot helpers.
pub struct Sandbox {
    store: Arc<InMemoryFileStore>,
    codec: SnapshotCodec,
}

impl Sandbox {
    /// Create a new Sandbox, applying the configured mounts in order.
    pub async fn create(opts: Option<SandboxOptions>) -> Result<Self, FsError> {
        let opts = opts.unwrap_or_default();
        let sandbox = Self {
            store: Arc::new(InMemoryFileStore::new()),
            codec: SnapshotCodec::new(opts.snapshot),
        };
        sandbox.mount_all(&opts.mounts).await?;
        Ok(sandbox)
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<dyn FileStore> {
        self.store.clone()
    }

    /// Mount a single source. Returns the number of files written.
    pub async fn mount(&self, mount: &MountOptions) -> Result<usize, FsError> {
        import(self.store.as_ref(), mount).await
    }

    /// Mount several sources in order, stopping at the first failure.
    pub async fn mount_all(&self, mounts: &[MountOptions]) -> Result<usize, FsError> {
        let mut total = 0;
        for mount in mounts {
            total += self.mount(mount).await?;
        }
        Ok(total)
    }

    /// Serialize the whole store.
    pub async fn snapshot(&self) -> Result<Vec<u8>, FsError> {
        self.codec.serialize(self.store.as_ref()).await
    }

    /// Replace the store's contents from a snapshot blob.
    pub async fn restore(&self, bytes: &[u8]) -> Result<usize, FsError> {
        self.codec.deserialize(self.store.as_ref(), bytes).await
    }

    /// Write a snapshot of the store to a host file.
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), FsError> {
        let blob = self.snapshot().await?;
        tokio::fs::write(path, &blob)
            .await
            .map_err(|e| FsError::io(path.display().to_string(), "write", e))?;
        tracing::info!(path = %path.display(), bytes = blob.len(), "saved snapshot");
        Ok(())
    }

    /// Restore the store from a snapshot file written by `save_snapshot`.
    pub async fn load_snapshot(&self, path: &Path) -> Result<usize, FsError> {
        let blob = tokio::fs::read(path)
            .await
            .map_err(|e| FsError::io(path.display().to_string(), "read", e))?;
        let restored = self.restore(&blob).await?;
        tracing::info!(path = %path.display(), entries = restored, "loaded snapshot");
        Ok(restored)
    }
}
