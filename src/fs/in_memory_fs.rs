//! In-Memory File Store Implementation
//!
//! A flat path -> entry map guarded by a single async lock. There are no
//! directory entries: directory queries are answered by scanning keys.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::path::{child_prefix, is_child_of, normalize_path, normalize_prefix};
use super::types::*;

/// In-memory virtual file store.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    data: RwLock<HashMap<String, FileEntry>>,
}

impl InMemoryFileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn from_entries<I, P>(entries: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = (P, FileEntry)>,
        P: AsRef<str>,
    {
        let mut data = HashMap::new();
        for (path, entry) in entries {
            data.insert(normalize_path(path.as_ref())?, entry);
        }
        Ok(Self { data: RwLock::new(data) })
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn get(&self, path: &str) -> Result<Option<FileEntry>, FsError> {
        let normalized = normalize_path(path)?;
        let data = self.data.read().await;
        Ok(data.get(&normalized).cloned())
    }

    async fn set(&self, path: &str, entry: FileEntry) -> Result<(), FsError> {
        let normalized = normalize_path(path)?;
        let mut data = self.data.write().await;
        data.insert(normalized, entry);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<bool, FsError> {
        let normalized = normalize_path(path)?;
        let mut data = self.data.write().await;
        Ok(data.remove(&normalized).is_some())
    }

    async fn exists(&self, path: &str) -> bool {
        match normalize_path(path) {
            Ok(normalized) => self.data.read().await.contains_key(&normalized),
            Err(_) => false,
        }
    }

    async fn all_paths(&self) -> Vec<String> {
        let data = self.data.read().await;
        data.keys().cloned().collect()
    }

    async fn paths_by_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize_prefix(prefix);
        let data = self.data.read().await;
        data.keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect()
    }

    async fn children(&self, directory: &str) -> Result<Vec<String>, FsError> {
        let normalized = normalize_path(directory)?;
        let prefix = child_prefix(&normalized);
        let data = self.data.read().await;
        Ok(data.keys()
            .filter(|k| k.starts_with(&prefix) && is_child_of(k, &normalized))
            .cloned()
            .collect())
    }

    async fn count(&self) -> usize {
        self.data.read().await.len()
    }

    async fn get_all(&self) -> Vec<(String, FileEntry)> {
        let data = self.data.read().await;
        data.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    async fn clear(&self) {
        self.data.write().await.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
