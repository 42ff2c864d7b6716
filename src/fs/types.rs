//! File Store Types
//!
//! Core types and traits for the virtual file store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File store errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FsError {
    #[error("EINVAL: invalid path '{path}'")]
    InvalidPath { path: String },

    #[error("ENOENT: source directory not found '{path}'")]
    SourceNotFound { path: String },

    #[error("EIO: {operation} failed for '{path}': {message}")]
    Io {
        path: String,
        operation: String,
        message: String,
    },

    #[error("corrupt snapshot: {message}")]
    CorruptSnapshot { message: String },
}

impl FsError {
    pub(crate) fn io(path: impl Into<String>, operation: &str, err: impl std::fmt::Display) -> Self {
        FsError::Io {
            path: path.into(),
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn corrupt(err: impl std::fmt::Display) -> Self {
        FsError::CorruptSnapshot { message: err.to_string() }
    }
}

/// File content as supplied by callers
#[derive(Debug, Clone)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FileContent::Text(s) => s.into_bytes(),
            FileContent::Binary(b) => b,
        }
    }
}

impl From<String> for FileContent {
    fn from(s: String) -> Self {
        FileContent::Text(s)
    }
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        FileContent::Text(s.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(v: Vec<u8>) -> Self {
        FileContent::Binary(v)
    }
}

impl From<&[u8]> for FileContent {
    fn from(v: &[u8]) -> Self {
        FileContent::Binary(v.to_vec())
    }
}

/// A stored file: immutable content plus metadata.
///
/// Updates replace the entry wholesale; the content buffer is shared, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(with = "content_base64")]
    content: Arc<[u8]>,
    modified: DateTime<Utc>,
}

impl FileEntry {
    /// Create an entry stamped with the current time.
    pub fn new(content: impl Into<FileContent>) -> Self {
        Self::with_modified(content, Utc::now())
    }

    /// Create an entry with an explicit modification time.
    pub fn with_modified(content: impl Into<FileContent>, modified: DateTime<Utc>) -> Self {
        Self {
            content: Arc::from(content.into().into_bytes()),
            modified,
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

mod content_base64 {
    use std::sync::Arc;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(content: &Arc<[u8]>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(content))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Arc<[u8]>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Arc::from)
            .map_err(serde::de::Error::custom)
    }
}

/// Path-addressed store of file entries.
///
/// Directories are never stored; they are implied by descendant paths.
/// Every single-key operation is atomic. Multi-key operations are not.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Look up the entry stored at `path`.
    async fn get(&self, path: &str) -> Result<Option<FileEntry>, FsError>;

    /// Insert or wholesale replace the entry at `path`.
    async fn set(&self, path: &str, entry: FileEntry) -> Result<(), FsError>;

    /// Remove the entry at `path`, returning whether it existed.
    async fn delete(&self, path: &str) -> Result<bool, FsError>;

    /// Check if an entry is stored at `path`. Invalid paths never exist.
    async fn exists(&self, path: &str) -> bool;

    /// All stored paths, in no particular order.
    async fn all_paths(&self) -> Vec<String>;

    /// Stored paths that literally start with `prefix` (no path-boundary check).
    async fn paths_by_prefix(&self, prefix: &str) -> Vec<String>;

    /// Immediate children of `directory`; deep descendants are excluded.
    async fn children(&self, directory: &str) -> Result<Vec<String>, FsError>;

    /// Number of stored entries.
    async fn count(&self) -> usize;

    /// Every (path, entry) pair, in no particular order.
    async fn get_all(&self) -> Vec<(String, FileEntry)>;

    /// Apply upserts in order. Not atomic as a batch.
    async fn set_many(&self, entries: Vec<(String, FileEntry)>) -> Result<(), FsError> {
        for (path, entry) in entries {
            self.set(&path, entry).await?;
        }
        Ok(())
    }

    /// Remove every entry.
    async fn clear(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_entry_accessors() {
        let entry = FileEntry::new("hello");
        assert_eq!(entry.content(), b"hello");
        assert_eq!(entry.text(), "hello");
        assert_eq!(entry.size(), 5);
    }

    #[test]
    fn test_file_entry_json_keeps_binary_content() {
        let modified = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let entry = FileEntry::with_modified(vec![0u8, 159, 146, 150, 255], modified);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"content\":\"AJ+Slv8=\""));
        let back: FileEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_file_entry_rejects_bad_base64() {
        let json = r#"{"content":"%%%","modified":"2024-05-01T12:30:00Z"}"#;
        assert!(serde_json::from_str::<FileEntry>(json).is_err());
    }

    #[test]
    fn test_file_content_conversions() {
        assert_eq!(FileContent::from("hi").into_bytes(), b"hi".to_vec());
        assert_eq!(FileContent::from(vec![1u8, 2]).into_bytes(), vec![1u8, 2]);
    }

    #[test]
    fn test_error_messages() {
        let err = FsError::InvalidPath { path: "".to_string() };
        assert_eq!(err.to_string(), "EINVAL: invalid path ''");
        let err = FsError::SourceNotFound { path: "/nope".to_string() };
        assert_eq!(err.to_string(), "ENOENT: source directory not found '/nope'");
    }
}
