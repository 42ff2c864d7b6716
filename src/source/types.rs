//! File Source Types

use chrono::{DateTime, Utc};

use crate::fs::{FileEntry, FsError};

/// One file produced by a source.
///
/// `relative_path` is source-root-relative and `/`-separated, whatever the
/// origin's native naming looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct FileData {
    pub relative_path: String,
    pub content: Vec<u8>,
    /// Origin modification time, when the origin has one
    pub modified: Option<DateTime<Utc>>,
}

impl FileData {
    pub fn new(relative_path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content,
            modified: None,
        }
    }

    /// Build the stored entry, stamping the current time if the origin had none.
    pub fn into_entry(self) -> FileEntry {
        match self.modified {
            Some(modified) => FileEntry::with_modified(self.content, modified),
            None => FileEntry::new(self.content),
        }
    }
}

/// Lazy, finite sequence of files from a source.
pub type FileIter<'a> = Box<dyn Iterator<Item = Result<FileData, FsError>> + Send + 'a>;

/// A producer of (relative path, content) pairs.
///
/// Every implementation in this crate is restartable: each `get_files` call
/// walks the origin again from the start.
pub trait FileSource: Send + Sync {
    fn get_files(&self) -> FileIter<'_>;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;
}
