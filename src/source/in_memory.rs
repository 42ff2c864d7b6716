//! In-memory source
//!
//! Files supplied directly by the caller. Keys are normalized when added.

use std::collections::BTreeMap;

use crate::fs::path::normalize_relative;
use crate::fs::{FileContent, FsError};

use super::types::{FileData, FileIter, FileSource};

/// Source over a caller-built map of relative path -> content.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (path, content) pairs.
    pub fn from_files<I, K, V>(files: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FileContent>,
    {
        let mut source = Self::new();
        for (path, content) in files {
            source.add_file(path.as_ref(), content)?;
        }
        Ok(source)
    }

    /// Add or replace a file.
    pub fn add_file(&mut self, path: &str, content: impl Into<FileContent>) -> Result<&mut Self, FsError> {
        let key = normalize_relative(path)?;
        self.files.insert(key, content.into().into_bytes());
        Ok(self)
    }

    /// Builder-style `add_file`.
    pub fn with_file(mut self, path: &str, content: impl Into<FileContent>) -> Result<Self, FsError> {
        self.add_file(path, content)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSource for InMemorySource {
    fn get_files(&self) -> FileIter<'_> {
        Box::new(
            self.files
                .iter()
                .map(|(path, content)| Ok(FileData::new(path.clone(), content.clone()))),
        )
    }

    fn describe(&self) -> String {
        format!("in-memory ({} files)", self.files.len())
    }
}
