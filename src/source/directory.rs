//! Filesystem-tree source
//!
//! Reads a host directory recursively, depth first, in file name order.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::{DirEntry, WalkDir};

use crate::fs::FsError;

use super::types::{FileData, FileIter, FileSource};

/// Source rooted at a host directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Fails with `SourceNotFound` if `root` is not an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FsError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(FsError::SourceNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_entry(&self, entry: &DirEntry) -> Result<FileData, FsError> {
        let path = entry.path();
        let relative = relative_path(&self.root, path)
            .ok_or_else(|| FsError::InvalidPath { path: path.display().to_string() })?;
        let content = std::fs::read(path)
            .map_err(|e| FsError::io(path.display().to_string(), "read", e))?;
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);
        Ok(FileData {
            relative_path: relative,
            content,
            modified,
        })
    }
}

/// Join the components below `root` with `/`, regardless of host separator.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rest = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rest
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

impl FileSource for DirectorySource {
    fn get_files(&self) -> FileIter<'_> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        // the first error ends the walk
        let mut failed = false;
        Box::new(
            walker
                .filter_map(move |entry| match entry {
                    Ok(entry) if entry.file_type().is_file() => Some(self.read_entry(&entry)),
                    Ok(_) => None,
                    Err(e) => {
                        let path = e
                            .path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| self.root.display().to_string());
                        Some(Err(FsError::io(path, "walk", e)))
                    }
                })
                .map_while(move |item| {
                    if failed {
                        return None;
                    }
                    failed = item.is_err();
                    Some(item)
                }),
        )
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
