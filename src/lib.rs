//! just-vfs - A virtual file store for sandboxed environments
//!
//! This library provides a path-addressed, in-memory file store with
//! directory-aware queries, pluggable sources to populate it, and
//! whole-store snapshots that can be saved and restored.

pub mod config;
pub mod fs;
pub mod sandbox;
pub mod source;

pub use fs::{FileContent, FileEntry, FileStore, FsError, InMemoryFileStore, SnapshotCodec, SnapshotOptions};
pub use sandbox::{import, MountOptions, Sandbox, SandboxOptions};
pub use source::{DirectorySource, EmbeddedSource, FileData, FileSource, InMemorySource, StaticResources};
