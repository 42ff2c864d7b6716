//! File Store Module
//!
//! The virtual, path-addressed file store backing a sandbox:
//! - path: pure path normalization and hierarchy helpers
//! - InMemoryFileStore: concurrent path -> entry map
//! - SnapshotCodec: whole-store save/restore as a compressed blob

pub mod types;
pub mod path;
pub mod in_memory_fs;
pub mod snapshot;

pub use types::*;
pub use in_memory_fs::InMemoryFileStore;
pub use snapshot::{SnapshotCodec, SnapshotOptions, SNAPSHOT_VERSION};
