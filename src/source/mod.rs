//! File Source Module
//!
//! Producers of (relative path, content) pairs that populate a store:
//! - DirectorySource: a host directory tree
//! - EmbeddedSource: resources compiled into the binary
//! - InMemorySource: files built by the caller

pub mod types;
pub mod directory;
pub mod embedded;
pub mod in_memory;

pub use types::{FileData, FileIter, FileSource};
pub use directory::DirectorySource;
pub use embedded::{EmbeddedSource, ResourceNamespace, StaticResources};
pub use in_memory::InMemorySource;
