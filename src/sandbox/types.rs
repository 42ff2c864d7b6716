use std::sync::Arc;

use crate::fs::SnapshotOptions;
use crate::source::FileSource;

/// Where to mount a source in the store.
#[derive(Clone)]
pub struct MountOptions {
    /// Destination path prefix; not checked against existing content
    pub path: String,
    pub source: Arc<dyn FileSource>,
}

impl MountOptions {
    pub fn new(path: impl Into<String>, source: impl FileSource + 'static) -> Self {
        Self {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

impl std::fmt::Debug for MountOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountOptions")
            .field("path", &self.path)
            .field("source", &self.source.describe())
            .finish()
    }
}

/// Options for creating a Sandbox.
#[derive(Debug, Default)]
pub struct SandboxOptions {
    /// Mounts applied in order at creation
    pub mounts: Vec<MountOptions>,
    pub snapshot: SnapshotOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;

    #[test]
    fn test_sandbox_options_default() {
        let opts = SandboxOptions::default();
        assert!(opts.mounts.is_empty());
        assert_eq!(opts.snapshot.compression_level, 6);
    }

    #[test]
    fn test_mount_options_debug_describes_source() {
        let source = InMemorySource::new().with_file("a.txt", "hi").unwrap();
        let mount = MountOptions::new("/skills/demo", source);
        let debug = format!("{:?}", mount);
        assert!(debug.contains("/skills/demo"));
        assert!(debug.contains("in-memory (1 files)"));
    }
}
