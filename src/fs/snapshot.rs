//! Snapshot Codec
//!
//! Saves and restores a whole store as one gzip-compressed JSON document.
//! Neither direction is atomic with respect to concurrent writers; callers
//! wanting a consistent point-in-time image must hold exclusive access.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use super::path::normalize_path;
use super::types::{FileEntry, FileStore, FsError};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Options for the snapshot codec.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// gzip level, 0-9
    pub compression_level: u32,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self { compression_level: 6 }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    files: BTreeMap<&'a str, &'a FileEntry>,
}

#[derive(Deserialize)]
struct SnapshotDocument {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    files: Option<BTreeMap<String, FileEntry>>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Serializes a store to a compressed blob and back.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCodec {
    options: SnapshotOptions,
}

impl SnapshotCodec {
    pub fn new(options: SnapshotOptions) -> Self {
        Self { options }
    }

    /// Capture every entry the store holds at call time.
    pub async fn serialize(&self, store: &dyn FileStore) -> Result<Vec<u8>, FsError> {
        let entries = store.get_all().await;
        let doc = SnapshotRef {
            version: SNAPSHOT_VERSION,
            files: entries.iter().map(|(p, e)| (p.as_str(), e)).collect(),
        };
        let json = serde_json::to_vec(&doc).map_err(|e| FsError::io("<snapshot>", "encode", e))?;

        let level = self.options.compression_level.min(9);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
        encoder.write_all(&json).map_err(|e| FsError::io("<snapshot>", "compress", e))?;
        let blob = encoder.finish().map_err(|e| FsError::io("<snapshot>", "compress", e))?;

        tracing::debug!(entries = entries.len(), bytes = blob.len(), "serialized snapshot");
        Ok(blob)
    }

    /// Replace the store's contents with the snapshot in `bytes`.
    ///
    /// The blob is fully decoded and validated before the store is touched,
    /// so a corrupt snapshot leaves the store as it was. A `null` payload or
    /// an empty file map is a no-op and returns `Ok(0)`.
    pub async fn deserialize(&self, store: &dyn FileStore, bytes: &[u8]) -> Result<usize, FsError> {
        let files = match decode(bytes)? {
            Some(files) if !files.is_empty() => files,
            _ => {
                tracing::warn!("snapshot holds no entries, leaving store unchanged");
                return Ok(0);
            }
        };

        let count = files.len();
        store.clear().await;
        store.set_many(files).await?;
        tracing::debug!(entries = count, "restored snapshot");
        Ok(count)
    }
}

fn decode(bytes: &[u8]) -> Result<Option<Vec<(String, FileEntry)>>, FsError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json).map_err(FsError::corrupt)?;

    let doc: Option<SnapshotDocument> = serde_json::from_slice(&json).map_err(FsError::corrupt)?;
    let Some(doc) = doc else {
        return Ok(None);
    };
    if doc.version > SNAPSHOT_VERSION {
        return Err(FsError::corrupt(format!(
            "unsupported snapshot version {} (newest known is {})",
            doc.version, SNAPSHOT_VERSION
        )));
    }
    let Some(files) = doc.files else {
        return Ok(None);
    };

    let mut entries = Vec::with_capacity(files.len());
    for (path, entry) in files {
        let normalized = normalize_path(&path).map_err(FsError::corrupt)?;
        entries.push((normalized, entry));
    }
    Ok(Some(entries))
}
