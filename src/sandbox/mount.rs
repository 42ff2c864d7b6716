//! Import / mount
//!
//! Copies every file a source produces into a store under a destination
//! prefix. There is no rollback: if the source fails part way, the files
//! already written stay in the store.

use tokio::sync::mpsc;

use crate::fs::path::join_path;
use crate::fs::{FileStore, FsError};
use crate::source::FileData;

use super::types::MountOptions;

/// Files read ahead of the store writes.
const READ_AHEAD: usize = 16;

/// Import `options.source` into `store` under `options.path`.
///
/// The source is enumerated on the blocking thread pool, since sources may
/// do synchronous host I/O. Returns the number of files written.
pub async fn import(store: &dyn FileStore, options: &MountOptions) -> Result<usize, FsError> {
    let (tx, rx) = mpsc::channel(READ_AHEAD);
    let source = options.source.clone();
    let reader = tokio::task::spawn_blocking(move || {
        for file in source.get_files() {
            let failed = file.is_err();
            // a closed channel means the writer gave up
            if tx.blocking_send(file).is_err() || failed {
                break;
            }
        }
    });

    let result = write_files(store, &options.path, rx).await;
    reader
        .await
        .map_err(|e| FsError::io(options.path.as_str(), "import", e))?;
    let written = result?;

    tracing::info!(
        source = %options.source.describe(),
        destination = %options.path,
        files = written,
        "mounted source"
    );
    Ok(written)
}

async fn write_files(
    store: &dyn FileStore,
    destination: &str,
    mut rx: mpsc::Receiver<Result<FileData, FsError>>,
) -> Result<usize, FsError> {
    let mut written = 0;
    while let Some(file) = rx.recv().await {
        let file = file?;
        let path = join_path(destination, &file.relative_path)?;
        tracing::debug!(path = %path, bytes = file.content.len(), "importing file");
        store.set(&path, file.into_entry()).await?;
        written += 1;
    }
    Ok(written)
}
