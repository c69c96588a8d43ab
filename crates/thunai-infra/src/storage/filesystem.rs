//! Local filesystem blob store implementation.
//!
//! Implements the `BlobStore` trait from `thunai-core` with blobs stored
//! flat under `{base_dir}/uploads/`. Storage names arrive pre-sanitized
//! and globally unique, so there is no per-user directory layout.

use std::path::{Path, PathBuf};

use thunai_core::upload::blob::BlobStore;
use tokio::io::AsyncWriteExt;

/// Filesystem-backed blob store.
pub struct LocalBlobStore {
    base_dir: PathBuf,
}

impl LocalBlobStore {
    /// Create a blob store rooted at `base_dir`. Blobs live in
    /// `{base_dir}/uploads/`.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn uploads_dir(&self) -> PathBuf {
        self.base_dir.join("uploads")
    }

    fn blob_path(&self, stored_name: &str) -> PathBuf {
        // Storage names are generated sanitized; reject anything that
        // still looks like a path.
        debug_assert!(!stored_name.contains(std::path::MAIN_SEPARATOR));
        self.uploads_dir().join(Path::new(stored_name))
    }
}

impl BlobStore for LocalBlobStore {
    async fn put(&self, stored_name: &str, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(self.uploads_dir()).await?;

        // create_new refuses to overwrite an existing blob.
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.blob_path(stored_name))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }
}
