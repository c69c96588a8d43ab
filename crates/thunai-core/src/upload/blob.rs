//! BlobStore trait definition.

/// Write-once store for upload payloads.
///
/// Implementations live in thunai-infra (e.g. `LocalBlobStore`). Uses
/// native async fn in traits (RPITIT). `put` must fail rather than
/// overwrite: storage names are generated to be unique, so a collision
/// means something is wrong.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `stored_name`. Fails if the name exists.
    fn put(
        &self,
        stored_name: &str,
        bytes: &[u8],
    ) -> impl std::future::Future<Output = std::io::Result<()>> + Send;
}
