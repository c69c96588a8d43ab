//! UploadRepository trait definition.

use thunai_types::error::RepositoryError;
use thunai_types::upload::UploadedFile;
use uuid::Uuid;

/// Repository trait for upload metadata. Rows are append-only.
///
/// Implementations live in thunai-infra (e.g. `SqliteUploadRepository`).
/// Uses native async fn in traits (RPITIT).
pub trait UploadRepository: Send + Sync {
    /// Insert a metadata row for a stored blob.
    fn save_file(
        &self,
        file: &UploadedFile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a user's uploads newest-first.
    fn list_files(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<UploadedFile>, RepositoryError>> + Send;
}
