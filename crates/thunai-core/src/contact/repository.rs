//! ContactRepository trait definition.

use thunai_types::contact::ContactSubmission;
use thunai_types::error::RepositoryError;

/// Repository trait for contact form submissions. Append-only.
///
/// Implementations live in thunai-infra (e.g. `SqliteContactRepository`).
/// Uses native async fn in traits (RPITIT).
pub trait ContactRepository: Send + Sync {
    fn save_submission(
        &self,
        submission: &ContactSubmission,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
