//! UserRepository and TokenRepository trait definitions.

use thunai_types::error::RepositoryError;
use thunai_types::user::User;
use uuid::Uuid;

/// Repository trait for user accounts.
///
/// Implementations live in thunai-infra (e.g. `SqliteUserRepository`).
/// Uses native async fn in traits (RPITIT).
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Returns `RepositoryError::Conflict` when the
    /// username or email is already taken.
    fn create_user(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn get_user_by_id(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}

/// Repository trait for access tokens.
///
/// Only the SHA-256 hash of a token ever reaches this seam; the plaintext
/// is handed to the client once at issue time and never stored.
pub trait TokenRepository: Send + Sync {
    fn insert_token(
        &self,
        user_id: &Uuid,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Resolve a token hash to the owning user id, if the token exists.
    fn find_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<Uuid>, RepositoryError>> + Send;
}
