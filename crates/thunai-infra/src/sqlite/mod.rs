//! SQLite persistence: split-pool setup and repository implementations.

pub mod contact;
pub mod conversation;
pub mod pool;
pub mod upload;
pub mod user;

pub use contact::SqliteContactRepository;
pub use conversation::SqliteConversationRepository;
pub use pool::DatabasePool;
pub use upload::SqliteUploadRepository;
pub use user::{SqliteTokenRepository, SqliteUserRepository};

use chrono::{DateTime, Utc};
use thunai_types::error::RepositoryError;

/// Parse an RFC 3339 timestamp column into a UTC datetime.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Format a UTC datetime for storage.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
