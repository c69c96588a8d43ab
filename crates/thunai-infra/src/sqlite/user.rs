//! SQLite user and access-token repository implementations.

use sqlx::Row;
use thunai_core::user::repository::{TokenRepository, UserRepository};
use thunai_types::error::RepositoryError;
use thunai_types::user::User;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: String,
    username: String,
    email: String,
    credential: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            credential: row.try_get("credential")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(User {
            id,
            username: self.username,
            email: self.email,
            credential: self.credential,
            created_at,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO users (id, username, email, credential, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.credential)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "username '{}' or email already exists",
                    user.username
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_user_by_id(&self, user_id: &Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }
}

/// SQLite-backed implementation of `TokenRepository`.
///
/// Touching a token on lookup updates `last_used_at`; lookups hit the
/// reader pool and the touch goes to the writer, best-effort.
pub struct SqliteTokenRepository {
    pool: DatabasePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl TokenRepository for SqliteTokenRepository {
    async fn insert_token(&self, user_id: &Uuid, token_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO access_tokens (id, user_id, token_hash, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(user_id.to_string())
        .bind(token_hash)
        .bind(format_datetime(&chrono::Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Uuid>, RepositoryError> {
        let row = sqlx::query("SELECT user_id FROM access_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let user_id = Uuid::parse_str(&user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;

        // Best-effort usage stamp; a failure here never fails the lookup.
        if let Err(e) = sqlx::query("UPDATE access_tokens SET last_used_at = ? WHERE token_hash = ?")
            .bind(format_datetime(&chrono::Utc::now()))
            .bind(token_hash)
            .execute(&self.pool.writer)
            .await
        {
            tracing::debug!(error = %e, "failed to stamp token usage");
        }

        Ok(Some(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_user(username: &str) -> User {
        User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            credential: "opaque-credential".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let user = make_user("priya");
        repo.create_user(&user).await.unwrap();

        let by_id = repo.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "priya");
        assert_eq!(by_id.email, "priya@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        repo.create_user(&make_user("priya")).await.unwrap();
        let mut dup = make_user("priya");
        dup.email = "other@example.com".to_string();
        let err = repo.create_user(&dup).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        repo.create_user(&make_user("priya")).await.unwrap();
        let mut dup = make_user("someone-else");
        dup.email = "priya@example.com".to_string();
        let err = repo.create_user(&dup).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);
        assert!(repo.get_user_by_id(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let pool = test_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let tokens = SqliteTokenRepository::new(pool);

        let user = make_user("priya");
        users.create_user(&user).await.unwrap();

        tokens.insert_token(&user.id, "a".repeat(64).as_str()).await.unwrap();

        let found = tokens
            .find_user_by_token_hash(&"a".repeat(64))
            .await
            .unwrap();
        assert_eq!(found, Some(user.id));

        let missing = tokens
            .find_user_by_token_hash(&"b".repeat(64))
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_token_cascades_with_user() {
        let pool = test_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let tokens = SqliteTokenRepository::new(pool.clone());

        let user = make_user("priya");
        users.create_user(&user).await.unwrap();
        tokens.insert_token(&user.id, "c".repeat(64).as_str()).await.unwrap();

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id.to_string())
            .execute(&pool.writer)
            .await
            .unwrap();

        let found = tokens.find_user_by_token_hash(&"c".repeat(64)).await.unwrap();
        assert_eq!(found, None);
    }
}
