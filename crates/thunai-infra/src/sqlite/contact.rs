//! SQLite contact submission repository implementation.

use thunai_core::contact::repository::ContactRepository;
use thunai_types::contact::ContactSubmission;
use thunai_types::error::RepositoryError;

use super::format_datetime;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `ContactRepository`.
pub struct SqliteContactRepository {
    pool: DatabasePool,
}

impl SqliteContactRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for SqliteContactRepository {
    async fn save_submission(&self, submission: &ContactSubmission) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO contact_submissions (id, name, email, subject, message, submitted_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(submission.id.to_string())
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(format_datetime(&submission.submitted_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::Row;
    use uuid::Uuid;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_submission() {
        let pool = test_pool().await;
        let repo = SqliteContactRepository::new(pool.clone());

        let submission = ContactSubmission {
            id: Uuid::now_v7(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            subject: "Feedback".to_string(),
            message: "The agriculture answers were spot on.".to_string(),
            submitted_at: Utc::now(),
        };
        repo.save_submission(&submission).await.unwrap();

        let row = sqlx::query("SELECT name, subject FROM contact_submissions WHERE id = ?")
            .bind(submission.id.to_string())
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        let name: String = row.try_get("name").unwrap();
        let subject: String = row.try_get("subject").unwrap();
        assert_eq!(name, "Priya");
        assert_eq!(subject, "Feedback");
    }
}
