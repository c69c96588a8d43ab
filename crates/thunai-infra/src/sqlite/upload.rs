//! SQLite upload metadata repository implementation.

use sqlx::Row;
use thunai_core::upload::repository::UploadRepository;
use thunai_types::error::RepositoryError;
use thunai_types::upload::UploadedFile;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UploadRepository`.
pub struct SqliteUploadRepository {
    pool: DatabasePool,
}

impl SqliteUploadRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UploadedFileRow {
    id: String,
    user_id: String,
    conversation_id: Option<String>,
    original_filename: String,
    stored_name: String,
    file_type: String,
    uploaded_at: String,
}

impl UploadedFileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            conversation_id: row.try_get("conversation_id")?,
            original_filename: row.try_get("original_filename")?,
            stored_name: row.try_get("stored_name")?,
            file_type: row.try_get("file_type")?,
            uploaded_at: row.try_get("uploaded_at")?,
        })
    }

    fn into_file(self) -> Result<UploadedFile, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid file id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let conversation_id = self
            .conversation_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let uploaded_at = parse_datetime(&self.uploaded_at)?;

        Ok(UploadedFile {
            id,
            user_id,
            conversation_id,
            original_filename: self.original_filename,
            stored_name: self.stored_name,
            file_type: self.file_type,
            uploaded_at,
        })
    }
}

impl UploadRepository for SqliteUploadRepository {
    async fn save_file(&self, file: &UploadedFile) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO uploaded_files (id, user_id, conversation_id, original_filename, stored_name, file_type, uploaded_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(file.id.to_string())
        .bind(file.user_id.to_string())
        .bind(file.conversation_id.map(|id| id.to_string()))
        .bind(&file.original_filename)
        .bind(&file.stored_name)
        .bind(&file.file_type)
        .bind(format_datetime(&file.uploaded_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "stored name '{}' already exists",
                    file.stored_name
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn list_files(&self, user_id: &Uuid) -> Result<Vec<UploadedFile>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM uploaded_files WHERE user_id = ? ORDER BY uploaded_at DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut files = Vec::with_capacity(rows.len());
        for row in &rows {
            let file_row = UploadedFileRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            files.push(file_row.into_file()?);
        }

        Ok(files)
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

    async fn insert_user(pool: &DatabasePool) -> Uuid {
        let user_id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO users (id, username, email, credential, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(format!("user-{user_id}"))
        .bind(format!("{user_id}@example.com"))
        .bind("opaque")
        .bind(Utc::now().to_rfc3339())
        .execute(&pool.writer)
        .await
        .unwrap();
        user_id
    }

    fn make_file(user_id: Uuid, name: &str) -> UploadedFile {
        let id = Uuid::now_v7();
        UploadedFile {
            id,
            user_id,
            conversation_id: None,
            original_filename: name.to_string(),
            stored_name: format!("{user_id}_{id}_{name}"),
            file_type: "txt".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_and_list_files() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool.clone());
        let user_id = insert_user(&pool).await;

        repo.save_file(&make_file(user_id, "a.txt")).await.unwrap();
        repo.save_file(&make_file(user_id, "b.txt")).await.unwrap();

        let files = repo.list_files(&user_id).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.user_id == user_id));
    }

    #[tokio::test]
    async fn test_duplicate_stored_name_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool.clone());
        let user_id = insert_user(&pool).await;

        let file = make_file(user_id, "dup.txt");
        repo.save_file(&file).await.unwrap();

        let clash = UploadedFile {
            id: Uuid::now_v7(),
            ..file.clone()
        };
        let err = repo.save_file(&clash).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_scoped_to_user() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool.clone());
        let alice = insert_user(&pool).await;
        let bala = insert_user(&pool).await;

        repo.save_file(&make_file(alice, "alice.txt")).await.unwrap();
        repo.save_file(&make_file(bala, "bala.txt")).await.unwrap();

        let files = repo.list_files(&alice).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].original_filename, "alice.txt");
    }
}
