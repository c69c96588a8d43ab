//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `thunai-core` using sqlx with
//! split read/write pools: raw queries, private Row structs, RFC 3339
//! timestamp columns.

use sqlx::Row;
use thunai_core::chat::repository::ConversationRepository;
use thunai_types::chat::{Conversation, ConversationSummary, InputType, Message, MessageRole};
use thunai_types::error::RepositoryError;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: String,
    user_id: String,
    model: String,
    domain: String,
    title: Option<String>,
    created_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            model: row.try_get("model")?,
            domain: row.try_get("domain")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Conversation {
            id,
            user_id,
            model: self.model,
            domain: self.domain,
            title: self.title,
            created_at,
        })
    }
}

struct MessageRow {
    id: String,
    conversation_id: String,
    user_id: String,
    role: String,
    content: String,
    input_type: String,
    file_id: Option<String>,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            input_type: row.try_get("input_type")?,
            file_id: row.try_get("file_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let conversation_id = Uuid::parse_str(&self.conversation_id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let input_type: InputType = self
            .input_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let file_id = self
            .file_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid file_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Message {
            id,
            conversation_id,
            user_id,
            role,
            content: self.content,
            input_type,
            file_id,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn create_conversation(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO conversations (id, user_id, model, domain, title, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(conversation.id.to_string())
        .bind(conversation.user_id.to_string())
        .bind(&conversation.model)
        .bind(&conversation.domain)
        .bind(&conversation.title)
        .bind(format_datetime(&conversation.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_conversation(
        &self,
        conversation_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Conversation>, RepositoryError> {
        // Owner id is part of the WHERE clause: an unowned id behaves
        // exactly like an unknown one.
        let row = sqlx::query("SELECT * FROM conversations WHERE id = ? AND user_id = ?")
            .bind(conversation_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let conv_row = ConversationRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(conv_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn list_conversations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummary>, RepositoryError> {
        // LEFT JOIN keeps zero-message conversations in the listing.
        let rows = sqlx::query(
            r#"SELECT c.id, c.model, c.domain, c.title, c.created_at,
                      COUNT(m.id) AS message_count
               FROM conversations c
               LEFT JOIN messages m ON m.conversation_id = c.id
               WHERE c.user_id = ?
               GROUP BY c.id
               ORDER BY c.created_at DESC"#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let model: String = row
                .try_get("model")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let domain: String = row
                .try_get("domain")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let title: Option<String> = row
                .try_get("title")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let created_at: String = row
                .try_get("created_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let message_count: i64 = row
                .try_get("message_count")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            summaries.push(ConversationSummary {
                id: Uuid::parse_str(&id)
                    .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?,
                model,
                domain,
                title,
                created_at: parse_datetime(&created_at)?,
                message_count: message_count as u32,
            });
        }

        Ok(summaries)
    }

    async fn save_message(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, conversation_id, user_id, role, content, input_type, file_id, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.conversation_id.to_string())
        .bind(message.user_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(message.input_type.to_string())
        .bind(message.file_id.map(|id| id.to_string()))
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(
        &self,
        conversation_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Vec<Message>, RepositoryError> {
        // rowid breaks ties between same-timestamp writes, preserving
        // insertion order. The owner filter is part of the query so a
        // transcript read can never cross users, whatever the caller did.
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE conversation_id = ? AND user_id = ? \
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(conversation_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}
