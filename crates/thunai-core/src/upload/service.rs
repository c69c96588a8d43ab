//! Upload service: validation, naming, and two-phase persistence.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use thunai_types::error::UploadError;
use thunai_types::upload::{StoredUpload, UploadedFile, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};

use crate::chat::repository::ConversationRepository;
use crate::upload::blob::BlobStore;
use crate::upload::filename::{extension, sanitize};
use crate::upload::repository::UploadRepository;

/// Validates and stores uploaded files.
///
/// Validation runs in a fixed order before anything is written: presence,
/// extension allow-list, size, then conversation ownership. The blob is
/// written before the metadata row, so a crash between the two leaves an
/// orphaned blob but never a metadata row pointing at nothing.
pub struct UploadService<R: UploadRepository, B: BlobStore, C: ConversationRepository> {
    repo: R,
    blobs: B,
    conversations: C,
}

impl<R: UploadRepository, B: BlobStore, C: ConversationRepository> UploadService<R, B, C> {
    pub fn new(repo: R, blobs: B, conversations: C) -> Self {
        Self {
            repo,
            blobs,
            conversations,
        }
    }

    /// Store one upload for `user_id`, optionally attached to a
    /// conversation the user owns.
    pub async fn store_upload(
        &self,
        user_id: Uuid,
        conversation_id: Option<Uuid>,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        if original_filename.is_empty() {
            return Err(UploadError::NoFileProvided);
        }

        let file_type = match extension(original_filename) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => ext,
            Some(ext) => return Err(UploadError::InvalidFileType(ext)),
            None => return Err(UploadError::InvalidFileType(String::new())),
        };

        let actual = bytes.len() as u64;
        if actual > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                limit: MAX_UPLOAD_BYTES,
                actual,
            });
        }

        if let Some(id) = conversation_id {
            self.conversations
                .get_conversation(&id, &user_id)
                .await?
                .ok_or(UploadError::ConversationNotFound)?;
        }

        let file_id = Uuid::now_v7();
        let stored_name = format!("{}_{}_{}", user_id, file_id, sanitize(original_filename));

        self.blobs
            .put(&stored_name, bytes)
            .await
            .map_err(|e| UploadError::Blob(e.to_string()))?;

        let file = UploadedFile {
            id: file_id,
            user_id,
            conversation_id,
            original_filename: original_filename.to_string(),
            stored_name: stored_name.clone(),
            file_type,
            uploaded_at: Utc::now(),
        };
        self.repo.save_file(&file).await?;
        info!(file_id = %file_id, stored_name, "file stored");

        Ok(StoredUpload {
            id: file_id,
            stored_name,
        })
    }

    /// List a user's uploads newest-first.
    pub async fn list_uploads(&self, user_id: Uuid) -> Result<Vec<UploadedFile>, UploadError> {
        Ok(self.repo.list_files(&user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use thunai_types::chat::{Conversation, ConversationSummary, Message};
    use thunai_types::error::RepositoryError;

    #[derive(Default)]
    struct MemUploads {
        files: Mutex<Vec<UploadedFile>>,
    }

    impl UploadRepository for MemUploads {
        async fn save_file(&self, file: &UploadedFile) -> Result<(), RepositoryError> {
            self.files.lock().unwrap().push(file.clone());
            Ok(())
        }

        async fn list_files(&self, user_id: &Uuid) -> Result<Vec<UploadedFile>, RepositoryError> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.user_id == *user_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MemBlobs {
        blobs: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl BlobStore for MemBlobs {
        async fn put(&self, stored_name: &str, bytes: &[u8]) -> io::Result<()> {
            let mut blobs = self.blobs.lock().unwrap();
            if blobs.iter().any(|(name, _)| name == stored_name) {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, stored_name));
            }
            blobs.push((stored_name.to_string(), bytes.to_vec()));
            Ok(())
        }
    }

    /// Conversation store holding a fixed set of rows.
    struct FixedConversations {
        rows: Vec<Conversation>,
    }

    impl ConversationRepository for FixedConversations {
        async fn create_conversation(&self, _c: &Conversation) -> Result<(), RepositoryError> {
            unreachable!("uploads never create conversations")
        }

        async fn get_conversation(
            &self,
            conversation_id: &Uuid,
            user_id: &Uuid,
        ) -> Result<Option<Conversation>, RepositoryError> {
            Ok(self
                .rows
                .iter()
                .find(|c| c.id == *conversation_id && c.user_id == *user_id)
                .cloned())
        }

        async fn list_conversations(
            &self,
            _user_id: &Uuid,
        ) -> Result<Vec<ConversationSummary>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn save_message(&self, _m: &Message) -> Result<(), RepositoryError> {
            unreachable!("uploads never save messages")
        }

        async fn get_messages(
            &self,
            _id: &Uuid,
            _user_id: &Uuid,
        ) -> Result<Vec<Message>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn conversation(user_id: Uuid) -> Conversation {
        Conversation {
            id: Uuid::now_v7(),
            user_id,
            model: "codemium".to_string(),
            domain: "coding".to_string(),
            title: None,
            created_at: Utc::now(),
        }
    }

    fn service(rows: Vec<Conversation>) -> UploadService<MemUploads, MemBlobs, FixedConversations> {
        UploadService::new(
            MemUploads::default(),
            MemBlobs::default(),
            FixedConversations { rows },
        )
    }

    #[tokio::test]
    async fn test_pdf_upload_stored() {
        let svc = service(Vec::new());
        let user = Uuid::now_v7();

        let stored = svc
            .store_upload(user, None, "report.pdf", b"%PDF-1.4")
            .await
            .unwrap();

        assert!(stored.stored_name.starts_with(&user.to_string()));
        assert!(stored.stored_name.ends_with("_report.pdf"));

        let files = svc.list_uploads(user).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_type, "pdf");
        assert_eq!(files[0].original_filename, "report.pdf");

        let blobs = svc.blobs.blobs.lock().unwrap();
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].1, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_exe_upload_rejected_before_storage() {
        let svc = service(Vec::new());
        let err = svc
            .store_upload(Uuid::now_v7(), None, "report.exe", b"MZ")
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::InvalidFileType(ext) if ext == "exe"));
        assert!(svc.blobs.blobs.lock().unwrap().is_empty());
        assert!(svc.repo.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uppercase_extension_normalized() {
        let svc = service(Vec::new());
        let user = Uuid::now_v7();
        svc.store_upload(user, None, "PHOTO.JPG", b"\xff\xd8")
            .await
            .unwrap();

        let files = svc.list_uploads(user).await.unwrap();
        assert_eq!(files[0].file_type, "jpg");
    }

    #[tokio::test]
    async fn test_missing_extension_rejected() {
        let svc = service(Vec::new());
        let err = svc
            .store_upload(Uuid::now_v7(), None, "README", b"hello")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType(_)));
    }

    #[tokio::test]
    async fn test_empty_filename_is_no_file() {
        let svc = service(Vec::new());
        let err = svc
            .store_upload(Uuid::now_v7(), None, "", b"data")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::NoFileProvided));
    }

    #[tokio::test]
    async fn test_oversize_rejected() {
        let svc = service(Vec::new());
        let bytes = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
        let err = svc
            .store_upload(Uuid::now_v7(), None, "big.csv", &bytes)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::TooLarge { limit, actual }
                if limit == MAX_UPLOAD_BYTES && actual == MAX_UPLOAD_BYTES + 1
        ));
        assert!(svc.blobs.blobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_attach_to_owned_conversation() {
        let user = Uuid::now_v7();
        let conv = conversation(user);
        let conv_id = conv.id;
        let svc = service(vec![conv]);

        svc.store_upload(user, Some(conv_id), "notes.txt", b"hi")
            .await
            .unwrap();

        let files = svc.list_uploads(user).await.unwrap();
        assert_eq!(files[0].conversation_id, Some(conv_id));
    }

    #[tokio::test]
    async fn test_attach_to_foreign_conversation_is_not_found() {
        let owner = Uuid::now_v7();
        let intruder = Uuid::now_v7();
        let conv = conversation(owner);
        let conv_id = conv.id;
        let svc = service(vec![conv]);

        let err = svc
            .store_upload(intruder, Some(conv_id), "notes.txt", b"hi")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::ConversationNotFound));
        assert!(svc.blobs.blobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_filename_twice_gets_distinct_names() {
        let svc = service(Vec::new());
        let user = Uuid::now_v7();

        let first = svc
            .store_upload(user, None, "report.pdf", b"v1")
            .await
            .unwrap();
        let second = svc
            .store_upload(user, None, "report.pdf", b"v2")
            .await
            .unwrap();

        assert_ne!(first.stored_name, second.stored_name);
        assert_eq!(svc.blobs.blobs.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_traversal_filename_sanitized() {
        let svc = service(Vec::new());
        let user = Uuid::now_v7();

        let stored = svc
            .store_upload(user, None, "../../etc/evil.txt", b"x")
            .await
            .unwrap();
        assert!(!stored.stored_name.contains('/'));
        assert!(stored.stored_name.ends_with("_.._.._etc_evil.txt"));

        // The original name is preserved untouched in metadata.
        let files = svc.list_uploads(user).await.unwrap();
        assert_eq!(files[0].original_filename, "../../etc/evil.txt");
    }
}
