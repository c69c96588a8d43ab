//! Uploaded-file metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted upload size: 16 MiB.
///
/// Enforced at the transport boundary and re-validated in the upload
/// service before anything is written.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Lowercased file extensions accepted by the upload manager.
/// Anything else is rejected before the blob store or database is touched.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "csv", "py", "js", "html", "css", "doc", "docx",
];

/// Metadata row for a stored upload. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Conversation this file is attached to, if any. Ownership of the
    /// conversation is verified before the row is written.
    pub conversation_id: Option<Uuid>,
    /// Filename as supplied by the client, unmodified.
    pub original_filename: String,
    /// Collision-free name the blob is stored under.
    pub stored_name: String,
    /// Normalized (lowercased) extension, a member of [`ALLOWED_EXTENSIONS`].
    pub file_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUpload {
    pub id: Uuid,
    pub stored_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_contents() {
        assert!(ALLOWED_EXTENSIONS.contains(&"pdf"));
        assert!(ALLOWED_EXTENSIONS.contains(&"docx"));
        assert!(!ALLOWED_EXTENSIONS.contains(&"exe"));
        // Allow-list entries are stored lowercased.
        assert!(ALLOWED_EXTENSIONS.iter().all(|e| e.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_max_upload_is_16_mib() {
        assert_eq!(MAX_UPLOAD_BYTES, 16_777_216);
    }
}
