//! Contact-form submission type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-form inbound message from the public contact form.
///
/// Standalone and append-only: not linked to a user or conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_submission_serde() {
        let sub = ContactSubmission {
            id: Uuid::now_v7(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            subject: "Feedback".to_string(),
            message: "Great service".to_string(),
            submitted_at: Utc::now(),
        };
        let json = serde_json::to_string(&sub).unwrap();
        let parsed: ContactSubmission = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.subject, "Feedback");
    }
}
