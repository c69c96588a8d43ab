//! Contact form handling.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use thunai_types::contact::ContactSubmission;
use thunai_types::error::ContactError;

use crate::contact::repository::ContactRepository;

/// Validates and records contact form submissions.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Record one submission. All four fields are required; whitespace-only
    /// values count as empty.
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Uuid, ContactError> {
        let name = require("name", name)?;
        let email = require("email", email)?;
        let subject = require("subject", subject)?;
        let message = require("message", message)?;

        let submission = ContactSubmission {
            id: Uuid::now_v7(),
            name,
            email,
            subject,
            message,
            submitted_at: Utc::now(),
        };
        self.repo.save_submission(&submission).await?;
        info!(submission_id = %submission.id, "contact submission recorded");
        Ok(submission.id)
    }
}

fn require(field: &'static str, value: &str) -> Result<String, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use thunai_types::error::RepositoryError;

    #[derive(Default)]
    struct MemContacts {
        rows: Mutex<Vec<ContactSubmission>>,
    }

    impl ContactRepository for MemContacts {
        async fn save_submission(
            &self,
            submission: &ContactSubmission,
        ) -> Result<(), RepositoryError> {
            self.rows.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_valid_submission_recorded() {
        let svc = ContactService::new(MemContacts::default());
        let id = svc
            .submit("Priya", "priya@example.com", "Feedback", "Great tool!")
            .await
            .unwrap();

        let rows = svc.repo.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].name, "Priya");
    }

    #[tokio::test]
    async fn test_fields_trimmed() {
        let svc = ContactService::new(MemContacts::default());
        svc.submit("  Priya ", "priya@example.com", "Hi", "Body")
            .await
            .unwrap();
        assert_eq!(svc.repo.rows.lock().unwrap()[0].name, "Priya");
    }

    #[tokio::test]
    async fn test_blank_field_rejected() {
        let svc = ContactService::new(MemContacts::default());
        let err = svc
            .submit("Priya", "   ", "Hi", "Body")
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::MissingField("email")));
        assert!(svc.repo.rows.lock().unwrap().is_empty());
    }
}
