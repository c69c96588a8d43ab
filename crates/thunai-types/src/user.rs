//! User identity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// The credential is opaque to this subsystem: hashing and verification
/// happen at the authentication boundary, we only store and return it.
/// Users are never deleted here and immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub credential: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_never_serialized() {
        let user = User {
            id: Uuid::now_v7(),
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            credential: "opaque-credential".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("opaque-credential"));
        assert!(json.contains("asha"));
    }
}
