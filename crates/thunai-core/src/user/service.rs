//! User registration and token issuance.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use thunai_types::error::UserError;
use thunai_types::user::User;

use crate::user::repository::{TokenRepository, UserRepository};
use crate::user::token::{generate_token, hash_token};

/// Result of a successful registration: the account plus the one-time
/// plaintext token.
#[derive(Debug)]
pub struct Registration {
    pub user: User,
    pub token: String,
}

/// Registers users and issues their access tokens.
pub struct UserService<U: UserRepository, T: TokenRepository> {
    users: U,
    tokens: T,
}

impl<U: UserRepository, T: TokenRepository> UserService<U, T> {
    pub fn new(users: U, tokens: T) -> Self {
        Self { users, tokens }
    }

    /// Create an account and issue its access token. The plaintext token
    /// is returned exactly once; only its hash is stored.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        credential: &str,
    ) -> Result<Registration, UserError> {
        let username = require("username", username)?;
        let email = require("email", email)?;
        if credential.is_empty() {
            return Err(UserError::MissingField("credential"));
        }

        let user = User {
            id: Uuid::now_v7(),
            username,
            email,
            credential: credential.to_string(),
            created_at: Utc::now(),
        };
        self.users.create_user(&user).await?;

        let token = generate_token();
        self.tokens.insert_token(&user.id, &hash_token(&token)).await?;
        info!(user_id = %user.id, username = %user.username, "user registered");

        Ok(Registration { user, token })
    }

    /// Resolve a plaintext bearer token to the owning user id.
    pub async fn resolve_token(&self, token: &str) -> Result<Option<Uuid>, UserError> {
        Ok(self.tokens.find_user_by_token_hash(&hash_token(token)).await?)
    }

    pub async fn get_user(&self, user_id: &Uuid) -> Result<User, UserError> {
        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }
}

fn require(field: &'static str, value: &str) -> Result<String, UserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
