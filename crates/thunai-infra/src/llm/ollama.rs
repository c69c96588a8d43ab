//! OllamaGateway -- concrete [`InferenceGateway`] implementation for a
//! local Ollama server.
//!
//! Sends non-streaming chat requests to `/api/chat` and lists served
//! models via `/api/tags`. Transport failures are mapped onto the
//! `InferenceError` taxonomy so callers can distinguish a dead backend
//! from a missing model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use thunai_core::llm::InferenceGateway;
use thunai_types::llm::{InferenceError, MessageRole, PromptMessage};

/// Gateway to an Ollama model server.
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl OllamaGateway {
    /// Create a new gateway.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server address, e.g. `http://localhost:11434`
    /// * `timeout_secs` - Per-request timeout for generation calls
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| InferenceError::Backend(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            InferenceError::Unreachable(e.to_string())
        } else {
            InferenceError::Backend(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<PromptMessage>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagsModel>,
}

#[derive(Deserialize)]
struct TagsModel {
    name: String,
}

impl InferenceGateway for OllamaGateway {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, InferenceError> {
        let body = ChatRequest {
            model: model.to_string(),
            messages: vec![PromptMessage {
                role: MessageRole::User,
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                404 => InferenceError::ModelNotFound(model.to_string()),
                _ => InferenceError::Backend(format!("HTTP {status}: {error_body}")),
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            InferenceError::Deserialization(format!("failed to parse chat response: {e}"))
        })?;

        Ok(chat.message.content)
    }

    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Backend(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let tags: TagsResponse = response.json().await.map_err(|e| {
            InferenceError::Deserialization(format!("failed to parse tags response: {e}"))
        })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_format() {
        let body = ChatRequest {
            model: "codemium".to_string(),
            messages: vec![PromptMessage {
                role: MessageRole::User,
                content: "hello".to_string(),
            }],
            stream: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "codemium");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_chat_response_parses_extra_fields() {
        // Ollama sends timing fields alongside the message; they are ignored.
        let raw = r#"{
            "model": "codemium",
            "message": {"role": "assistant", "content": "hi there"},
            "done": true,
            "total_duration": 1234567
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.message.content, "hi there");
    }

    #[test]
    fn test_tags_response_parses() {
        let raw = r#"{"models": [{"name": "codemium", "size": 1}, {"name": "buddyllama"}]}"#;
        let parsed: TagsResponse = serde_json::from_str(raw).unwrap();
        let names: Vec<String> = parsed.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["codemium", "buddyllama"]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = OllamaGateway::new("http://localhost:11434/", 120).unwrap();
        assert_eq!(gateway.url("/api/chat"), "http://localhost:11434/api/chat");
    }
}
