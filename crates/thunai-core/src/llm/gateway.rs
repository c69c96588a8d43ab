//! InferenceGateway trait definition.
//!
//! Synchronous adapter contract to the external model-serving backend:
//! one request, one complete response or a typed error. No streaming, no
//! built-in retry; the caller decides whether to retry.

use thunai_types::llm::InferenceError;

/// Gateway to the inference backend.
///
/// Implementations live in thunai-infra (e.g. `OllamaGateway`). Uses native
/// async fn in traits (RPITIT). The call must be bounded by a timeout and
/// must not hold any store-level resource while awaiting the backend.
pub trait InferenceGateway: Send + Sync {
    /// Submit a single-turn prompt to `model` and return the generated
    /// text. Never returns partial output: complete response or error.
    fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;

    /// List the model identifiers the backend can currently serve.
    /// Used to validate the domain catalog at startup.
    fn list_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, InferenceError>> + Send;
}
