//! Application configuration.
//!
//! Deserialized from `{data_dir}/config.toml`; every field has a default so
//! a missing or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the inference backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Bound on a single inference call, in seconds. The gateway holds no
    /// store-level resource while waiting.
    #[serde(default = "default_inference_timeout_secs")]
    pub inference_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_inference_timeout_secs() -> u64 {
    120
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            inference_timeout_secs: default_inference_timeout_secs(),
        }
    }
}
