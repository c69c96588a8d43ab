//! Configuration loader for Thunai.
//!
//! Reads `config.toml` from the data directory (`~/.thunai/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use thunai_types::config::AppConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).await;
        assert_eq!(config.backend_url, "http://localhost:11434");
        assert_eq!(config.inference_timeout_secs, 120);
    }

    #[tokio::test]
    async fn test_parses_full_config() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("config.toml"),
            "backend_url = \"http://gpu-box:11434\"\ninference_timeout_secs = 300\n",
        )
        .await
        .unwrap();

        let config = load_config(dir.path()).await;
        assert_eq!(config.backend_url, "http://gpu-box:11434");
        assert_eq!(config.inference_timeout_secs, 300);
    }

    #[tokio::test]
    async fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("config.toml"),
            "backend_url = \"http://gpu-box:11434\"\n",
        )
        .await
        .unwrap();

        let config = load_config(dir.path()).await;
        assert_eq!(config.backend_url, "http://gpu-box:11434");
        assert_eq!(config.inference_timeout_secs, 120);
    }

    #[tokio::test]
    async fn test_malformed_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.toml"), "backend_url = [nonsense")
            .await
            .unwrap();

        let config = load_config(dir.path()).await;
        assert_eq!(config.backend_url, "http://localhost:11434");
    }
}
