//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository/gateway/blob-store traits, but
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use thunai_core::chat::service::ChatService;
use thunai_core::contact::service::ContactService;
use thunai_core::domain::DomainRegistry;
use thunai_core::llm::InferenceGateway;
use thunai_core::upload::service::UploadService;
use thunai_core::user::service::UserService;
use thunai_infra::config::load_config;
use thunai_infra::llm::ollama::OllamaGateway;
use thunai_infra::sqlite::contact::SqliteContactRepository;
use thunai_infra::sqlite::conversation::SqliteConversationRepository;
use thunai_infra::sqlite::pool::DatabasePool;
use thunai_infra::sqlite::upload::SqliteUploadRepository;
use thunai_infra::sqlite::user::{SqliteTokenRepository, SqliteUserRepository};
use thunai_infra::storage::filesystem::LocalBlobStore;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteConversationRepository, OllamaGateway>;

pub type ConcreteUploadService =
    UploadService<SqliteUploadRepository, LocalBlobStore, SqliteConversationRepository>;

pub type ConcreteContactService = ContactService<SqliteContactRepository>;

pub type ConcreteUserService = UserService<SqliteUserRepository, SqliteTokenRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub upload_service: Arc<ConcreteUploadService>,
    pub contact_service: Arc<ConcreteContactService>,
    pub user_service: Arc<ConcreteUserService>,
    pub registry: Arc<DomainRegistry>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

/// Resolve the data directory from `THUNAI_DATA_DIR`, falling back to
/// `~/.thunai`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("THUNAI_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".thunai")
        }
    }
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("thunai.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let registry = Arc::new(DomainRegistry::with_defaults());

        let gateway = OllamaGateway::new(&config.backend_url, config.inference_timeout_secs)
            .map_err(|e| anyhow::anyhow!("failed to build inference gateway: {e}"))?;

        // Best-effort startup check: warn about catalog models the backend
        // does not serve. A dead backend is not fatal here; chat calls will
        // surface it per-request.
        match gateway.list_models().await {
            Ok(served) => {
                for (domain, model) in registry.missing_models(&served) {
                    tracing::warn!(domain, model, "catalog model not served by backend");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not list backend models at startup");
            }
        }

        let chat_service = ChatService::new(
            SqliteConversationRepository::new(db_pool.clone()),
            gateway,
            registry.clone(),
        );

        let upload_service = UploadService::new(
            SqliteUploadRepository::new(db_pool.clone()),
            LocalBlobStore::new(data_dir.clone()),
            SqliteConversationRepository::new(db_pool.clone()),
        );

        let contact_service = ContactService::new(SqliteContactRepository::new(db_pool.clone()));

        let user_service = UserService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqliteTokenRepository::new(db_pool.clone()),
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            upload_service: Arc::new(upload_service),
            contact_service: Arc::new(contact_service),
            user_service: Arc::new(user_service),
            registry,
            data_dir,
            db_pool,
        })
    }
}
