//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP
//! handlers. Services are generic over repository/collaborator/filestore
//! traits, but AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use parley_core::chat::service::ChatService;
use parley_core::upload::service::UploadService;
use parley_infra::collab::{HttpBotResponder, HttpPdfIngestor};
use parley_infra::config::load_global_config;
use parley_infra::filesystem::{resolve_data_dir, resolve_upload_dir, LocalFileStore};
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::GlobalConfig;

use crate::http::browser::SessionKey;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, HttpBotResponder>;

pub type ConcreteUploadService = UploadService<HttpPdfIngestor, LocalFileStore>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub upload_service: Arc<ConcreteUploadService>,
    pub session_key: Arc<SessionKey>,
    pub config: GlobalConfig,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        // The cookie signing key lives in a file (session.key) so tokens
        // survive server restarts.
        let session_key = SessionKey::load_or_create(&data_dir)?;

        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool),
            HttpBotResponder::new(config.bot_endpoint.clone()),
        );

        let upload_dir = resolve_upload_dir(&data_dir, config.upload_dir.as_deref());
        tokio::fs::create_dir_all(&upload_dir).await?;
        let upload_service = UploadService::new(
            HttpPdfIngestor::new(config.pdf_endpoint.clone()),
            LocalFileStore::new(),
            upload_dir,
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            upload_service: Arc::new(upload_service),
            session_key: Arc::new(session_key),
            config,
        })
    }
}
