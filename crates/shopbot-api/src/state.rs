//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the HTTP handlers
//! and CLI. Services are generic over the repository traits, but AppState
//! pins them to the SQLite implementations. Everything is constructed once
//! at startup over a shared pool; nothing reconnects per request.

use std::path::PathBuf;
use std::sync::Arc;

use shopbot_core::cart::service::CartService;
use shopbot_core::catalog::service::CatalogService;
use shopbot_core::chatbot::service::ChatbotService;
use shopbot_core::conversation::service::ConversationService;
use shopbot_infra::config::{load_config, resolve_data_dir};
use shopbot_infra::sqlite::cart::SqliteCartRepository;
use shopbot_infra::sqlite::catalog::SqliteCatalogRepository;
use shopbot_infra::sqlite::conversation::SqliteConversationRepository;
use shopbot_infra::sqlite::pool::DatabasePool;
use shopbot_types::config::ServerConfig;

/// Concrete type aliases for the service generics pinned to SQLite.
pub type ConcreteCatalogService = CatalogService<SqliteCatalogRepository>;
pub type ConcreteCartService = CartService<SqliteCartRepository, SqliteCatalogRepository>;
pub type ConcreteConversationService = ConversationService<SqliteConversationRepository>;
pub type ConcreteChatbotService = ChatbotService<SqliteCatalogRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<ConcreteCatalogService>,
    pub cart_service: Arc<ConcreteCartService>,
    pub conversation_service: Arc<ConcreteConversationService>,
    pub chatbot_service: Arc<ConcreteChatbotService>,
    pub config: ServerConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("shopbot.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        // Wire services; repositories are cheap handles over the shared pool.
        let catalog_service = CatalogService::new(SqliteCatalogRepository::new(db_pool.clone()));
        let cart_service = CartService::new(
            SqliteCartRepository::new(db_pool.clone()),
            SqliteCatalogRepository::new(db_pool.clone()),
        );
        let conversation_service =
            ConversationService::new(SqliteConversationRepository::new(db_pool.clone()));
        let chatbot_service = ChatbotService::new(SqliteCatalogRepository::new(db_pool.clone()));

        Ok(Self {
            catalog_service: Arc::new(catalog_service),
            cart_service: Arc::new(cart_service),
            conversation_service: Arc::new(conversation_service),
            chatbot_service: Arc::new(chatbot_service),
            config,
            data_dir,
            db_pool,
        })
    }
}
