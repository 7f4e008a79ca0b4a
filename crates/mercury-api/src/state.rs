//! Application state wiring the core to its concrete backends.
//!
//! The dispatcher is generic over the storage/generator/delivery ports;
//! AppState pins it to the infra implementations used in production.

use std::sync::Arc;

use mercury_core::conversation::dispatcher::Dispatcher;
use mercury_infra::config::Config;
use mercury_infra::llm::anthropic::AnthropicGenerator;
use mercury_infra::sqlite::history::SqliteHistoryStore;
use mercury_infra::sqlite::pool::DatabasePool;
use mercury_infra::whatsapp::WhatsAppClient;

/// The dispatcher pinned to the production backends.
pub type ConcreteDispatcher = Dispatcher<SqliteHistoryStore, AnthropicGenerator, WhatsAppClient>;

/// Shared application state used by the CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ConcreteDispatcher>,
    pub verify_token: Arc<str>,
}

impl AppState {
    /// Initialize the application state: open the database, wire backends.
    pub async fn init(config: Config) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let db_pool = DatabasePool::new(&config.database_url()).await?;
        let store = Arc::new(SqliteHistoryStore::new(db_pool));

        let generator = Arc::new(AnthropicGenerator::new(
            config.anthropic_api_key,
            config.model,
            config.max_tokens,
        ));
        let delivery = Arc::new(WhatsAppClient::new(
            config.whatsapp_access_token,
            config.phone_number_id,
        ));

        let dispatcher = Arc::new(Dispatcher::new(
            store,
            generator,
            delivery,
            config.system_prompt.as_str(),
        ));

        Ok(Self {
            dispatcher,
            verify_token: Arc::from(config.verify_token.as_str()),
        })
    }
}
