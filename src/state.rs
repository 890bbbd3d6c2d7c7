use crate::application::service::TranslationService;
use crate::domain::error::LingoError;
use crate::domain::model::is_supported;
use crate::domain::traits::PreferenceStore;
use crate::infrastructure::config::{detect_system_language, Config};
use crate::infrastructure::network::client::MyMemoryClient;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::prefs::SqlitePreferences;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_rusqlite::Connection;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub async fn new(db: Connection, config: Config) -> Result<Self, LingoError> {
        let http_client = create_client(config.request_timeout_secs)?;
        let backend = Arc::new(MyMemoryClient::new(http_client, config.provider.clone()));
        let store = Arc::new(SqlitePreferences::new(db));

        // Persisted preference first, environment locale as the fallback.
        let initial_language = match store.load_language().await? {
            Some(code) if is_supported(&code) => code,
            _ => detect_system_language(),
        };

        let service = Arc::new(TranslationService::new(
            backend,
            store,
            Duration::from_millis(config.min_interval_ms),
            initial_language,
        ));

        Ok(Self {
            service,
            config: Arc::new(RwLock::new(config)),
        })
    }
}
