pub mod api;
pub mod bills;
pub mod cache;
pub mod config;
pub mod congress;
pub mod error;
pub mod llm;
pub mod store;
pub mod text;

use std::sync::Arc;
use std::time::Duration;

use bills::BillService;
use cache::SystemClock;
use config::Config;
use congress::HttpCongressClient;
use error::{AppError, Result};
use llm::GeminiClient;
use store::{DocumentStore, FileStore, MemoryStore};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bills: BillService,
}

impl AppState {
    /// Composition root: builds every collaborator from the configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        let store: Arc<dyn DocumentStore> = match &config.document_store_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "using file-backed document store");
                Arc::new(FileStore::new(path.clone()))
            }
            None => {
                tracing::info!("using in-memory document store");
                Arc::new(MemoryStore::new())
            }
        };

        let congress = HttpCongressClient::with_client(
            http.clone(),
            config.congress_base_url.clone(),
            config.legislative_api_key.clone(),
        );
        let llm = GeminiClient::new(
            http,
            config.gemini_base_url.clone(),
            config.summarization_api_key.clone(),
        )
        .with_models(config.summary_model.clone(), config.chat_model.clone())
        .with_tone(config.summary_tone.clone());

        let bills = BillService::new(
            store,
            Arc::new(congress),
            Arc::new(llm),
            Arc::new(SystemClock),
        );

        Ok(Self { bills })
    }
}
