use std::sync::Arc;

use anyhow::Context;
use ghost_llm::{LLMClient, LLMClientConfig, LLMProvider};

use crate::{
    config::{AppConfig, HistoryBackend},
    generation::generation_service::GenerationService,
    history::{
        file_history_store::FileHistoryStore, history_service::HistoryService,
        history_store::MemoryHistoryStore, mongo_history_store::MongoHistoryStore,
    },
};

#[derive(Clone)]
pub struct AppService {
    pub generation_service: GenerationService,
    pub history_service: HistoryService,
}

impl AppService {
    pub fn new(llm_client: Option<LLMClient>, history_service: HistoryService) -> anyhow::Result<Self> {
        let generation_service = GenerationService::new(llm_client, history_service.clone())?;

        Ok(Self {
            generation_service,
            history_service,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
}

impl AppState {
    pub fn new(service: AppService) -> Self {
        Self { service }
    }

    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let llm_client = build_llm_client(config)?;
        let history_service = build_history_service(config).await?;

        Ok(Self::new(AppService::new(llm_client, history_service)?))
    }
}

fn build_llm_client(config: &AppConfig) -> anyhow::Result<Option<LLMClient>> {
    let Some(api_key) = &config.gemini_api_key else {
        tracing::warn!("GEMINI_API_KEY is not set; generate requests will fail until it is configured");
        return Ok(None);
    };

    let client_config = LLMClientConfig::new(api_key.clone())
        .with_model(config.gemini_model.clone())
        .with_base_url(config.gemini_base_url.clone());

    let client = LLMClient::new(LLMProvider::Gemini, client_config)
        .context("Failed to create Gemini client")?;
    tracing::info!("Using Gemini model {}", client.model());

    Ok(Some(client))
}

async fn build_history_service(config: &AppConfig) -> anyhow::Result<HistoryService> {
    let service = match config.history_backend {
        HistoryBackend::File => {
            tracing::info!("Saving history to {}", config.history_file.display());
            HistoryService::new(Arc::new(FileHistoryStore::new(&config.history_file)))
        }
        HistoryBackend::Memory => {
            tracing::info!("Keeping history in memory");
            HistoryService::new(Arc::new(MemoryHistoryStore::new()))
        }
        HistoryBackend::MongoDb => {
            let uri = config
                .database_uri
                .as_deref()
                .context("DATABASE_URI is required for the mongodb history backend")?;
            let store = MongoHistoryStore::connect(uri, &config.database_name)
                .await
                .context("Failed to connect to MongoDB")?;
            tracing::info!("Saving history to MongoDB database {}", config.database_name);
            HistoryService::new(Arc::new(store))
        }
        HistoryBackend::Disabled => {
            tracing::info!("History is disabled");
            HistoryService::disabled()
        }
    };

    Ok(service)
}
