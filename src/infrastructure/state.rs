//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::BestiaryPort;
use crate::application::services::{AtlasServices, ContentService, WorldServiceImpl};
use crate::domain::entities::baseline_rules;
use crate::infrastructure::bestiary::Open5eClient;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::SqliteRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub services: AtlasServices,
    pub bestiary: Arc<dyn BestiaryPort>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize SQLite repository
        let repository = SqliteRepository::new(&config.database_url).await?;
        Self::with_repository(config, repository).await
    }

    /// Build the state around an already opened store
    pub async fn with_repository(config: AppConfig, repository: SqliteRepository) -> Result<Self> {
        if config.seed_baseline_rules {
            repository.rules().seed_baseline(&baseline_rules()).await?;
        }

        // Initialize Open5e client
        let bestiary: Arc<dyn BestiaryPort> = Arc::new(Open5eClient::new(&config.bestiary_base_url));

        // Initialize application services
        let services = AtlasServices {
            worlds: Arc::new(WorldServiceImpl::new(Arc::new(repository.worlds()))),
            locations: ContentService::new(Arc::new(repository.locations())),
            lore: ContentService::new(Arc::new(repository.lore())),
            rules: ContentService::new(Arc::new(repository.rules())),
            monsters: ContentService::new(Arc::new(repository.monsters())),
            notes: ContentService::new(Arc::new(repository.notes())),
        };

        Ok(Self {
            config,
            services,
            bestiary,
        })
    }
}
