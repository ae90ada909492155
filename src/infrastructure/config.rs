//! Application configuration

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

/// Application configuration loaded from `ATLAS_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite database URL for the campaign store
    pub database_url: String,

    /// HTTP server port
    pub server_port: u16,

    /// Request header carrying the signed-in user's id
    pub viewer_header: String,

    /// Open5e API base URL
    pub bestiary_base_url: String,

    /// Insert the SRD baseline rules on startup when none exist
    pub seed_baseline_rules: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix("ATLAS").try_parsing(true))
    }

    fn load(environment: Environment) -> Result<Self> {
        Config::builder()
            .set_default("database_url", "sqlite://data/atlas.db")?
            .set_default("server_port", 3000)?
            .set_default("viewer_header", "x-atlas-user")?
            .set_default("bestiary_base_url", "https://api.open5e.com")?
            .set_default("seed_baseline_rules", true)?
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid ATLAS_* configuration")
    }
}
