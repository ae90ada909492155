//! SQLite connection management

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS worlds (
        id TEXT PRIMARY KEY,
        owner_id TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        map_url TEXT NOT NULL DEFAULT '',
        is_public INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_worlds_owner ON worlds (owner_id)",
    "CREATE TABLE IF NOT EXISTS locations (
        id TEXT PRIMARY KEY,
        world_id TEXT NOT NULL REFERENCES worlds (id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        x REAL NOT NULL,
        y REAL NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        taverns TEXT,
        shops TEXT,
        npcs TEXT,
        size INTEGER,
        is_public INTEGER,
        image_url TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_locations_world ON locations (world_id)",
    "CREATE TABLE IF NOT EXISTS lore_entries (
        id TEXT PRIMARY KEY,
        world_id TEXT NOT NULL REFERENCES worlds (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        era TEXT NOT NULL DEFAULT '',
        year INTEGER,
        category TEXT,
        is_public INTEGER,
        image_url TEXT,
        created_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_lore_world ON lore_entries (world_id)",
    "CREATE TABLE IF NOT EXISTS rules (
        id TEXT PRIMARY KEY,
        world_id TEXT REFERENCES worlds (id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        category TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        details TEXT,
        is_public INTEGER,
        created_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_rules_world ON rules (world_id)",
    "CREATE TABLE IF NOT EXISTS homebrew_monsters (
        id TEXT PRIMARY KEY,
        world_id TEXT NOT NULL REFERENCES worlds (id) ON DELETE CASCADE,
        slug TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL,
        stat_block TEXT,
        is_homebrew INTEGER,
        is_public INTEGER,
        created_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_monsters_world ON homebrew_monsters (world_id)",
    "CREATE TABLE IF NOT EXISTS dm_notes (
        id TEXT PRIMARY KEY,
        world_id TEXT NOT NULL REFERENCES worlds (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        category TEXT,
        is_public INTEGER,
        image_url TEXT,
        created_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_notes_world ON dm_notes (world_id)",
];

/// Shared handle to the campaign store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Ensure data directory exists
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create campaign store directory")?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite campaign store")?;

        tracing::info!("Connected to SQLite campaign store: {}", database_url);
        Ok(Self { pool })
    }

    /// Private in-memory store. A single connection keeps the database alive.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory campaign store")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn initialize_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to initialize campaign store schema")?;
        }
        tracing::debug!("Campaign store schema ready");
        Ok(())
    }
}
