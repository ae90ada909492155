//! Homebrew monster repository implementation for SQLite
//!
//! The full stat block is stored as a JSON document next to the columns the
//! store needs for listing.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::connection::SqliteStore;
use super::rows;
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{Monster, StatBlock};
use crate::domain::value_objects::{MonsterId, WorldId};

const SELECT_MONSTER: &str = "SELECT id, world_id, slug, name, stat_block, is_homebrew, is_public, created_at FROM homebrew_monsters";

pub struct SqliteMonsterRepository {
    store: SqliteStore,
}

impl SqliteMonsterRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, monster: &Monster) -> Result<()> {
        sqlx::query(
            "INSERT INTO homebrew_monsters (id, world_id, slug, name, stat_block, is_homebrew, is_public, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(monster.id.to_string())
        .bind(monster.world_id.to_string())
        .bind(&monster.stats.slug)
        .bind(&monster.stats.name)
        .bind(rows::to_json(&monster.stats)?)
        .bind(monster.is_homebrew)
        .bind(monster.is_public)
        .bind(monster.created_at.to_rfc3339())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Created monster: {}", monster.stats.name);
        Ok(())
    }

    pub async fn get(&self, id: MonsterId) -> Result<Option<Monster>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_MONSTER))
            .bind(id.to_string())
            .fetch_optional(self.store.pool())
            .await?;

        row.as_ref().map(row_to_monster).transpose()
    }

    pub async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<Monster>> {
        let rows = sqlx::query(&format!("{} WHERE world_id = ? ORDER BY name", SELECT_MONSTER))
            .bind(world_id.to_string())
            .fetch_all(self.store.pool())
            .await?;

        rows.iter().map(row_to_monster).collect()
    }

    pub async fn update(&self, monster: &Monster) -> Result<()> {
        sqlx::query(
            "UPDATE homebrew_monsters SET slug = ?, name = ?, stat_block = ?, is_homebrew = ?, is_public = ?
             WHERE id = ?",
        )
        .bind(&monster.stats.slug)
        .bind(&monster.stats.name)
        .bind(rows::to_json(&monster.stats)?)
        .bind(monster.is_homebrew)
        .bind(monster.is_public)
        .bind(monster.id.to_string())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Updated monster: {}", monster.stats.name);
        Ok(())
    }

    pub async fn delete(&self, id: MonsterId) -> Result<()> {
        sqlx::query("DELETE FROM homebrew_monsters WHERE id = ?")
            .bind(id.to_string())
            .execute(self.store.pool())
            .await?;

        tracing::debug!("Deleted monster: {}", id);
        Ok(())
    }
}

fn row_to_monster(row: &SqliteRow) -> Result<Monster> {
    let name = rows::text(row, "name")?;
    let raw: Option<String> = row.try_get("stat_block")?;
    let mut stats = match raw.as_deref().map(serde_json::from_str::<StatBlock>) {
        Some(Ok(stats)) => stats,
        Some(Err(e)) => {
            tracing::warn!("Ignoring malformed stat block for {}: {}", name, e);
            StatBlock::new(name.clone())
        }
        None => StatBlock::new(name.clone()),
    };
    // The listing columns are authoritative
    if !name.is_empty() {
        stats.name = name;
    }
    stats.slug = rows::text(row, "slug")?;

    let is_homebrew: Option<bool> = row.try_get("is_homebrew")?;

    Ok(Monster {
        id: rows::id_column(row, "id")?,
        world_id: rows::id_column(row, "world_id")?,
        stats: stats.normalized(),
        is_homebrew: is_homebrew.unwrap_or(true),
        is_public: rows::flag(row, "is_public")?,
        created_at: rows::timestamp(row, "created_at")?,
    })
}

// =============================================================================
// ContentRepositoryPort Implementation
// =============================================================================

#[async_trait]
impl ContentRepositoryPort<Monster> for SqliteMonsterRepository {
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<Monster>> {
        SqliteMonsterRepository::list_by_world(self, world_id).await
    }

    async fn get(&self, id: MonsterId) -> Result<Option<Monster>> {
        SqliteMonsterRepository::get(self, id).await
    }

    async fn create(&self, monster: &Monster) -> Result<()> {
        SqliteMonsterRepository::create(self, monster).await
    }

    async fn update(&self, monster: &Monster) -> Result<()> {
        SqliteMonsterRepository::update(self, monster).await
    }

    async fn delete(&self, id: MonsterId) -> Result<()> {
        SqliteMonsterRepository::delete(self, id).await
    }
}
