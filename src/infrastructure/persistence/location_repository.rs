//! Location repository implementation for SQLite

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::connection::SqliteStore;
use super::rows;
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{Location, DEFAULT_MARKER_SIZE, MAX_MARKER_SIZE};
use crate::domain::value_objects::{LocationId, MapPosition, WorldId};

const SELECT_LOCATION: &str = "SELECT id, world_id, name, x, y, description, taverns, shops, npcs, size, is_public, image_url FROM locations";

/// Repository for map markers
pub struct SqliteLocationRepository {
    store: SqliteStore,
}

impl SqliteLocationRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, location: &Location) -> Result<()> {
        sqlx::query(
            "INSERT INTO locations (id, world_id, name, x, y, description, taverns, shops, npcs, size, is_public, image_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(location.id.to_string())
        .bind(location.world_id.to_string())
        .bind(&location.name)
        .bind(location.position.x)
        .bind(location.position.y)
        .bind(&location.description)
        .bind(rows::to_json(&location.taverns)?)
        .bind(rows::to_json(&location.shops)?)
        .bind(rows::to_json(&location.npcs)?)
        .bind(location.size as i64)
        .bind(location.is_public)
        .bind(&location.image_url)
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Created location: {}", location.name);
        Ok(())
    }

    pub async fn get(&self, id: LocationId) -> Result<Option<Location>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_LOCATION))
            .bind(id.to_string())
            .fetch_optional(self.store.pool())
            .await?;

        row.as_ref().map(row_to_location).transpose()
    }

    pub async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<Location>> {
        let rows = sqlx::query(&format!("{} WHERE world_id = ? ORDER BY name", SELECT_LOCATION))
            .bind(world_id.to_string())
            .fetch_all(self.store.pool())
            .await?;

        rows.iter().map(row_to_location).collect()
    }

    pub async fn update(&self, location: &Location) -> Result<()> {
        sqlx::query(
            "UPDATE locations SET name = ?, x = ?, y = ?, description = ?, taverns = ?, shops = ?,
                 npcs = ?, size = ?, is_public = ?, image_url = ?
             WHERE id = ?",
        )
        .bind(&location.name)
        .bind(location.position.x)
        .bind(location.position.y)
        .bind(&location.description)
        .bind(rows::to_json(&location.taverns)?)
        .bind(rows::to_json(&location.shops)?)
        .bind(rows::to_json(&location.npcs)?)
        .bind(location.size as i64)
        .bind(location.is_public)
        .bind(&location.image_url)
        .bind(location.id.to_string())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Updated location: {}", location.name);
        Ok(())
    }

    pub async fn delete(&self, id: LocationId) -> Result<()> {
        sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id.to_string())
            .execute(self.store.pool())
            .await?;

        tracing::debug!("Deleted location: {}", id);
        Ok(())
    }
}

fn row_to_location(row: &SqliteRow) -> Result<Location> {
    let size: Option<i64> = row.try_get("size")?;
    let size = match size {
        Some(size) if size >= 1 => size.min(MAX_MARKER_SIZE as i64) as u32,
        _ => DEFAULT_MARKER_SIZE,
    };

    Ok(Location {
        id: rows::id_column(row, "id")?,
        world_id: rows::id_column(row, "world_id")?,
        name: rows::text(row, "name")?,
        position: MapPosition::new(row.try_get("x")?, row.try_get("y")?),
        description: rows::text(row, "description")?,
        taverns: rows::string_list(row, "taverns")?,
        shops: rows::string_list(row, "shops")?,
        npcs: rows::string_list(row, "npcs")?,
        size,
        is_public: rows::flag(row, "is_public")?,
        image_url: rows::optional_text(row, "image_url")?,
    })
}

// =============================================================================
// ContentRepositoryPort Implementation
// =============================================================================

#[async_trait]
impl ContentRepositoryPort<Location> for SqliteLocationRepository {
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<Location>> {
        SqliteLocationRepository::list_by_world(self, world_id).await
    }

    async fn get(&self, id: LocationId) -> Result<Option<Location>> {
        SqliteLocationRepository::get(self, id).await
    }

    async fn create(&self, location: &Location) -> Result<()> {
        SqliteLocationRepository::create(self, location).await
    }

    async fn update(&self, location: &Location) -> Result<()> {
        SqliteLocationRepository::update(self, location).await
    }

    async fn delete(&self, id: LocationId) -> Result<()> {
        SqliteLocationRepository::delete(self, id).await
    }
}
