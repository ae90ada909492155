//! World repository implementation for SQLite

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;

use super::connection::SqliteStore;
use super::rows;
use crate::application::ports::outbound::WorldRepositoryPort;
use crate::domain::entities::{ContentKind, World, DEFAULT_MAP_URL};
use crate::domain::value_objects::{UserId, WorldId};

const SELECT_WORLD: &str =
    "SELECT id, owner_id, name, description, map_url, is_public, created_at FROM worlds";

/// Repository for World aggregates
pub struct SqliteWorldRepository {
    store: SqliteStore,
}

impl SqliteWorldRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, world: &World) -> Result<()> {
        sqlx::query(
            "INSERT INTO worlds (id, owner_id, name, description, map_url, is_public, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(world.id.to_string())
        .bind(world.owner_id.to_string())
        .bind(&world.name)
        .bind(&world.description)
        .bind(&world.map_url)
        .bind(world.is_public)
        .bind(world.created_at.to_rfc3339())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Created world: {}", world.name);
        Ok(())
    }

    pub async fn get(&self, id: WorldId) -> Result<Option<World>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_WORLD))
            .bind(id.to_string())
            .fetch_optional(self.store.pool())
            .await?;

        row.as_ref().map(row_to_world).transpose()
    }

    pub async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<World>> {
        let rows = sqlx::query(&format!(
            "{} WHERE owner_id = ? ORDER BY created_at DESC",
            SELECT_WORLD
        ))
        .bind(owner_id.to_string())
        .fetch_all(self.store.pool())
        .await?;

        rows.iter().map(row_to_world).collect()
    }

    pub async fn update(&self, world: &World) -> Result<()> {
        sqlx::query(
            "UPDATE worlds SET name = ?, description = ?, map_url = ?, is_public = ?
             WHERE id = ?",
        )
        .bind(&world.name)
        .bind(&world.description)
        .bind(&world.map_url)
        .bind(world.is_public)
        .bind(world.id.to_string())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Updated world: {}", world.name);
        Ok(())
    }

    /// Delete a world and everything scoped to it
    pub async fn delete(&self, id: WorldId) -> Result<()> {
        let mut tx = self.store.pool().begin().await?;
        for kind in ContentKind::ALL {
            sqlx::query(&format!("DELETE FROM {} WHERE world_id = ?", kind.table()))
                .bind(id.to_string())
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query("DELETE FROM worlds WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!("Deleted world: {}", id);
        Ok(())
    }
}

fn row_to_world(row: &SqliteRow) -> Result<World> {
    let mut map_url = rows::text(row, "map_url")?;
    if map_url.trim().is_empty() {
        map_url = DEFAULT_MAP_URL.to_string();
    }

    Ok(World {
        id: rows::id_column(row, "id")?,
        owner_id: rows::id_column(row, "owner_id")?,
        name: rows::text(row, "name")?,
        description: rows::text(row, "description")?,
        map_url,
        is_public: rows::flag(row, "is_public")?,
        created_at: rows::timestamp(row, "created_at")?,
    })
}

// =============================================================================
// WorldRepositoryPort Implementation
// =============================================================================

#[async_trait]
impl WorldRepositoryPort for SqliteWorldRepository {
    async fn create(&self, world: &World) -> Result<()> {
        SqliteWorldRepository::create(self, world).await
    }

    async fn get(&self, id: WorldId) -> Result<Option<World>> {
        SqliteWorldRepository::get(self, id).await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<World>> {
        SqliteWorldRepository::list_by_owner(self, owner_id).await
    }

    async fn update(&self, world: &World) -> Result<()> {
        SqliteWorldRepository::update(self, world).await
    }

    async fn delete(&self, id: WorldId) -> Result<()> {
        SqliteWorldRepository::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository() -> SqliteWorldRepository {
        let store = SqliteStore::in_memory().await.unwrap();
        store.initialize_schema().await.unwrap();
        SqliteWorldRepository::new(store)
    }

    #[tokio::test]
    async fn test_world_round_trip_and_owner_listing() {
        let repo = repository().await;
        let owner = UserId::new();
        let mut older = World::new(owner, "Greyhawk").with_description("Oerth");
        older.created_at = older.created_at - chrono::Duration::days(1);
        let newer = World::new(owner, "Eberron").public(true);
        let foreign = World::new(UserId::new(), "Dark Sun");

        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();
        repo.create(&foreign).await.unwrap();

        let loaded = repo.get(newer.id).await.unwrap().unwrap();
        assert!(loaded.is_public);
        assert_eq!(loaded.owner_id, owner);

        let owned = repo.list_by_owner(owner).await.unwrap();
        let names: Vec<_> = owned.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Eberron", "Greyhawk"]);
    }

    #[tokio::test]
    async fn test_blank_map_url_reads_as_default() {
        let repo = repository().await;
        let mut world = World::new(UserId::new(), "Faerun");
        world.map_url = String::new();
        repo.create(&world).await.unwrap();

        let loaded = repo.get(world.id).await.unwrap().unwrap();
        assert_eq!(loaded.map_url, DEFAULT_MAP_URL);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repository().await;
        let mut world = World::new(UserId::new(), "Faerun");
        repo.create(&world).await.unwrap();

        world.name = "Toril".to_string();
        world.is_public = true;
        repo.update(&world).await.unwrap();
        let loaded = repo.get(world.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Toril");
        assert!(loaded.is_public);

        repo.delete(world.id).await.unwrap();
        assert!(repo.get(world.id).await.unwrap().is_none());
    }
}
