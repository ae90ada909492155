//! Lore repository implementation for SQLite

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::connection::SqliteStore;
use super::rows;
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{LoreEntry, DEFAULT_LORE_CATEGORY, DEFAULT_LORE_YEAR};
use crate::domain::value_objects::{LoreEntryId, WorldId};

const SELECT_LORE: &str = "SELECT id, world_id, title, content, era, year, category, is_public, image_url, created_at FROM lore_entries";

/// Repository for lore entries
pub struct SqliteLoreRepository {
    store: SqliteStore,
}

impl SqliteLoreRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, entry: &LoreEntry) -> Result<()> {
        sqlx::query(
            "INSERT INTO lore_entries (id, world_id, title, content, era, year, category, is_public, image_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(entry.world_id.to_string())
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.era)
        .bind(entry.year)
        .bind(&entry.category)
        .bind(entry.is_public)
        .bind(&entry.image_url)
        .bind(entry.created_at.to_rfc3339())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Created lore entry: {}", entry.title);
        Ok(())
    }

    pub async fn get(&self, id: LoreEntryId) -> Result<Option<LoreEntry>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_LORE))
            .bind(id.to_string())
            .fetch_optional(self.store.pool())
            .await?;

        row.as_ref().map(row_to_lore).transpose()
    }

    pub async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<LoreEntry>> {
        let rows = sqlx::query(&format!("{} WHERE world_id = ? ORDER BY year, title", SELECT_LORE))
            .bind(world_id.to_string())
            .fetch_all(self.store.pool())
            .await?;

        rows.iter().map(row_to_lore).collect()
    }

    pub async fn update(&self, entry: &LoreEntry) -> Result<()> {
        sqlx::query(
            "UPDATE lore_entries SET title = ?, content = ?, era = ?, year = ?, category = ?,
                 is_public = ?, image_url = ?
             WHERE id = ?",
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.era)
        .bind(entry.year)
        .bind(&entry.category)
        .bind(entry.is_public)
        .bind(&entry.image_url)
        .bind(entry.id.to_string())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Updated lore entry: {}", entry.title);
        Ok(())
    }

    pub async fn delete(&self, id: LoreEntryId) -> Result<()> {
        sqlx::query("DELETE FROM lore_entries WHERE id = ?")
            .bind(id.to_string())
            .execute(self.store.pool())
            .await?;

        tracing::debug!("Deleted lore entry: {}", id);
        Ok(())
    }
}

fn row_to_lore(row: &SqliteRow) -> Result<LoreEntry> {
    let year: Option<i64> = row.try_get("year")?;
    let category =
        rows::optional_text(row, "category")?.unwrap_or_else(|| DEFAULT_LORE_CATEGORY.to_string());

    Ok(LoreEntry {
        id: rows::id_column(row, "id")?,
        world_id: rows::id_column(row, "world_id")?,
        title: rows::text(row, "title")?,
        content: rows::text(row, "content")?,
        era: rows::text(row, "era")?,
        year: year
            .and_then(|y| i32::try_from(y).ok())
            .unwrap_or(DEFAULT_LORE_YEAR),
        category,
        is_public: rows::flag(row, "is_public")?,
        image_url: rows::optional_text(row, "image_url")?,
        created_at: rows::timestamp(row, "created_at")?,
    })
}

// =============================================================================
// ContentRepositoryPort Implementation
// =============================================================================

#[async_trait]
impl ContentRepositoryPort<LoreEntry> for SqliteLoreRepository {
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<LoreEntry>> {
        SqliteLoreRepository::list_by_world(self, world_id).await
    }

    async fn get(&self, id: LoreEntryId) -> Result<Option<LoreEntry>> {
        SqliteLoreRepository::get(self, id).await
    }

    async fn create(&self, entry: &LoreEntry) -> Result<()> {
        SqliteLoreRepository::create(self, entry).await
    }

    async fn update(&self, entry: &LoreEntry) -> Result<()> {
        SqliteLoreRepository::update(self, entry).await
    }

    async fn delete(&self, id: LoreEntryId) -> Result<()> {
        SqliteLoreRepository::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::test_repository;

    #[tokio::test]
    async fn test_lore_listing_is_chronological() {
        let (repo, world) = test_repository().await;
        let lore = repo.lore();
        let later = LoreEntry::new(world.id, "Spellplague").in_era("Era of Upheaval", 1385);
        let earlier = LoreEntry::new(world.id, "Fall of Netheril").in_era("Netherese", -339);
        lore.create(&later).await.unwrap();
        lore.create(&earlier).await.unwrap();

        let titles: Vec<_> = lore
            .list_by_world(world.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Fall of Netheril", "Spellplague"]);
    }

    #[tokio::test]
    async fn test_missing_year_and_category_use_defaults() {
        let (repo, world) = test_repository().await;
        let id = LoreEntryId::new();
        sqlx::query("INSERT INTO lore_entries (id, world_id, title) VALUES (?, ?, 'Untitled')")
            .bind(id.to_string())
            .bind(world.id.to_string())
            .execute(repo.store().pool())
            .await
            .unwrap();

        let loaded = repo.lore().get(id).await.unwrap().unwrap();
        assert_eq!(loaded.year, DEFAULT_LORE_YEAR);
        assert_eq!(loaded.category, DEFAULT_LORE_CATEGORY);
        assert!(!loaded.is_public);
        assert!(loaded.image_url.is_none());
    }
}
