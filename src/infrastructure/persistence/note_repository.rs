//! GM note repository implementation for SQLite

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;

use super::connection::SqliteStore;
use super::rows;
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{DmNote, NoteCategory};
use crate::domain::value_objects::{NoteId, WorldId};

const SELECT_NOTE: &str =
    "SELECT id, world_id, title, content, category, is_public, image_url, created_at FROM dm_notes";

pub struct SqliteNoteRepository {
    store: SqliteStore,
}

impl SqliteNoteRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, note: &DmNote) -> Result<()> {
        sqlx::query(
            "INSERT INTO dm_notes (id, world_id, title, content, category, is_public, image_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(note.id.to_string())
        .bind(note.world_id.to_string())
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.category.as_str())
        .bind(note.is_public)
        .bind(&note.image_url)
        .bind(note.created_at.to_rfc3339())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Created note: {}", note.title);
        Ok(())
    }

    pub async fn get(&self, id: NoteId) -> Result<Option<DmNote>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_NOTE))
            .bind(id.to_string())
            .fetch_optional(self.store.pool())
            .await?;

        row.as_ref().map(row_to_note).transpose()
    }

    pub async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<DmNote>> {
        let rows = sqlx::query(&format!(
            "{} WHERE world_id = ? ORDER BY created_at DESC",
            SELECT_NOTE
        ))
        .bind(world_id.to_string())
        .fetch_all(self.store.pool())
        .await?;

        rows.iter().map(row_to_note).collect()
    }

    pub async fn update(&self, note: &DmNote) -> Result<()> {
        sqlx::query(
            "UPDATE dm_notes SET title = ?, content = ?, category = ?, is_public = ?, image_url = ?
             WHERE id = ?",
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.category.as_str())
        .bind(note.is_public)
        .bind(&note.image_url)
        .bind(note.id.to_string())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Updated note: {}", note.title);
        Ok(())
    }

    pub async fn delete(&self, id: NoteId) -> Result<()> {
        sqlx::query("DELETE FROM dm_notes WHERE id = ?")
            .bind(id.to_string())
            .execute(self.store.pool())
            .await?;

        tracing::debug!("Deleted note: {}", id);
        Ok(())
    }
}

fn row_to_note(row: &SqliteRow) -> Result<DmNote> {
    let category = rows::optional_text(row, "category")?
        .and_then(|c| c.parse::<NoteCategory>().ok())
        .unwrap_or(NoteCategory::Npc);

    Ok(DmNote {
        id: rows::id_column(row, "id")?,
        world_id: rows::id_column(row, "world_id")?,
        title: rows::text(row, "title")?,
        content: rows::text(row, "content")?,
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
impl ContentRepositoryPort<DmNote> for SqliteNoteRepository {
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<DmNote>> {
        SqliteNoteRepository::list_by_world(self, world_id).await
    }

    async fn get(&self, id: NoteId) -> Result<Option<DmNote>> {
        SqliteNoteRepository::get(self, id).await
    }

    async fn create(&self, note: &DmNote) -> Result<()> {
        SqliteNoteRepository::create(self, note).await
    }

    async fn update(&self, note: &DmNote) -> Result<()> {
        SqliteNoteRepository::update(self, note).await
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        SqliteNoteRepository::delete(self, id).await
    }
}
