//! Rule repository implementation for SQLite
//!
//! Baseline rules are stored with a NULL world and are returned alongside
//! every world's house rules.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteExecutor, SqliteRow};

use super::connection::SqliteStore;
use super::rows;
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::RuleEntry;
use crate::domain::value_objects::{RuleEntryId, WorldId};

const SELECT_RULE: &str =
    "SELECT id, world_id, name, category, description, details, is_public, created_at FROM rules";

/// Repository for house rules and the shared baseline
pub struct SqliteRuleRepository {
    store: SqliteStore,
}

impl SqliteRuleRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, rule: &RuleEntry) -> Result<()> {
        insert_rule(self.store.pool(), rule).await?;

        tracing::debug!("Created rule: {}", rule.name);
        Ok(())
    }

    pub async fn get(&self, id: RuleEntryId) -> Result<Option<RuleEntry>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_RULE))
            .bind(id.to_string())
            .fetch_optional(self.store.pool())
            .await?;

        row.as_ref().map(row_to_rule).transpose()
    }

    /// House rules of a world plus every baseline rule
    pub async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<RuleEntry>> {
        let rows = sqlx::query(&format!(
            "{} WHERE world_id = ? OR world_id IS NULL ORDER BY category, name",
            SELECT_RULE
        ))
        .bind(world_id.to_string())
        .fetch_all(self.store.pool())
        .await?;

        rows.iter().map(row_to_rule).collect()
    }

    pub async fn update(&self, rule: &RuleEntry) -> Result<()> {
        sqlx::query(
            "UPDATE rules SET name = ?, category = ?, description = ?, details = ?, is_public = ?
             WHERE id = ?",
        )
        .bind(&rule.name)
        .bind(&rule.category)
        .bind(&rule.description)
        .bind(rows::to_json(&rule.details)?)
        .bind(rule.is_public)
        .bind(rule.id.to_string())
        .execute(self.store.pool())
        .await?;

        tracing::debug!("Updated rule: {}", rule.name);
        Ok(())
    }

    pub async fn delete(&self, id: RuleEntryId) -> Result<()> {
        sqlx::query("DELETE FROM rules WHERE id = ?")
            .bind(id.to_string())
            .execute(self.store.pool())
            .await?;

        tracing::debug!("Deleted rule: {}", id);
        Ok(())
    }

    pub async fn count_baseline(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rules WHERE world_id IS NULL")
            .fetch_one(self.store.pool())
            .await?;
        Ok(count)
    }

    /// Insert the baseline rules unless some are already present.
    /// Returns the number of rows written. Either every rule lands or none does.
    pub async fn seed_baseline(&self, rules: &[RuleEntry]) -> Result<usize> {
        if self.count_baseline().await? > 0 {
            tracing::debug!("Baseline rules already present, skipping seed");
            return Ok(0);
        }

        let mut tx = self.store.pool().begin().await?;
        let mut seeded = 0;
        for rule in rules.iter().filter(|r| r.is_baseline()) {
            insert_rule(&mut *tx, rule).await?;
            seeded += 1;
        }
        tx.commit().await?;

        tracing::info!("Seeded {} baseline rules", seeded);
        Ok(seeded)
    }
}

async fn insert_rule<'e>(executor: impl SqliteExecutor<'e>, rule: &RuleEntry) -> Result<()> {
    sqlx::query(
        "INSERT INTO rules (id, world_id, name, category, description, details, is_public, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(rule.id.to_string())
    .bind(rule.world_id.map(|w| w.to_string()))
    .bind(&rule.name)
    .bind(&rule.category)
    .bind(&rule.description)
    .bind(rows::to_json(&rule.details)?)
    .bind(rule.is_public)
    .bind(rule.created_at.to_rfc3339())
    .execute(executor)
    .await?;
    Ok(())
}

fn row_to_rule(row: &SqliteRow) -> Result<RuleEntry> {
    let world_id: Option<WorldId> = rows::optional_id_column(row, "world_id")?;

    Ok(RuleEntry {
        id: rows::id_column(row, "id")?,
        world_id,
        name: rows::text(row, "name")?,
        category: rows::text(row, "category")?,
        description: rows::text(row, "description")?,
        details: rows::string_list(row, "details")?,
        // Baseline rules are always public
        is_public: world_id.is_none() || rows::flag(row, "is_public")?,
        created_at: rows::timestamp(row, "created_at")?,
    })
}

// =============================================================================
// ContentRepositoryPort Implementation
// =============================================================================

#[async_trait]
impl ContentRepositoryPort<RuleEntry> for SqliteRuleRepository {
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<RuleEntry>> {
        SqliteRuleRepository::list_by_world(self, world_id).await
    }

    async fn get(&self, id: RuleEntryId) -> Result<Option<RuleEntry>> {
        SqliteRuleRepository::get(self, id).await
    }

    async fn create(&self, rule: &RuleEntry) -> Result<()> {
        SqliteRuleRepository::create(self, rule).await
    }

    async fn update(&self, rule: &RuleEntry) -> Result<()> {
        SqliteRuleRepository::update(self, rule).await
    }

    async fn delete(&self, id: RuleEntryId) -> Result<()> {
        SqliteRuleRepository::delete(self, id).await
    }
}
