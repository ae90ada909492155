//! Lore entry entity - chronicle of a world's history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_name, validate_text, ContentKind, WorldContent};
use crate::domain::value_objects::{LoreEntryId, WorldId};

pub const DEFAULT_LORE_YEAR: i32 = 1490;
pub const DEFAULT_LORE_CATEGORY: &str = "History";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    pub id: LoreEntryId,
    pub world_id: WorldId,
    pub title: String,
    pub content: String,
    /// Era label, e.g. "Age of Humanity"
    pub era: String,
    /// In-world year used for chronological ordering
    pub year: i32,
    pub category: String,
    pub is_public: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LoreEntry {
    pub fn new(world_id: WorldId, title: impl Into<String>) -> Self {
        Self {
            id: LoreEntryId::new(),
            world_id,
            title: title.into(),
            content: String::new(),
            era: String::new(),
            year: DEFAULT_LORE_YEAR,
            category: DEFAULT_LORE_CATEGORY.to_string(),
            is_public: false,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn in_era(mut self, era: impl Into<String>, year: i32) -> Self {
        self.era = era.into();
        self.year = year;
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

impl WorldContent for LoreEntry {
    type Id = LoreEntryId;

    const KIND: ContentKind = ContentKind::Lore;

    fn id(&self) -> LoreEntryId {
        self.id
    }

    fn world_id(&self) -> Option<WorldId> {
        Some(self.world_id)
    }

    fn is_public(&self) -> bool {
        self.is_public
    }

    fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
    }

    fn bind(&mut self, id: LoreEntryId, world_id: WorldId) {
        self.id = id;
        self.world_id = world_id;
    }

    fn validate(&self) -> Result<(), String> {
        validate_name("Lore title", &self.title)?;
        validate_text("Lore content", &self.content)
    }
}
