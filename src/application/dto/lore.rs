use serde::Deserialize;

use super::{non_blank, ContentRequest};
use crate::domain::entities::LoreEntry;
use crate::domain::value_objects::WorldId;

/// Create or update payload. Fields left out of an update keep their stored value.
#[derive(Debug, Deserialize)]
pub struct LoreRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ContentRequest for LoreRequest {
    type Entity = LoreEntry;

    fn into_entity(self, world_id: WorldId) -> LoreEntry {
        let entry = LoreEntry::new(world_id, "");
        self.apply_to(entry)
    }

    fn apply_to(self, existing: LoreEntry) -> LoreEntry {
        LoreEntry {
            title: self.title,
            content: self.content.unwrap_or(existing.content),
            era: self.era.map(|era| era.trim().to_string()).unwrap_or(existing.era),
            year: self.year.unwrap_or(existing.year),
            category: non_blank(self.category).unwrap_or(existing.category),
            is_public: self.is_public.unwrap_or(existing.is_public),
            image_url: match self.image_url {
                Some(url) => non_blank(Some(url)),
                None => existing.image_url,
            },
            ..existing
        }
    }
}
