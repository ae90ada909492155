//! GM note entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{validate_name, validate_text, ContentKind, WorldContent};
use crate::domain::value_objects::{NoteId, WorldId};

/// The kind of thing a note is about. Accepted in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NoteCategory {
    #[serde(rename = "NPC")]
    Npc,
    Event,
    Character,
    Plot,
    Secret,
}

impl NoteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteCategory::Npc => "NPC",
            NoteCategory::Event => "Event",
            NoteCategory::Character => "Character",
            NoteCategory::Plot => "Plot",
            NoteCategory::Secret => "Secret",
        }
    }
}

impl std::fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NoteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npc" => Ok(NoteCategory::Npc),
            "event" => Ok(NoteCategory::Event),
            "character" => Ok(NoteCategory::Character),
            "plot" => Ok(NoteCategory::Plot),
            "secret" => Ok(NoteCategory::Secret),
            other => Err(format!("Unknown note category: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for NoteCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmNote {
    pub id: NoteId,
    pub world_id: WorldId,
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    pub is_public: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DmNote {
    pub fn new(world_id: WorldId, title: impl Into<String>, category: NoteCategory) -> Self {
        Self {
            id: NoteId::new(),
            world_id,
            title: title.into(),
            content: String::new(),
            category,
            is_public: false,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

impl WorldContent for DmNote {
    type Id = NoteId;

    const KIND: ContentKind = ContentKind::Notes;

    fn id(&self) -> NoteId {
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

    fn bind(&mut self, id: NoteId, world_id: WorldId) {
        self.id = id;
        self.world_id = world_id;
    }

    fn validate(&self) -> Result<(), String> {
        validate_name("Note title", &self.title)?;
        validate_text("Note content", &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("NPC".parse::<NoteCategory>(), Ok(NoteCategory::Npc));
        assert_eq!(" secret ".parse::<NoteCategory>(), Ok(NoteCategory::Secret));
        assert!("Rumour".parse::<NoteCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_like_the_store() {
        assert_eq!(serde_json::to_string(&NoteCategory::Npc).unwrap(), "\"NPC\"");
        assert_eq!(serde_json::to_string(&NoteCategory::Plot).unwrap(), "\"Plot\"");
    }

    #[test]
    fn test_category_deserializes_in_any_case() {
        let plot: NoteCategory = serde_json::from_str("\"plot\"").unwrap();
        assert_eq!(plot, NoteCategory::Plot);
        let npc: NoteCategory = serde_json::from_str("\"npc\"").unwrap();
        assert_eq!(npc, NoteCategory::Npc);
        assert!(serde_json::from_str::<NoteCategory>("\"Rumour\"").is_err());
    }
}
