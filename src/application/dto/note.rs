use serde::Deserialize;

use super::{non_blank, ContentRequest};
use crate::domain::entities::{DmNote, NoteCategory};
use crate::domain::value_objects::WorldId;

/// Create or update payload. Fields left out of an update keep their stored value.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<NoteCategory>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ContentRequest for NoteRequest {
    type Entity = DmNote;

    fn into_entity(self, world_id: WorldId) -> DmNote {
        let note = DmNote::new(world_id, "", NoteCategory::Npc);
        self.apply_to(note)
    }

    fn apply_to(self, existing: DmNote) -> DmNote {
        DmNote {
            title: self.title,
            content: self.content.unwrap_or(existing.content),
            category: self.category.unwrap_or(existing.category),
            is_public: self.is_public.unwrap_or(existing.is_public),
            image_url: match self.image_url {
                Some(url) => non_blank(Some(url)),
                None => existing.image_url,
            },
            ..existing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_is_a_private_npc_note() {
        let request: NoteRequest = serde_json::from_str(r#"{"title": "Volo"}"#).unwrap();
        let note = request.into_entity(WorldId::new());

        assert_eq!(note.category, NoteCategory::Npc);
        assert!(!note.is_public);
    }

    #[test]
    fn test_update_accepts_any_category_case() {
        let existing = DmNote::new(WorldId::new(), "Heist", NoteCategory::Npc)
            .with_content("Vault under the Yawning Portal")
            .public(true);
        let request: NoteRequest =
            serde_json::from_str(r#"{"title": "The Heist", "category": "plot"}"#).unwrap();

        let updated = request.apply_to(existing.clone());
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.category, NoteCategory::Plot);
        assert_eq!(updated.content, "Vault under the Yawning Portal");
        assert!(updated.is_public);
    }
}
