//! Request DTOs - loosely shaped client payloads normalised into entities
//!
//! A field a client omits takes the front end's default on create and keeps
//! its stored value on update.

mod location;
mod lore;
mod monster;
mod note;
mod rule;

pub use location::{LocationRequest, MoveMarkerRequest, PlaceMarkerRequest};
pub use lore::LoreRequest;
pub use monster::MonsterRequest;
pub use note::NoteRequest;
pub use rule::RuleRequest;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::WorldContent;
use crate::domain::value_objects::WorldId;

/// A create/update payload for one content collection
pub trait ContentRequest: DeserializeOwned + Send + 'static {
    type Entity: WorldContent;

    /// Build a brand new row in `world_id`
    fn into_entity(self, world_id: WorldId) -> Self::Entity;

    /// Overlay the fields present in the payload on an existing row, keeping its identity
    fn apply_to(self, existing: Self::Entity) -> Self::Entity;
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VisibilityRequest {
    pub is_public: bool,
}

/// Trim and drop blank entries from a semantic list
pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
