//! Location entity - a pinned place on the world map

use serde::{Deserialize, Serialize};

use super::{validate_name, validate_text, ContentKind, WorldContent};
use crate::domain::value_objects::{LocationId, MapPosition, WorldId};

/// Marker size used when a location never set one
pub const DEFAULT_MARKER_SIZE: u32 = 25;
pub const MAX_MARKER_SIZE: u32 = 200;

/// A location pinned on the world map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub world_id: WorldId,
    pub name: String,
    #[serde(flatten)]
    pub position: MapPosition,
    pub description: String,
    pub taverns: Vec<String>,
    pub shops: Vec<String>,
    pub npcs: Vec<String>,
    /// Display size hint for the map marker
    pub size: u32,
    pub is_public: bool,
    pub image_url: Option<String>,
}

impl Location {
    pub fn new(world_id: WorldId, name: impl Into<String>, position: MapPosition) -> Self {
        Self {
            id: LocationId::new(),
            world_id,
            name: name.into(),
            position,
            description: String::new(),
            taverns: Vec::new(),
            shops: Vec::new(),
            npcs: Vec::new(),
            size: DEFAULT_MARKER_SIZE,
            is_public: false,
            image_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tavern(mut self, tavern: impl Into<String>) -> Self {
        self.taverns.push(tavern.into());
        self
    }

    pub fn with_npc(mut self, npc: impl Into<String>) -> Self {
        self.npcs.push(npc.into());
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

impl WorldContent for Location {
    type Id = LocationId;

    const KIND: ContentKind = ContentKind::Locations;

    fn id(&self) -> LocationId {
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

    fn bind(&mut self, id: LocationId, world_id: WorldId) {
        self.id = id;
        self.world_id = world_id;
    }

    fn validate(&self) -> Result<(), String> {
        validate_name("Location name", &self.name)?;
        validate_text("Location description", &self.description)?;
        if !self.position.is_on_map() {
            return Err(format!(
                "Position ({}, {}) is outside the map",
                self.position.x, self.position.y
            ));
        }
        if self.size == 0 || self.size > MAX_MARKER_SIZE {
            return Err(format!("Marker size must be between 1 and {}", MAX_MARKER_SIZE));
        }
        Ok(())
    }
}
