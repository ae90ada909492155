//! World entity - a single campaign's isolated data set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_name, validate_text};
use crate::domain::value_objects::{UserId, WorldId};

/// Map shown for worlds that never set their own
pub const DEFAULT_MAP_URL: &str =
    "https://media.wizards.com/2015/images/dnd/resources/Sword-Coast-Map_HighRes.jpg";

/// A campaign world, owned for its whole lifetime by the user who created it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub map_url: String,
    /// Whether guests may open this world by shared link
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl World {
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: WorldId::new(),
            owner_id,
            name: name.into(),
            description: String::new(),
            map_url: DEFAULT_MAP_URL.to_string(),
            is_public: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_map_url(mut self, map_url: impl Into<String>) -> Self {
        let map_url = map_url.into();
        if !map_url.trim().is_empty() {
            self.map_url = map_url;
        }
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_name("World name", &self.name)?;
        validate_text("World description", &self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_defaults() {
        let owner = UserId::new();
        let world = World::new(owner, "Faerun").with_map_url("  ");
        assert!(world.is_owned_by(owner));
        assert!(!world.is_public);
        assert_eq!(world.map_url, DEFAULT_MAP_URL);
    }

    #[test]
    fn test_world_validation() {
        let owner = UserId::new();
        assert!(World::new(owner, "").validate().is_err());
        assert!(World::new(owner, "x".repeat(256)).validate().is_err());
        assert!(World::new(owner, "Eberron")
            .with_description("y".repeat(10_001))
            .validate()
            .is_err());
        assert!(World::new(owner, "Eberron").validate().is_ok());
    }
}
