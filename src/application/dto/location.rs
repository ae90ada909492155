use serde::Deserialize;

use super::{clean_list, non_blank, ContentRequest};
use crate::domain::entities::Location;
use crate::domain::value_objects::{MapPosition, WorldId};

fn default_description() -> String {
    "New location.".to_string()
}

/// Create or update payload. Fields left out of an update keep their stored value.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub name: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub taverns: Option<Vec<String>>,
    #[serde(default)]
    pub shops: Option<Vec<String>>,
    #[serde(default)]
    pub npcs: Option<Vec<String>>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ContentRequest for LocationRequest {
    type Entity = Location;

    fn into_entity(self, world_id: WorldId) -> Location {
        let location = Location::new(world_id, "", MapPosition::center());
        self.apply_to(location)
    }

    fn apply_to(self, existing: Location) -> Location {
        let position = MapPosition::new(
            self.x.unwrap_or(existing.position.x),
            self.y.unwrap_or(existing.position.y),
        );
        Location {
            name: self.name,
            position,
            description: self.description.unwrap_or(existing.description),
            taverns: self.taverns.map(clean_list).unwrap_or(existing.taverns),
            shops: self.shops.map(clean_list).unwrap_or(existing.shops),
            npcs: self.npcs.map(clean_list).unwrap_or(existing.npcs),
            size: self.size.unwrap_or(existing.size),
            is_public: self.is_public.unwrap_or(existing.is_public),
            image_url: match self.image_url {
                Some(url) => non_blank(Some(url)),
                None => existing.image_url,
            },
            ..existing
        }
    }
}

/// A click on the map that drops a new pin
#[derive(Debug, Deserialize)]
pub struct PlaceMarkerRequest {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_description")]
    pub description: String,
}

/// A marker dragged to a new spot
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveMarkerRequest {
    pub x: f64,
    pub y: f64,
}

impl MoveMarkerRequest {
    pub fn position(&self) -> MapPosition {
        MapPosition::new(self.x, self.y)
    }
}
