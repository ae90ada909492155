//! Value objects - Immutable objects defined by their attributes

mod ids;
mod map_position;
mod viewer;

pub use ids::*;
pub use map_position::{MapPosition, MAP_HEIGHT, MAP_WIDTH};
pub use viewer::Viewer;
