//! Positions on the campaign map plane

use serde::{Deserialize, Serialize};

/// Width of the map plane in map units
pub const MAP_WIDTH: f64 = 2000.0;
/// Height of the map plane in map units
pub const MAP_HEIGHT: f64 = 1500.0;

/// A point on the map image. `x` runs along the width, `y` along the height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

impl MapPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The centre of the map, where markers land when no position is known
    pub fn center() -> Self {
        Self {
            x: MAP_WIDTH / 2.0,
            y: MAP_HEIGHT / 2.0,
        }
    }

    pub fn is_on_map(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (0.0..=MAP_WIDTH).contains(&self.x)
            && (0.0..=MAP_HEIGHT).contains(&self.y)
    }
}

impl Default for MapPosition {
    fn default() -> Self {
        Self::center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_bounds() {
        assert!(MapPosition::new(0.0, 0.0).is_on_map());
        assert!(MapPosition::new(MAP_WIDTH, MAP_HEIGHT).is_on_map());
        assert!(MapPosition::center().is_on_map());
        assert!(!MapPosition::new(-1.0, 10.0).is_on_map());
        assert!(!MapPosition::new(10.0, MAP_HEIGHT + 0.5).is_on_map());
        assert!(!MapPosition::new(f64::NAN, 10.0).is_on_map());
    }
}
