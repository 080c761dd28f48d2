use serde::{Deserialize, Serialize};

/// 2D camera over the world plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World x rendered at the viewport centre.
    pub x: f64,
    /// World y rendered at the viewport centre.
    pub y: f64,
    /// Pixels per world unit.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }
}
