//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between pixel coordinates (screen space) and world
//! coordinates (the arm's kinematic plane). The camera's `(x, y)` is the world
//! point drawn at the centre of the viewport and `zoom` is pixels per world
//! unit. Screen Y grows downward, world Y grows upward.

use crate::camera::Camera;
use armkit_core::{constants, Point2D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Zoom limits, scroll factors and grid spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub grid_spacing: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            zoom_in_factor: constants::ZOOM_IN_FACTOR,
            zoom_out_factor: constants::ZOOM_OUT_FACTOR,
            grid_spacing: constants::GRID_SPACING,
        }
    }
}

impl ViewportConfig {
    /// Limits are finite with `0 < min_zoom <= max_zoom`, and the factors
    /// and grid spacing are finite and positive.
    pub fn is_valid(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.min_zoom)
            && positive(self.max_zoom)
            && self.min_zoom <= self.max_zoom
            && positive(self.zoom_in_factor)
            && positive(self.zoom_out_factor)
            && positive(self.grid_spacing)
    }
}

/// Pan state captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnchor {
    /// Screen position of the pointer at drag start.
    pub screen: Point2D,
    /// Camera x at drag start.
    pub camera_x: f64,
    /// Camera y at drag start.
    pub camera_y: f64,
}

/// Camera plus the current surface size.
#[derive(Debug, Clone)]
pub struct Viewport {
    camera: Camera,
    size: ViewportSize,
    config: ViewportConfig,
}

impl Viewport {
    /// Creates a viewport centred on the world origin at 1:1 zoom.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(width, height, ViewportConfig::default())
    }

    /// Creates a viewport with custom limits. An invalid config is replaced
    /// by the defaults.
    pub fn with_config(width: f64, height: f64, config: ViewportConfig) -> Self {
        let config = if config.is_valid() {
            config
        } else {
            tracing::warn!("Invalid viewport config {:?}, using defaults", config);
            ViewportConfig::default()
        };
        Self {
            camera: Camera::default(),
            size: ViewportSize::new(width, height),
            config,
        }
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Replaces the camera, clamping zoom into the configured range. A camera
    /// with a non-finite coordinate or a non-positive zoom is ignored.
    pub fn set_camera(&mut self, camera: Camera) {
        if !(camera.x.is_finite() && camera.y.is_finite() && camera.zoom.is_finite())
            || camera.zoom <= 0.0
        {
            tracing::warn!("Ignoring invalid camera {:?}", camera);
            return;
        }
        self.camera = Camera {
            zoom: self.clamp_zoom(camera.zoom),
            ..camera
        };
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    /// Sets the surface dimensions (typically called when the window resizes).
    ///
    /// Negative or non-finite sizes are ignored.
    pub fn set_size(&mut self, width: f64, height: f64) -> bool {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            tracing::warn!("Ignoring invalid viewport size {}x{}", width, height);
            return false;
        }
        self.size = ViewportSize::new(width, height);
        true
    }

    /// Converts world coordinates to pixel coordinates.
    ///
    /// ```text
    /// screen_x = (world_x - cam_x) * zoom + width / 2
    /// screen_y = height / 2 - (world_y - cam_y) * zoom
    /// ```
    pub fn world_to_screen(&self, world: Point2D) -> Point2D {
        Point2D::new(
            (world.x - self.camera.x) * self.camera.zoom + self.size.width / 2.0,
            self.size.height / 2.0 - (world.y - self.camera.y) * self.camera.zoom,
        )
    }

    /// Converts pixel coordinates to world coordinates; exact inverse of
    /// [`Viewport::world_to_screen`].
    ///
    /// ```text
    /// world_x = (screen_x - width / 2) / zoom + cam_x
    /// world_y = (height / 2 - screen_y) / zoom + cam_y
    /// ```
    pub fn screen_to_world(&self, screen: Point2D) -> Point2D {
        Point2D::new(
            (screen.x - self.size.width / 2.0) / self.camera.zoom + self.camera.x,
            (self.size.height / 2.0 - screen.y) / self.camera.zoom + self.camera.y,
        )
    }

    /// World rectangle covered by the surface as `(bottom_left, top_right)`.
    pub fn visible_world(&self) -> (Point2D, Point2D) {
        let top_left = self.screen_to_world(Point2D::ORIGIN);
        let bottom_right = self.screen_to_world(Point2D::new(self.size.width, self.size.height));
        (
            Point2D::new(top_left.x, bottom_right.y),
            Point2D::new(bottom_right.x, top_left.y),
        )
    }

    /// Captures the state needed to pan from `screen`.
    pub fn pan_anchor(&self, screen: Point2D) -> PanAnchor {
        PanAnchor {
            screen,
            camera_x: self.camera.x,
            camera_y: self.camera.y,
        }
    }

    /// Moves the camera so the drag from `anchor` to `screen` drags the world
    /// along with the pointer.
    pub fn pan_to(&mut self, anchor: &PanAnchor, screen: Point2D) {
        let dx = (screen.x - anchor.screen.x) / self.camera.zoom;
        let dy = (screen.y - anchor.screen.y) / self.camera.zoom;
        // Screen Y is flipped relative to world Y
        self.camera.x = anchor.camera_x - dx;
        self.camera.y = anchor.camera_y + dy;
    }

    /// Applies a scroll step at `cursor`.
    ///
    /// Positive `delta_y` (scrolling away) zooms out, anything else zooms in.
    pub fn scroll(&mut self, cursor: Point2D, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            self.config.zoom_out_factor
        } else {
            self.config.zoom_in_factor
        };
        self.zoom_at(cursor, factor);
    }

    /// Multiplies zoom by `factor`, keeping the world point under `cursor`
    /// fixed on screen.
    pub fn zoom_at(&mut self, cursor: Point2D, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }

        let before = self.screen_to_world(cursor);
        let zoom = self.clamp_zoom(self.camera.zoom * factor);

        self.camera = Camera {
            x: before.x - (cursor.x - self.size.width / 2.0) / zoom,
            y: before.y - (self.size.height / 2.0 - cursor.y) / zoom,
            zoom,
        };
    }

    /// Centres the viewport on a world coordinate.
    pub fn center_on(&mut self, world: Point2D) {
        self.camera.x = world.x;
        self.camera.y = world.y;
    }

    /// Resets to the origin at 1:1 zoom.
    pub fn reset(&mut self) {
        self.camera = Camera::default();
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.config.min_zoom, self.config.max_zoom)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Centre: ({:.1}, {:.1}) | {}x{}",
            self.camera.zoom, self.camera.x, self.camera.y, self.size.width, self.size.height
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let inverted = ViewportConfig {
            min_zoom: 10.0,
            max_zoom: 1.0,
            ..ViewportConfig::default()
        };
        let mut vp = Viewport::with_config(800.0, 600.0, inverted);
        assert_eq!(*vp.config(), ViewportConfig::default());
        vp.scroll(Point2D::new(400.0, 300.0), -1.0);
        assert!((vp.zoom() - constants::ZOOM_IN_FACTOR).abs() < 1e-12);

        let nan = ViewportConfig {
            max_zoom: f64::NAN,
            ..ViewportConfig::default()
        };
        let mut vp = Viewport::with_config(800.0, 600.0, nan);
        vp.set_camera(Camera::new(0.0, 0.0, 1000.0));
        assert_eq!(vp.zoom(), constants::MAX_ZOOM);
    }

    #[test]
    fn test_invalid_camera_is_ignored() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_camera(Camera::new(5.0, 5.0, f64::NAN));
        vp.set_camera(Camera::new(5.0, 5.0, -2.0));
        vp.set_camera(Camera::new(f64::INFINITY, 0.0, 2.0));
        assert_eq!(vp.camera(), Camera::default());
    }

    #[test]
    fn test_origin_at_centre() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.world_to_screen(Point2D::ORIGIN), Point2D::new(400.0, 300.0));
    }

    #[test]
    fn test_positive_world_y_goes_up() {
        let vp = Viewport::new(800.0, 600.0);
        let up = vp.world_to_screen(Point2D::new(0.0, 100.0));
        assert_eq!(up, Point2D::new(400.0, 200.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::new(800.0, 600.0);
        for _ in 0..200 {
            vp.zoom_at(Point2D::new(10.0, 10.0), 1.1);
        }
        assert_eq!(vp.zoom(), 100.0);
        for _ in 0..400 {
            vp.zoom_at(Point2D::new(10.0, 10.0), 0.9);
        }
        assert_eq!(vp.zoom(), 0.05);
    }

    #[test]
    fn test_invalid_size_is_ignored() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(!vp.set_size(-1.0, 10.0));
        assert!(!vp.set_size(f64::NAN, 10.0));
        assert_eq!(vp.size(), ViewportSize::new(800.0, 600.0));
    }

    #[test]
    fn test_visible_world_at_unit_zoom() {
        let vp = Viewport::new(800.0, 600.0);
        let (bl, tr) = vp.visible_world();
        assert_eq!(bl, Point2D::new(-400.0, -300.0));
        assert_eq!(tr, Point2D::new(400.0, 300.0));
    }
}
