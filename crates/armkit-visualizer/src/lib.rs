//! # ArmKit Visualizer
//!
//! 2D view of the arm's kinematic plane.
//!
//! - [`viewport`]: camera state and world/screen conversion with pan and
//!   zoom-toward-cursor
//! - [`interaction`]: pointer state machine separating drags from clicks
//! - [`scene`]: screen-space geometry for one frame
//! - [`canvas_renderer`]: SVG path output and the [`Renderer`] seam

pub mod camera;
pub mod canvas_renderer;
pub mod interaction;
pub mod scene;
pub mod viewport;

pub use camera::Camera;
pub use canvas_renderer::{
    render_arm_to_path, render_axes_to_path, render_envelope_to_path, render_grid_to_path,
    Renderer, SvgRenderer,
};
pub use interaction::{PointerState, PointerTracker, PointerUp};
pub use scene::{Rect, Scene, Segment};
pub use viewport::{PanAnchor, Viewport, ViewportConfig, ViewportSize};
