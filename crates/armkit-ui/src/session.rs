//! Interactive session state.
//!
//! [`Session`] is the single owner of the arm model, the viewport, the
//! pointer tracker and the device sink. Every input event is handled
//! sequentially under `&mut self`; each state change is published as a
//! [`SceneEvent`] and marks the session dirty so the host redraws.

use crate::number_input::NumberInput;
use armkit_communication::{AngleSink, NullSink};
use armkit_core::{EventDispatcher, JointAngles, KinematicsError, LinkLengths, Point2D, SceneEvent};
use armkit_kinematics::{Solver, TwoLinkSolver};
use armkit_settings::Config;
use armkit_visualizer::{Camera, PointerTracker, PointerUp, Renderer, Scene, Viewport, ViewportConfig};
use std::fmt;

/// Editable numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    L1,
    L2,
    Theta0,
    Theta1,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::L1, Field::L2, Field::Theta0, Field::Theta1];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::L1 => write!(f, "L1"),
            Field::L2 => write!(f, "L2"),
            Field::Theta0 => write!(f, "θ0"),
            Field::Theta1 => write!(f, "θ1"),
        }
    }
}

/// Result of a click on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The click ended a drag and was ignored.
    Suppressed,
    /// The arm moved to the clicked point.
    Solved(JointAngles),
    /// The clicked point is out of reach; the pose is unchanged.
    Unreachable(KinematicsError),
    /// The solver returned angles the session refused; the pose is unchanged.
    Rejected(JointAngles),
}

#[derive(Debug, Clone, Default)]
struct Inputs {
    l1: NumberInput,
    l2: NumberInput,
    theta0: NumberInput,
    theta1: NumberInput,
}

impl Inputs {
    fn new(links: &LinkLengths, angles: &JointAngles) -> Self {
        Self {
            l1: NumberInput::new(links.l1()),
            l2: NumberInput::new(links.l2()),
            theta0: NumberInput::new(angles.theta0),
            theta1: NumberInput::new(angles.theta1),
        }
    }

    fn get(&self, field: Field) -> &NumberInput {
        match field {
            Field::L1 => &self.l1,
            Field::L2 => &self.l2,
            Field::Theta0 => &self.theta0,
            Field::Theta1 => &self.theta1,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut NumberInput {
        match field {
            Field::L1 => &mut self.l1,
            Field::L2 => &mut self.l2,
            Field::Theta0 => &mut self.theta0,
            Field::Theta1 => &mut self.theta1,
        }
    }
}

pub struct Session {
    links: LinkLengths,
    angles: JointAngles,
    viewport: Viewport,
    pointer: PointerTracker,
    inputs: Inputs,
    solver: Box<dyn Solver>,
    sink: Box<dyn AngleSink>,
    events: EventDispatcher,
    dirty: bool,
}

impl Session {
    /// Creates a session with the default arm, viewport limits and no device.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_viewport(Viewport::new(width, height))
    }

    fn with_viewport(viewport: Viewport) -> Self {
        let links = LinkLengths::default();
        let angles = JointAngles::default();
        Self {
            inputs: Inputs::new(&links, &angles),
            links,
            angles,
            viewport,
            pointer: PointerTracker::new(),
            solver: Box::new(TwoLinkSolver),
            sink: Box::new(NullSink),
            events: EventDispatcher::default(),
            dirty: true,
        }
    }

    /// Builds a session from a validated configuration.
    pub fn from_config(config: &Config) -> armkit_core::Result<Self> {
        config.validate()?;
        let viewport_config: ViewportConfig = config.viewport;
        let mut session = Self::with_viewport(Viewport::with_config(
            config.window.width,
            config.window.height,
            viewport_config,
        ));
        session.links = config.arm.links()?;
        session.inputs = Inputs::new(&session.links, &session.angles);
        Ok(session)
    }

    pub fn with_solver(mut self, solver: Box<dyn Solver>) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Replaces the device sink and sends it the current pose.
    pub fn set_sink(&mut self, sink: Box<dyn AngleSink>) {
        self.sink = sink;
        self.send_current_angles();
    }

    pub fn links(&self) -> LinkLengths {
        self.links
    }

    pub fn angles(&self) -> JointAngles {
        self.angles
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn is_device_connected(&self) -> bool {
        self.sink.is_connected()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn publish(&mut self, event: SceneEvent) {
        if event.requires_redraw() {
            self.dirty = true;
        }
        self.events.publish(event);
    }

    fn publish_camera(&mut self) {
        let camera = self.viewport.camera();
        self.publish(SceneEvent::CameraChanged {
            x: camera.x,
            y: camera.y,
            zoom: camera.zoom,
        });
    }

    fn send_current_angles(&mut self) {
        self.sink.send_angles(self.angles.theta0, self.angles.theta1);
    }

    /// Sets link 1. Non-positive or non-finite lengths are ignored.
    pub fn set_l1(&mut self, l1: f64) -> bool {
        match self.links.with_l1(l1) {
            Ok(links) => self.apply_links(links),
            Err(e) => {
                tracing::warn!("Ignoring link length: {}", e);
                false
            }
        }
    }

    /// Sets link 2. Non-positive or non-finite lengths are ignored.
    pub fn set_l2(&mut self, l2: f64) -> bool {
        match self.links.with_l2(l2) {
            Ok(links) => self.apply_links(links),
            Err(e) => {
                tracing::warn!("Ignoring link length: {}", e);
                false
            }
        }
    }

    fn apply_links(&mut self, links: LinkLengths) -> bool {
        self.links = links;
        self.inputs.l1.set_value(links.l1());
        self.inputs.l2.set_value(links.l2());
        self.publish(SceneEvent::LinksChanged(links));
        true
    }

    pub fn set_theta0(&mut self, theta0: f64) -> bool {
        self.set_angles(JointAngles::new(theta0, self.angles.theta1))
    }

    pub fn set_theta1(&mut self, theta1: f64) -> bool {
        self.set_angles(JointAngles::new(self.angles.theta0, theta1))
    }

    /// Replaces the pose and forwards it to the device. Non-finite angles are
    /// ignored.
    pub fn set_angles(&mut self, angles: JointAngles) -> bool {
        if !angles.is_finite() {
            tracing::warn!("Ignoring non-finite angles {}", angles);
            return false;
        }
        self.angles = angles;
        self.inputs.theta0.set_value(angles.theta0);
        self.inputs.theta1.set_value(angles.theta1);
        self.send_current_angles();
        self.publish(SceneEvent::AnglesChanged(angles));
        true
    }

    /// Text shown in an input field.
    pub fn field_text(&self, field: Field) -> &str {
        self.inputs.get(field).text()
    }

    /// Handles typing into a field. Parsed values are applied immediately.
    pub fn input(&mut self, field: Field, text: &str) -> bool {
        let Some(value) = self.inputs.get_mut(field).input(text) else {
            tracing::trace!("{} input {:?} is not a number", field, text);
            return false;
        };
        match field {
            Field::L1 => self.set_l1(value),
            Field::L2 => self.set_l2(value),
            Field::Theta0 => self.set_theta0(value),
            Field::Theta1 => self.set_theta1(value),
        }
    }

    /// Reverts a field's text to the current value.
    pub fn blur(&mut self, field: Field) {
        self.inputs.get_mut(field).blur();
    }

    pub fn pointer_down(&mut self, screen: Point2D) {
        self.pointer.pointer_down(&self.viewport, screen);
    }

    pub fn pointer_move(&mut self, screen: Point2D) {
        if self.pointer.pointer_move(&mut self.viewport, screen) {
            self.publish_camera();
        }
    }

    pub fn pointer_up(&mut self) -> PointerUp {
        self.pointer.pointer_up()
    }

    /// Solves for the clicked point unless the click ends a drag.
    pub fn click(&mut self, screen: Point2D) -> ClickOutcome {
        let Some(target) = self.pointer.click(&self.viewport, screen) else {
            return ClickOutcome::Suppressed;
        };

        match self.solver.solve(target, &self.links) {
            Ok(angles) => {
                tracing::debug!("Target {} solved to {}", target, angles);
                if self.set_angles(angles) {
                    ClickOutcome::Solved(angles)
                } else {
                    ClickOutcome::Rejected(angles)
                }
            }
            Err(e) => {
                tracing::warn!("Target {} rejected: {}", target, e);
                ClickOutcome::Unreachable(e)
            }
        }
    }

    /// Moves the camera directly, zoom clamped to the viewport limits.
    pub fn set_camera(&mut self, camera: Camera) {
        self.viewport.set_camera(camera);
        self.publish_camera();
    }

    pub fn scroll(&mut self, screen: Point2D, delta_y: f64) {
        self.viewport.scroll(screen, delta_y);
        self.publish_camera();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let size = self.viewport.size();
        if size.width == width && size.height == height {
            return;
        }
        if self.viewport.set_size(width, height) {
            self.publish(SceneEvent::Resized { width, height });
        }
    }

    pub fn scene(&self) -> Scene {
        Scene::build(&self.viewport, &self.links, &self.angles)
    }

    /// Draws the current scene, first matching the viewport to the
    /// renderer's surface.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        let size = renderer.size();
        self.resize(size.width, size.height);
        renderer.draw(&self.scene());
        self.dirty = false;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("links", &self.links)
            .field("angles", &self.angles)
            .field("viewport", &self.viewport)
            .field("device_connected", &self.sink.is_connected())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
