//! Scene event system
//!
//! Provides:
//! - Event types for every mutation that requires a redraw
//! - Event dispatcher for publishing events to subscribers

use crate::types::{JointAngles, LinkLengths};
use tokio::sync::broadcast;

/// Scene event types
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Camera panned or zoomed
    CameraChanged {
        /// World x at the viewport centre.
        x: f64,
        /// World y at the viewport centre.
        y: f64,
        /// Pixels per world unit.
        zoom: f64,
    },
    /// Viewport resized
    Resized {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
    },
    /// Link lengths changed
    LinksChanged(LinkLengths),
    /// Joint angles changed
    AnglesChanged(JointAngles),
    /// Device connected on the given port
    Connected(String),
    /// Device disconnected
    Disconnected,
}

impl SceneEvent {
    /// True for events that change what the renderer must draw.
    pub fn requires_redraw(&self) -> bool {
        !matches!(self, SceneEvent::Connected(_) | SceneEvent::Disconnected)
    }
}

impl std::fmt::Display for SceneEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneEvent::CameraChanged { x, y, zoom } => {
                write!(f, "Camera: ({:.2}, {:.2}) @ {:.3}x", x, y, zoom)
            }
            SceneEvent::Resized { width, height } => write!(f, "Resized to {}x{}", width, height),
            SceneEvent::LinksChanged(links) => {
                write!(f, "Links: l1={} l2={}", links.l1(), links.l2())
            }
            SceneEvent::AnglesChanged(angles) => write!(f, "Angles: {}", angles),
            SceneEvent::Connected(port) => write!(f, "Connected to {}", port),
            SceneEvent::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: broadcast::Sender<SceneEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<SceneEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers that received it. Publishing with
    /// no subscribers is not an error.
    pub fn publish(&self, event: SceneEvent) -> usize {
        tracing::trace!("scene event: {}", event);
        self.tx.send(event).unwrap_or(0)
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(crate::constants::EVENT_BUFFER_SIZE)
    }
}
