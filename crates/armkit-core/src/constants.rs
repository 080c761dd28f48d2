//! Shared constants.

/// Default length of the first link in world units.
pub const DEFAULT_L1: f64 = 100.0;

/// Default length of the second link in world units.
pub const DEFAULT_L2: f64 = 100.0;

/// Default base joint angle in degrees.
pub const DEFAULT_THETA0: f64 = 80.0;

/// Default elbow joint angle in degrees.
pub const DEFAULT_THETA1: f64 = -45.0;

/// Grid spacing in world units.
pub const GRID_SPACING: f64 = 50.0;

/// Smallest allowed zoom (pixels per world unit).
pub const MIN_ZOOM: f64 = 0.05;

/// Largest allowed zoom (pixels per world unit).
pub const MAX_ZOOM: f64 = 100.0;

/// Multiplier applied when scrolling towards the user.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Multiplier applied when scrolling away from the user.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Baud rate spoken by the servo controller firmware.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Buffer size for the scene event broadcast channel.
pub const EVENT_BUFFER_SIZE: usize = 64;
