//! # ArmKit
//!
//! Interactive two-link inverse kinematics with an optional serial link to
//! the servo controller.
//!
//! ## Architecture
//!
//! ArmKit is organized as a workspace with multiple crates:
//!
//! 1. **armkit-core** - Shared types, errors, constants, scene events
//! 2. **armkit-kinematics** - IK solver, forward kinematics, reach helpers
//! 3. **armkit-visualizer** - Viewport transform, pointer handling, SVG output
//! 4. **armkit-communication** - Servo frame codec, serial ports, device channel
//! 5. **armkit-settings** - TOML/JSON configuration
//! 6. **armkit-ui** - Input widget models and the session controller
//! 7. **armkit** - This crate: logging setup and the command-line tool

pub mod commands;

pub use armkit_communication::{
    list_ports, AngleSink, ConnectionParams, DeviceChannel, SerialPortInfo, ServoCommand,
};
pub use armkit_core::{
    ConfigError, ConnectionError, Error, EventDispatcher, JointAngles, KinematicsError,
    LinkLengths, Point2D, ProtocolError, Result, SceneEvent,
};
pub use armkit_kinematics::{forward, solve, Solver, TwoLinkSolver};
pub use armkit_settings::Config;
pub use armkit_ui::{ClickOutcome, Field, NumberInput, Session};
pub use armkit_visualizer::{Camera, Renderer, Scene, SvgRenderer, Viewport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Maps a `-v` count to the default log level.
pub fn verbosity_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout for command results
/// - RUST_LOG environment variable support
/// - `level` as the baseline directive
pub fn init_logging(level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
