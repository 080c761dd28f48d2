//! # ArmKit Settings
//!
//! Configuration for arm geometry, the view and the device link, loaded from
//! TOML or JSON files in the platform config directory.

pub mod config;

pub use config::{
    default_config_path, ArmSettings, Config, ConnectionSettings, WindowSettings, CONFIG_FILE_NAME,
};
