//! Configuration management.
//!
//! A config file is TOML or JSON, chosen by extension. Every section has
//! defaults so a partial file only overrides what it names.

use armkit_communication::ConnectionParams;
use armkit_core::{constants, ConfigError, LinkLengths, Result};
use armkit_visualizer::ViewportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Arm geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmSettings {
    /// Length of link 1 (world units)
    pub l1: f64,
    /// Length of link 2 (world units)
    pub l2: f64,
}

impl Default for ArmSettings {
    fn default() -> Self {
        Self {
            l1: constants::DEFAULT_L1,
            l2: constants::DEFAULT_L2,
        }
    }
}

impl ArmSettings {
    pub fn links(&self) -> Result<LinkLengths> {
        Ok(LinkLengths::new(self.l1, self.l2)?)
    }
}

/// Initial drawing surface size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Device link settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Port to open; `None` leaves the device disconnected
    pub port: Option<String>,
    pub baud_rate: u32,
    pub timeout_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        let params = ConnectionParams::default();
        Self {
            port: None,
            baud_rate: params.baud_rate,
            timeout_ms: params.timeout_ms,
        }
    }
}

impl ConnectionSettings {
    /// Parameters for opening `port`, if one is configured.
    pub fn params(&self) -> Option<ConnectionParams> {
        self.port.as_ref().map(|port| ConnectionParams {
            port: port.clone(),
            baud_rate: self.baud_rate,
            timeout_ms: self.timeout_ms,
        })
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arm: ArmSettings,
    pub window: WindowSettings,
    pub viewport: ViewportConfig,
    pub connection: ConnectionSettings,
}

fn invalid(key: &str, reason: &str) -> armkit_core::Error {
    ConfigError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn positive(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, "must be a finite number > 0"))
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::Format(format!("Invalid JSON config: {}", e)))?,
            Format::Toml => toml::from_str(&content)
                .map_err(|e| ConfigError::Format(format!("Invalid TOML config: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Format(format!("Failed to serialize config: {}", e)))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Format(format!("Failed to serialize config: {}", e)))?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        positive("arm.l1", self.arm.l1)?;
        positive("arm.l2", self.arm.l2)?;

        positive("window.width", self.window.width)?;
        positive("window.height", self.window.height)?;

        let vp = &self.viewport;
        positive("viewport.min_zoom", vp.min_zoom)?;
        positive("viewport.max_zoom", vp.max_zoom)?;
        if vp.min_zoom > vp.max_zoom {
            return Err(invalid("viewport.min_zoom", "must not exceed max_zoom"));
        }
        positive("viewport.zoom_in_factor", vp.zoom_in_factor)?;
        positive("viewport.zoom_out_factor", vp.zoom_out_factor)?;
        positive("viewport.grid_spacing", vp.grid_spacing)?;

        if self.connection.baud_rate == 0 {
            return Err(invalid("connection.baud_rate", "must be > 0"));
        }
        if self.connection.timeout_ms == 0 {
            return Err(invalid("connection.timeout_ms", "must be > 0"));
        }
        if self.connection.port.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(invalid("connection.port", "must not be empty"));
        }

        Ok(())
    }
}

/// `<platform config dir>/armkit/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("armkit").join(CONFIG_FILE_NAME))
        .ok_or_else(|| ConfigError::NoConfigDirectory.into())
}
