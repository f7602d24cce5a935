//! Configuration for resized
//!
//! Loads configuration from TOML file at `~/.config/resized/config.toml`
//! Auto-generates default config file on first run if missing.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub regions: RegionsConfig,
    pub placement: PlacementConfig,
    pub channel: ChannelConfig,
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults", config_path);
            // Auto-generate default config file
            if let Err(e) = Self::save_default(&config_path) {
                warn!("Failed to create default config file: {}", e);
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config = Self::from_toml(&content)?;

        info!("Configuration loaded from {:?}", config_path);
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the grid arithmetic cannot represent
    pub fn validate(&self) -> Result<()> {
        self.regions.left.validate().context("Invalid [regions.left]")?;
        self.regions.right.validate().context("Invalid [regions.right]")?;
        ensure!(
            self.placement.terminal_allowance >= 0,
            "placement.terminal_allowance must not be negative"
        );
        Ok(())
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("resized");

        Ok(config_dir.join("config.toml"))
    }

    /// Save default configuration to file
    fn save_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;

        fs::write(path, toml_string)
            .context("Failed to write default config file")?;

        info!("Created default config file at {:?}", path);
        Ok(())
    }
}

/// The two snapping regions, side by side on one virtual desktop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionsConfig {
    pub left: RegionConfig,
    pub right: RegionConfig,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            left: RegionConfig {
                width: 1280,
                height: 1024,
                top_padding: 24,
                x_offset: 0,
            },
            right: RegionConfig {
                width: 1280,
                height: 1024,
                top_padding: 0,
                x_offset: 1280,
            },
        }
    }
}

/// One monitor-sized area of the desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels, including the top padding
    pub height: u32,
    /// Rows reserved at the top (panels)
    pub top_padding: u32,
    /// Left edge of the region in root coordinates
    pub x_offset: i32,
}

impl RegionConfig {
    /// Largest width or height; three times it still fits an `i32`
    pub const MAX_EXTENT: u32 = (i32::MAX / 3) as u32;

    fn validate(&self) -> Result<()> {
        ensure!(
            (1..=Self::MAX_EXTENT).contains(&self.width),
            "width must be between 1 and {}",
            Self::MAX_EXTENT
        );
        ensure!(
            (1..=Self::MAX_EXTENT).contains(&self.height),
            "height must be between 1 and {}",
            Self::MAX_EXTENT
        );
        ensure!(
            self.top_padding < self.height,
            "top_padding must be smaller than height"
        );
        ensure!(
            self.x_offset.checked_add(self.width as i32).is_some(),
            "x_offset + width overflows"
        );
        Ok(())
    }
}

/// Placement tweaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Windows with exactly this title get `terminal_allowance` pixels less height
    pub terminal_title: String,
    pub terminal_allowance: i32,
    /// Gravity sent with `_NET_MOVERESIZE_WINDOW` (1 = NorthWest)
    pub gravity: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            terminal_title: "Terminal".to_string(),
            terminal_allowance: 16,
            gravity: 1,
        }
    }
}

/// Command channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub fifo_path: PathBuf,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            fifo_path: PathBuf::from(resized_ipc::DEFAULT_FIFO_PATH),
        }
    }
}
