//! Constructor-time configuration
//!
//! The core only reads `asset_root`. Everything else configures the platform
//! (window, renderer) and the frame pacing, with defaults matching a
//! 1024x768 window at roughly 60 frames per second.

use crate::timing::MAX_DELTA_SECONDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Window Title".to_string(),
            x: 100,
            y: 100,
            width: 1024,
            height: 768,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Prefix every texture path is resolved against
    pub asset_root: PathBuf,
    pub window: WindowConfig,
    /// RGB used to clear the frame buffer
    pub clear_color: (u8, u8, u8),
    /// Minimum wall time between two updates
    pub min_frame_ms: u32,
    /// Upper bound on the delta time handed to actors, in seconds. Values
    /// above `timing::MAX_DELTA_SECONDS` are lowered to it.
    pub max_delta_seconds: f32,
    /// SDL scancode name of the key that stops the loop
    pub exit_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            asset_root: PathBuf::from("."),
            window: WindowConfig::default(),
            clear_color: (0, 0, 0),
            min_frame_ms: 16,
            max_delta_seconds: MAX_DELTA_SECONDS,
            exit_key: "Escape".to_string(),
        }
    }
}

impl GameConfig {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        GameConfig {
            asset_root: asset_root.into(),
            ..GameConfig::default()
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.min_frame_ms))
    }
}
