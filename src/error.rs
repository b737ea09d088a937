//! Error types for the game lifecycle
//!
//! Two failure families matter to callers:
//! - `InitializationError`: fatal, returned by `Game::initialize`
//! - `ResourceLoadError`: recoverable, returned by `Game::get_texture`
//!
//! Rendering and configuration have their own small error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The acquisition step that was running when initialization failed.
///
/// Steps run in declaration order, so a failure at `Renderer` means
/// `Sdl`, `Video`, `Timer` and `Window` were acquired (and have been released).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    Sdl,
    Video,
    Timer,
    Window,
    Renderer,
    Image,
    Events,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            InitStage::Sdl => "SDL",
            InitStage::Video => "video subsystem",
            InitStage::Timer => "timer subsystem",
            InitStage::Window => "window",
            InitStage::Renderer => "renderer",
            InitStage::Image => "image subsystem",
            InitStage::Events => "event pump",
        };
        write!(f, "{}", name)
    }
}

/// A platform or subsystem could not be acquired during `Game::initialize`.
#[derive(Debug, Clone, Error)]
#[error("Unable to initialize {stage}: {message}")]
pub struct InitializationError {
    pub stage: InitStage,
    pub message: String,
}

impl InitializationError {
    pub fn new(stage: InitStage, message: impl Into<String>) -> Self {
        InitializationError {
            stage,
            message: message.into(),
        }
    }
}

/// An image could not be turned into a texture.
#[derive(Debug, Clone, Error)]
pub enum ResourceLoadError {
    #[error("Failed to load texture file {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to convert surface to texture for {}: {reason}", .path.display())]
    Convert { path: PathBuf, reason: String },
}

impl ResourceLoadError {
    /// The resolved path the load was attempted with.
    pub fn path(&self) -> &PathBuf {
        match self {
            ResourceLoadError::Decode { path, .. } | ResourceLoadError::Convert { path, .. } => path,
        }
    }
}

/// A draw call failed.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Unknown texture handle {0}")]
    UnknownTexture(usize),

    #[error("Render call failed: {0}")]
    Backend(String),
}

impl From<RenderError> for String {
    fn from(error: RenderError) -> Self {
        error.to_string()
    }
}
