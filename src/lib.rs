//! A small real-time 2D scene skeleton on SDL2.
//!
//! Actors are built from components, driven by a paced update/render loop,
//! and draw textures from a path-keyed cache owned by the `Game`.

pub mod actor;
pub mod component;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod game;
pub mod platform;
pub mod render;
pub mod sprite;
pub mod texture;
pub mod timing;

pub use actor::{Actor, ActorBehavior, ActorCore, ActorId, ActorState};
pub use component::{Behavior, Component, ComponentId, DEFAULT_UPDATE_ORDER};
pub use config::GameConfig;
pub use context::FrameContext;
pub use error::{InitializationError, ResourceLoadError};
pub use game::Game;
pub use texture::TextureHandle;
