//! Platform collaborators
//!
//! The game core never talks to SDL directly. It goes through three traits:
//!
//! - `PlatformContext`: input events, keyboard snapshot, millisecond clock
//! - `ImageDecoder`: image file → surface → render-ready texture
//! - `Renderer`: clear / present / draw a texture
//!
//! `Platform` bundles all three. `sdl::SdlPlatform` is the real backend;
//! tests use `mock::MockPlatform`.

use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::collections::HashSet;
use std::path::Path;

pub mod sdl;

#[cfg(test)]
pub mod mock;

/// Snapshot of which keys are held down at the moment it was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: HashSet<Scancode>,
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    pub fn from_pressed(keys: impl IntoIterator<Item = Scancode>) -> Self {
        KeyState {
            pressed: keys.into_iter().collect(),
        }
    }

    pub fn is_pressed(&self, key: Scancode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn press(&mut self, key: Scancode) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Scancode) {
        self.pressed.remove(&key);
    }
}

pub trait PlatformContext {
    /// Drain every input event queued since the last call.
    fn poll_events(&mut self) -> Vec<Event>;

    fn key_state(&self) -> KeyState;

    /// Milliseconds since the platform was initialized. May wrap.
    fn ticks(&self) -> u32;
}

pub trait ImageDecoder {
    /// Decoded pixels. Dropping a surface frees it.
    type Surface;
    type Texture;

    fn load_image(&mut self, path: &Path) -> Result<Self::Surface, String>;

    fn create_texture(&mut self, surface: &Self::Surface) -> Result<Self::Texture, String>;

    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32);

    /// Free a texture made by `create_texture`. Must run while the renderer
    /// that created it is still alive.
    fn destroy_texture(&mut self, texture: Self::Texture);
}

pub trait Renderer: ImageDecoder {
    fn set_draw_color(&mut self, color: Color);

    fn clear(&mut self);

    fn present(&mut self);

    /// Copy the whole texture into `dest`, rotated clockwise by `angle` degrees
    /// around the destination center.
    fn draw_texture(&mut self, texture: &Self::Texture, dest: Rect, angle: f64) -> Result<(), String>;
}

pub trait Platform: PlatformContext + Renderer {}

impl<T: PlatformContext + Renderer> Platform for T {}
