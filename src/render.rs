//! Draw surface handed to actors and their drawable components.
//!
//! Components only know `TextureHandle`s, so `RenderTarget` is object safe and
//! free of backend types. `DrawContext` adapts a `Renderer` plus the texture
//! cache to it for the duration of one frame.

use crate::error::RenderError;
use crate::platform::Renderer;
use crate::texture::{TextureCache, TextureHandle};
use sdl2::rect::Rect;

pub trait RenderTarget {
    /// Draw a whole texture into `dest`, rotated clockwise by `angle` degrees.
    fn draw_texture(&mut self, texture: TextureHandle, dest: Rect, angle: f64) -> Result<(), RenderError>;

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)>;
}

pub struct DrawContext<'a, R: Renderer> {
    renderer: &'a mut R,
    textures: &'a TextureCache<R::Texture>,
}

impl<'a, R: Renderer> DrawContext<'a, R> {
    pub fn new(renderer: &'a mut R, textures: &'a TextureCache<R::Texture>) -> Self {
        DrawContext { renderer, textures }
    }
}

impl<R: Renderer> RenderTarget for DrawContext<'_, R> {
    fn draw_texture(&mut self, texture: TextureHandle, dest: Rect, angle: f64) -> Result<(), RenderError> {
        let texture = self
            .textures
            .get(texture)
            .ok_or(RenderError::UnknownTexture(texture.index()))?;
        self.renderer
            .draw_texture(texture, dest, angle)
            .map_err(RenderError::Backend)
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures
            .get(texture)
            .map(|texture| self.renderer.texture_size(texture))
    }
}
