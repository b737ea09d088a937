use crate::actor::ActorCore;
use crate::component::Behavior;
use crate::error::RenderError;
use crate::render::RenderTarget;
use crate::texture::TextureHandle;
use sdl2::rect::Rect;

/// Draws one texture centered on its actor, scaled and rotated with it.
///
/// Register it with `Actor::add_sprite`. A sprite without a texture (for
/// example after a failed load) is kept but draws nothing.
#[derive(Debug, Clone, Default)]
pub struct SpriteComponent {
    texture: Option<TextureHandle>,
    width: u32,
    height: u32,
}

impl SpriteComponent {
    pub fn new() -> Self {
        SpriteComponent::default()
    }

    pub fn with_texture(texture: TextureHandle, size: (u32, u32)) -> Self {
        let mut sprite = SpriteComponent::new();
        sprite.set_texture(texture, size);
        sprite
    }

    pub fn set_texture(&mut self, texture: TextureHandle, size: (u32, u32)) {
        self.texture = Some(texture);
        self.width = size.0;
        self.height = size.1;
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Screen rectangle covered by the texture for the actor's current transform.
    /// Negative scales are drawn at their magnitude.
    pub fn dest_rect(&self, actor: &ActorCore) -> Rect {
        let scale = actor.scale().abs();
        let width = (self.width as f32 * scale) as u32;
        let height = (self.height as f32 * scale) as u32;
        let position = actor.position();

        Rect::new(
            (position.x - width as f32 / 2.0) as i32,
            (position.y - height as f32 / 2.0) as i32,
            width,
            height,
        )
    }
}

impl Behavior for SpriteComponent {
    fn draw(&self, actor: &ActorCore, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        let Some(texture) = self.texture else {
            return Ok(());
        };
        // Actor rotation is counter-clockwise radians, the renderer wants clockwise degrees
        let angle = -f64::from(actor.rotation()).to_degrees();
        target.draw_texture(texture, self.dest_rect(actor), angle)
    }
}
