//! Initial scene content

use crate::actor::{ActorBehavior, ActorId};
use crate::component::DEFAULT_UPDATE_ORDER;
use crate::game::Game;
use crate::platform::Platform;
use crate::sprite::SpriteComponent;
use glam::Vec2;

pub const BACKGROUND_TEXTURE: &str = "Assets/Farback01.png";
pub const BACKGROUND_POSITION: Vec2 = Vec2::new(512.0, 384.0);

/// Full-screen backdrop. All of its work is done by its sprite.
pub struct Background;

impl ActorBehavior for Background {}

/// Create the actors the scene starts with.
pub fn load_data<P: Platform>(game: &mut Game<P>) {
    spawn_background(game);
}

/// A background that fails to load still gets its actor, just with an empty sprite.
pub fn spawn_background<P: Platform>(game: &mut Game<P>) -> ActorId {
    let sprite = match game.get_texture(BACKGROUND_TEXTURE) {
        Ok(texture) => {
            let size = game.texture_size(texture).unwrap_or_default();
            SpriteComponent::with_texture(texture, size)
        }
        Err(e) => {
            log::warn!("Background will not be drawn: {}", e);
            SpriteComponent::new()
        }
    };

    let actor = game.create_actor(Box::new(Background));
    actor.set_position(BACKGROUND_POSITION);
    actor.add_sprite(DEFAULT_UPDATE_ORDER, Box::new(sprite));
    actor.id()
}
