use crate::actor::{ActorCore, ActorId};
use crate::context::FrameContext;
use crate::error::RenderError;
use crate::platform::KeyState;
use crate::render::RenderTarget;

/// Update order given to components that don't ask for a specific slot.
/// Lower orders update first.
pub const DEFAULT_UPDATE_ORDER: i32 = 100;

/// Identifies a component within its owning actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u32);

impl ComponentId {
    pub(crate) fn new(raw: u32) -> Self {
        ComponentId(raw)
    }
}

/// Per-component behavior. Every hook defaults to doing nothing.
///
/// Hooks receive the owning actor's core (state and transform) rather than
/// the whole actor, so a component can move or kill its actor but cannot
/// reach the actor's other components.
///
/// `update` and `process_input` also get the frame's `FrameContext`, which is
/// how a component loads textures or spawns and removes other actors while
/// the game is in the middle of walking its actor list.
pub trait Behavior {
    fn update(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _dt: f32) {}

    fn process_input(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _keys: &KeyState) {}

    /// Only called for components registered as sprites.
    fn draw(&self, _actor: &ActorCore, _target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        Ok(())
    }
}

/// A behavior attached to exactly one actor.
///
/// Components are only built by `Actor::add_component`/`Actor::add_sprite`,
/// so `owner` always names the actor whose list holds this component.
pub struct Component {
    id: ComponentId,
    owner: ActorId,
    update_order: i32,
    behavior: Box<dyn Behavior>,
}

impl Component {
    pub(crate) fn new(id: ComponentId, owner: ActorId, update_order: i32, behavior: Box<dyn Behavior>) -> Self {
        Component {
            id,
            owner,
            update_order,
            behavior,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn update_order(&self) -> i32 {
        self.update_order
    }

    pub fn update(&mut self, actor: &mut ActorCore, ctx: &mut FrameContext, dt: f32) {
        self.behavior.update(actor, ctx, dt);
    }

    pub fn process_input(&mut self, actor: &mut ActorCore, ctx: &mut FrameContext, keys: &KeyState) {
        self.behavior.process_input(actor, ctx, keys);
    }

    pub fn draw(&self, actor: &ActorCore, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        self.behavior.draw(actor, target)
    }

    pub(crate) fn into_behavior(self) -> Box<dyn Behavior> {
        self.behavior
    }
}
