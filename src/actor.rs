//! Actors: positioned entities composed of components
//!
//! An `Actor` owns its components outright. Components are kept sorted by
//! update order at insertion time (stable for equal orders), so the per-frame
//! update is a plain walk over the list. A second list, `sprites`, names the
//! components that take part in the draw pass, in registration order.
//!
//! Per-actor customization goes through an `ActorBehavior` strategy chosen when
//! the actor is created, instead of subclassing.

use crate::component::{Behavior, Component, ComponentId};
use crate::context::FrameContext;
use crate::error::RenderError;
use crate::platform::KeyState;
use crate::render::RenderTarget;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    pub(crate) fn new(raw: u64) -> Self {
        ActorId(raw)
    }
}

/// Lifecycle state.
///
/// `Active` and `Paused` switch freely; either can become `Dead`, and `Dead`
/// never changes again. A dead actor is removed on the next update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    Active,
    Paused,
    Dead,
}

impl ActorState {
    pub fn can_transition_to(self, next: ActorState) -> bool {
        !matches!(self, ActorState::Dead) || next == ActorState::Dead
    }
}

/// The part of an actor its components may touch: identity, state, transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorCore {
    id: ActorId,
    state: ActorState,
    position: Vec2,
    scale: f32,
    /// Radians, counter-clockwise
    rotation: f32,
}

impl ActorCore {
    pub fn new(id: ActorId) -> Self {
        ActorCore {
            id,
            state: ActorState::Active,
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Apply a state change if it is legal. Returns whether the state is now `next`.
    pub fn set_state(&mut self, next: ActorState) -> bool {
        if !self.state.can_transition_to(next) {
            log::warn!("Actor {:?} is dead, ignoring change to {:?}", self.id, next);
            return false;
        }
        self.state = next;
        true
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }
}

/// Actor-level hooks, run after the components. All default to no-ops.
pub trait ActorBehavior {
    fn update_actor(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _dt: f32) {}

    fn actor_input(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _keys: &KeyState) {}

    fn draw_actor(&self, _actor: &ActorCore, _target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        Ok(())
    }
}

/// An actor with no behavior of its own beyond its components.
pub struct PlainActor;

impl ActorBehavior for PlainActor {}

/// A positioned entity in the game world.
///
/// An actor is a transform (position, scale, rotation) plus a lifecycle state,
/// an ordered list of components and an `ActorBehavior` for whatever the actor
/// does beyond its components. It is created by `Game::create_actor` or, from
/// inside a running frame, `FrameContext::spawn_actor`; the game owns it from
/// then on.
///
/// Each frame the game calls `process_input`, `update` and `draw`. Only active
/// actors take input or update; paused ones are still drawn. Marking an actor
/// `Dead` removes it at the end of the next update pass.
///
/// Dropping an actor destroys its components, most recently added first.
pub struct Actor {
    core: ActorCore,
    /// Sorted by update order, stable for equal orders
    components: Vec<Component>,
    sprites: Vec<ComponentId>,
    behavior: Box<dyn ActorBehavior>,
    next_component_id: u32,
}

impl Actor {
    pub(crate) fn new(id: ActorId, behavior: Box<dyn ActorBehavior>) -> Self {
        Actor {
            core: ActorCore::new(id),
            components: Vec::new(),
            sprites: Vec::new(),
            behavior,
            next_component_id: 0,
        }
    }

    pub fn id(&self) -> ActorId {
        self.core.id
    }

    pub fn core(&self) -> &ActorCore {
        &self.core
    }

    pub fn state(&self) -> ActorState {
        self.core.state()
    }

    pub fn set_state(&mut self, state: ActorState) -> bool {
        self.core.set_state(state)
    }

    pub fn position(&self) -> Vec2 {
        self.core.position()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.core.set_position(position);
    }

    pub fn scale(&self) -> f32 {
        self.core.scale()
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.core.set_scale(scale);
    }

    pub fn rotation(&self) -> f32 {
        self.core.rotation()
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.core.set_rotation(rotation);
    }

    /// Advance the actor by `dt` seconds. Does nothing unless the actor is active.
    pub fn update(&mut self, ctx: &mut FrameContext, dt: f32) {
        if self.core.state != ActorState::Active {
            return;
        }
        self.update_components(ctx, dt);
        self.behavior.update_actor(&mut self.core, ctx, dt);
    }

    /// Run every component's update in ascending update order.
    pub fn update_components(&mut self, ctx: &mut FrameContext, dt: f32) {
        for component in &mut self.components {
            component.update(&mut self.core, ctx, dt);
        }
    }

    pub fn process_input(&mut self, ctx: &mut FrameContext, keys: &KeyState) {
        if self.core.state != ActorState::Active {
            return;
        }
        for component in &mut self.components {
            component.process_input(&mut self.core, ctx, keys);
        }
        self.behavior.actor_input(&mut self.core, ctx, keys);
    }

    /// Draw every registered sprite back-to-front, then the actor's own draw hook.
    pub fn draw(&self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        self.draw_components(target)?;
        self.behavior.draw_actor(&self.core, target)
    }

    fn draw_components(&self, target: &mut dyn RenderTarget) -> Result<(), RenderError> {
        for sprite_id in &self.sprites {
            if let Some(component) = self.component(*sprite_id) {
                component.draw(&self.core, target)?;
            }
        }
        Ok(())
    }

    /// Attach a behavior as a new component.
    ///
    /// The component lands after every existing component whose order is less
    /// than or equal to `update_order`.
    pub fn add_component(&mut self, update_order: i32, behavior: Box<dyn Behavior>) -> ComponentId {
        let id = ComponentId::new(self.next_component_id);
        self.next_component_id += 1;

        let component = Component::new(id, self.core.id, update_order, behavior);
        let index = self
            .components
            .partition_point(|existing| existing.update_order() <= update_order);
        self.components.insert(index, component);

        id
    }

    /// Attach a drawable component: added to the components and registered as
    /// the last (front-most) sprite in one step.
    pub fn add_sprite(&mut self, update_order: i32, behavior: Box<dyn Behavior>) -> ComponentId {
        let id = self.add_component(update_order, behavior);
        self.sprites.push(id);
        id
    }

    /// Detach and destroy a component, handing its behavior back.
    /// Returns `None` if this actor has no such component.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Box<dyn Behavior>> {
        let index = self.components.iter().position(|component| component.id() == id)?;
        self.remove_sprite(id);
        Some(self.components.remove(index).into_behavior())
    }

    /// Stop drawing a component while keeping it updated.
    /// Returns `false` if it wasn't registered as a sprite.
    pub fn remove_sprite(&mut self, id: ComponentId) -> bool {
        let before = self.sprites.len();
        self.sprites.retain(|sprite_id| *sprite_id != id);
        self.sprites.len() != before
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|component| component.id() == id)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn sprites(&self) -> &[ComponentId] {
        &self.sprites
    }
}

impl Drop for Actor {
    fn drop(&mut self) {
        // Last added first; each component leaves the sprite list before it is destroyed
        while let Some(component) = self.components.pop() {
            self.sprites.retain(|sprite_id| *sprite_id != component.id());
            drop(component);
        }
        log::trace!("Destroyed actor {:?}", self.core.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DEFAULT_UPDATE_ORDER;
    use crate::platform::mock::MockFrame;
    use crate::texture::TextureHandle;
    use sdl2::rect::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Behavior for Recorder {
        fn update(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _dt: f32) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn process_input(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _keys: &KeyState) {
            self.log.borrow_mut().push(format!("input {}", self.name));
        }

        fn draw(&self, _actor: &ActorCore, _target: &mut dyn RenderTarget) -> Result<(), RenderError> {
            self.log.borrow_mut().push(format!("draw {}", self.name));
            Ok(())
        }
    }

    impl Drop for Recorder {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.name));
        }
    }

    struct Hooks {
        log: Log,
    }

    impl ActorBehavior for Hooks {
        fn update_actor(&mut self, _actor: &mut ActorCore, _ctx: &mut FrameContext, _dt: f32) {
            self.log.borrow_mut().push("update actor".to_string());
        }

        fn draw_actor(&self, _actor: &ActorCore, _target: &mut dyn RenderTarget) -> Result<(), RenderError> {
            self.log.borrow_mut().push("draw actor".to_string());
            Ok(())
        }
    }

    struct NullTarget;

    impl RenderTarget for NullTarget {
        fn draw_texture(&mut self, _texture: TextureHandle, _dest: Rect, _angle: f64) -> Result<(), RenderError> {
            Ok(())
        }

        fn texture_size(&self, _texture: TextureHandle) -> Option<(u32, u32)> {
            None
        }
    }

    fn recorder(name: &'static str, log: &Log) -> Box<dyn Behavior> {
        Box::new(Recorder {
            name,
            log: log.clone(),
        })
    }

    fn actor_with_log() -> (Actor, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let actor = Actor::new(ActorId::new(7), Box::new(Hooks { log: log.clone() }));
        (actor, log)
    }

    fn take(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    fn update(actor: &mut Actor) {
        MockFrame::new().with(|ctx| actor.update(ctx, 0.016));
    }

    fn update_components(actor: &mut Actor) {
        MockFrame::new().with(|ctx| actor.update_components(ctx, 0.016));
    }

    fn process_input(actor: &mut Actor) {
        MockFrame::new().with(|ctx| actor.process_input(ctx, &KeyState::new()));
    }

    #[test]
    fn test_lower_update_order_runs_first() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(50, recorder("fifty", &log));
        actor.add_component(10, recorder("ten", &log));

        update_components(&mut actor);
        assert_eq!(take(&log), vec!["update ten", "update fifty"]);
    }

    #[test]
    fn test_equal_orders_keep_insertion_order() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(100, recorder("a", &log));
        actor.add_component(20, recorder("b", &log));
        actor.add_component(100, recorder("c", &log));
        actor.add_component(20, recorder("d", &log));
        actor.add_component(150, recorder("e", &log));

        let orders: Vec<i32> = actor.components().iter().map(|c| c.update_order()).collect();
        assert_eq!(orders, vec![20, 20, 100, 100, 150]);

        update_components(&mut actor);
        assert_eq!(
            take(&log),
            vec!["update b", "update d", "update a", "update c", "update e"]
        );
    }

    #[test]
    fn test_components_know_their_owner() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(DEFAULT_UPDATE_ORDER, recorder("a", &log));
        actor.add_sprite(DEFAULT_UPDATE_ORDER, recorder("b", &log));

        assert!(actor.components().iter().all(|c| c.owner() == actor.id()));
    }

    #[test]
    fn test_update_runs_components_then_actor_hook() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(DEFAULT_UPDATE_ORDER, recorder("a", &log));

        update(&mut actor);
        assert_eq!(take(&log), vec!["update a", "update actor"]);
    }

    #[test]
    fn test_paused_and_dead_actors_skip_update() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(DEFAULT_UPDATE_ORDER, recorder("a", &log));

        actor.set_state(ActorState::Paused);
        update(&mut actor);
        process_input(&mut actor);
        assert!(take(&log).is_empty());

        actor.set_state(ActorState::Dead);
        update(&mut actor);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn test_input_reaches_components_when_active() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(30, recorder("late", &log));
        actor.add_component(10, recorder("early", &log));

        process_input(&mut actor);
        assert_eq!(take(&log), vec!["input early", "input late"]);
    }

    #[test]
    fn test_draw_uses_sprites_in_registration_order() {
        let (mut actor, log) = actor_with_log();
        actor.add_sprite(200, recorder("back", &log));
        actor.add_component(DEFAULT_UPDATE_ORDER, recorder("logic", &log));
        actor.add_sprite(10, recorder("front", &log));

        actor.draw(&mut NullTarget).unwrap();
        assert_eq!(take(&log), vec!["draw back", "draw front", "draw actor"]);
    }

    #[test]
    fn test_remove_sprite_keeps_component() {
        let (mut actor, log) = actor_with_log();
        let sprite = actor.add_sprite(DEFAULT_UPDATE_ORDER, recorder("s", &log));

        assert!(actor.remove_sprite(sprite));
        assert!(!actor.remove_sprite(sprite));
        assert!(actor.sprites().is_empty());
        assert_eq!(actor.components().len(), 1);

        actor.draw(&mut NullTarget).unwrap();
        update_components(&mut actor);
        assert_eq!(take(&log), vec!["draw actor", "update s"]);
    }

    #[test]
    fn test_remove_component_deregisters_sprite() {
        let (mut actor, log) = actor_with_log();
        let keep = actor.add_sprite(DEFAULT_UPDATE_ORDER, recorder("keep", &log));
        let gone = actor.add_sprite(DEFAULT_UPDATE_ORDER, recorder("gone", &log));

        let behavior = actor.remove_component(gone);
        assert!(behavior.is_some());
        assert_eq!(actor.sprites(), &[keep]);
        assert_eq!(actor.components().len(), 1);

        drop(behavior);
        assert_eq!(take(&log), vec!["drop gone"]);
    }

    #[test]
    fn test_remove_absent_component_is_noop() {
        let (mut actor, log) = actor_with_log();
        let id = actor.add_component(DEFAULT_UPDATE_ORDER, recorder("a", &log));
        actor.remove_component(id);

        assert!(actor.remove_component(id).is_none());
        assert!(actor.components().is_empty());
    }

    #[test]
    fn test_drop_destroys_components_last_first() {
        let (mut actor, log) = actor_with_log();
        actor.add_component(10, recorder("a", &log));
        actor.add_sprite(20, recorder("b", &log));
        actor.add_component(30, recorder("c", &log));

        drop(actor);
        assert_eq!(take(&log), vec!["drop c", "drop b", "drop a"]);
    }

    #[test]
    fn test_state_transitions() {
        let mut core = ActorCore::new(ActorId::new(1));
        assert_eq!(core.state(), ActorState::Active);

        assert!(core.set_state(ActorState::Paused));
        assert!(core.set_state(ActorState::Active));
        assert!(core.set_state(ActorState::Paused));
        assert!(core.set_state(ActorState::Dead));

        assert!(!core.set_state(ActorState::Active));
        assert!(!core.set_state(ActorState::Paused));
        assert_eq!(core.state(), ActorState::Dead);
        assert!(core.set_state(ActorState::Dead));
    }

    #[test]
    fn test_transform_accepts_any_values() {
        let (mut actor, _log) = actor_with_log();
        actor.set_position(Vec2::new(-5.0, 12.5));
        actor.set_scale(-2.0);
        actor.set_rotation(7.5);

        assert_eq!(actor.position(), Vec2::new(-5.0, 12.5));
        assert_eq!(actor.scale(), -2.0);
        assert_eq!(actor.rotation(), 7.5);
    }
}
