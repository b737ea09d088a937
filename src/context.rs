//! Per-frame access to the game from inside actor and component hooks
//!
//! Hooks run while `Game` is walking its actor list, so they can't touch that
//! list directly. Instead they get a `FrameContext`:
//!
//! - texture lookups go straight to the game's cache (same handles, same
//!   decode-once guarantee as `Game::get_texture`)
//! - spawns and removals are queued in the game's `ActorQueue` and applied
//!   once the pass over the actors is finished
//!
//! An actor spawned during a pass is not visited by that same pass; it joins
//! the list right after it and is drawn in the same frame.

use crate::actor::{Actor, ActorBehavior, ActorId};
use crate::error::ResourceLoadError;
use crate::texture::{TextureHandle, TextureSource};

/// Actor id allocation plus the spawns/removals requested during a pass.
#[derive(Default)]
pub struct ActorQueue {
    next_id: u64,
    spawned: Vec<Actor>,
    removals: Vec<ActorId>,
}

impl ActorQueue {
    pub fn new() -> Self {
        ActorQueue::default()
    }

    pub(crate) fn allocate_id(&mut self) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Build an actor that joins the game when the queue is applied.
    pub fn spawn(&mut self, behavior: Box<dyn ActorBehavior>) -> &mut Actor {
        let id = self.allocate_id();
        self.spawned.push(Actor::new(id, behavior));
        let index = self.spawned.len() - 1;
        &mut self.spawned[index]
    }

    /// Ask for an actor to be destroyed when the queue is applied. Ids that
    /// are gone by then are ignored.
    pub fn remove(&mut self, id: ActorId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    pub fn spawned(&self) -> &[Actor] {
        &self.spawned
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.removals.is_empty()
    }

    pub(crate) fn take_spawned(&mut self) -> Vec<Actor> {
        std::mem::take(&mut self.spawned)
    }

    pub(crate) fn take_removals(&mut self) -> Vec<ActorId> {
        std::mem::take(&mut self.removals)
    }
}

/// What a hook can reach of the game while a pass is running.
pub struct FrameContext<'a> {
    textures: &'a mut dyn TextureSource,
    queue: &'a mut ActorQueue,
}

impl<'a> FrameContext<'a> {
    pub fn new(textures: &'a mut dyn TextureSource, queue: &'a mut ActorQueue) -> Self {
        FrameContext { textures, queue }
    }

    pub fn get_texture(&mut self, path: &str) -> Result<TextureHandle, ResourceLoadError> {
        self.textures.get_texture(path)
    }

    pub fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.texture_size(texture)
    }

    /// Create an actor. It is added to the game after the current pass.
    pub fn spawn_actor(&mut self, behavior: Box<dyn ActorBehavior>) -> &mut Actor {
        self.queue.spawn(behavior)
    }

    /// Destroy another actor after the current pass. To remove the actor a
    /// hook belongs to, marking it `Dead` works too.
    pub fn remove_actor(&mut self, id: ActorId) {
        self.queue.remove(id);
    }
}
