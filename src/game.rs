//! Game orchestrator
//!
//! `Game` owns the actors, the texture cache and the platform, and drives the
//! frame loop: poll input → update → render, until a quit is observed.
//!
//! # Lifecycle
//!
//! - `Game::initialize` acquires the platform, loads initial content and starts
//!   the clock. A failure returns `InitializationError` and no `Game` exists,
//!   so the loop can't be entered by mistake.
//! - `run_loop` runs whole frames; `is_running` is only checked between frames.
//! - `shutdown` destroys actors, then textures, then the platform. Dropping a
//!   `Game` without calling it tears down in the same order.
//!
//! # Actor ordering
//!
//! Actors are appended on creation and removed with swap-remove, so the order
//! of `actors()` is NOT stable across removals.
//!
//! # Changes during a pass
//!
//! Input and update hooks get a `FrameContext`. Actors they spawn or remove
//! through it are held in an `ActorQueue` and applied once every actor has
//! been visited: spawns first, then removals.

use crate::actor::{Actor, ActorBehavior, ActorId, ActorState};
use crate::config::GameConfig;
use crate::context::{ActorQueue, FrameContext};
use crate::error::{InitializationError, ResourceLoadError};
use crate::platform::Platform;
use crate::render::DrawContext;
use crate::texture::{TextureCache, TextureHandle, TextureLoader};
use crate::timing::FrameTimer;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color;

/// The running game: every actor, every texture and the platform they need.
///
/// A `Game` only exists once `initialize` has succeeded, so everything it owns
/// is ready to use. From then on it is the single owner of:
///
/// - the actors, in `actors()` order, plus any spawned mid-pass and not yet
///   added (`queue`)
/// - the texture cache; actors and components hold `TextureHandle`s into it
/// - the platform (window, renderer, input, clock)
///
/// Teardown runs in that order, in `Drop`, so no texture is destroyed while an
/// actor could still draw it and no texture outlives the renderer that made it.
pub struct Game<P: Platform> {
    actors: Vec<Actor>,
    queue: ActorQueue,
    textures: TextureCache<P::Texture>,
    platform: P,
    config: GameConfig,
    timer: FrameTimer,
    exit_key: Scancode,
    is_running: bool,
    frame_count: u64,
}

impl<P: Platform> Game<P> {
    /// Acquire the platform with `platform_init`, then run `load_data` to
    /// create the initial actors.
    pub fn initialize<F, L>(config: GameConfig, platform_init: F, load_data: L) -> Result<Self, InitializationError>
    where
        F: FnOnce(&GameConfig) -> Result<P, InitializationError>,
        L: FnOnce(&mut Game<P>),
    {
        log::info!("Initializing game (asset root: {})", config.asset_root.display());

        let platform = platform_init(&config)?;

        let exit_key = Scancode::from_name(&config.exit_key).unwrap_or_else(|| {
            log::warn!("Unknown exit key '{}', using Escape", config.exit_key);
            Scancode::Escape
        });

        let mut game = Game {
            actors: Vec::new(),
            queue: ActorQueue::new(),
            textures: TextureCache::new(config.asset_root.clone()),
            platform,
            timer: FrameTimer::new(config.min_frame_ms, config.max_delta_seconds, 0),
            config,
            exit_key,
            is_running: true,
            frame_count: 0,
        };

        load_data(&mut game);
        log::info!(
            "Loaded {} actors, {} textures",
            game.actors.len(),
            game.textures.len()
        );

        let now = game.platform.ticks();
        game.timer.reset(now);

        Ok(game)
    }

    pub fn run_loop(&mut self) {
        while self.is_running {
            self.process_input();
            self.update_game();
            self.generate_output();
            self.frame_count += 1;
        }
        log::info!("Frame loop stopped after {} frames", self.frame_count);
    }

    /// Drain pending events. A quit event or the exit key stops the loop;
    /// active actors then see the keyboard snapshot.
    pub fn process_input(&mut self) {
        for event in self.platform.poll_events() {
            if let Event::Quit { .. } = event {
                log::debug!("Quit requested");
                self.is_running = false;
            }
        }

        let keys = self.platform.key_state();
        if keys.is_pressed(self.exit_key) {
            log::debug!("Exit key pressed");
            self.is_running = false;
        }

        let mut loader = TextureLoader::new(&mut self.textures, &mut self.platform);
        let mut ctx = FrameContext::new(&mut loader, &mut self.queue);
        for actor in &mut self.actors {
            actor.process_input(&mut ctx, &keys);
        }
        self.apply_queue();
    }

    /// Advance one frame and return the delta time handed to the actors.
    ///
    /// Dead actors are collected after every actor has updated and only then
    /// destroyed, so the list is never mutated while it is walked. Actors
    /// spawned during the pass join the list before that sweep.
    pub fn update_game(&mut self) -> f32 {
        let platform = &self.platform;
        let dt = self.timer.tick(|| platform.ticks());

        let mut loader = TextureLoader::new(&mut self.textures, &mut self.platform);
        let mut ctx = FrameContext::new(&mut loader, &mut self.queue);
        for actor in &mut self.actors {
            actor.update(&mut ctx, dt);
        }
        self.apply_queue();

        let dead_actors: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|actor| actor.state() == ActorState::Dead)
            .map(|actor| actor.id())
            .collect();

        for id in dead_actors {
            drop(self.remove_actor(id));
        }

        log::trace!("Updated {} actors (dt {:.4}s)", self.actors.len(), dt);
        dt
    }

    fn apply_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        for actor in self.queue.take_spawned() {
            log::debug!("Adding actor {:?} spawned during the pass", actor.id());
            self.actors.push(actor);
        }
        for id in self.queue.take_removals() {
            drop(self.remove_actor(id));
        }
    }

    pub fn generate_output(&mut self) {
        let (r, g, b) = self.config.clear_color;
        self.platform.set_draw_color(Color::RGB(r, g, b));
        self.platform.clear();

        let mut target = DrawContext::new(&mut self.platform, &self.textures);
        for actor in &self.actors {
            if let Err(e) = actor.draw(&mut target) {
                log::warn!("Failed to draw actor {:?}: {}", actor.id(), e);
            }
        }

        self.platform.present();
    }

    /// Look up a texture by asset-relative path, loading it on first use.
    ///
    /// Errors are already logged; the caller decides whether a missing
    /// texture matters to it.
    pub fn get_texture(&mut self, path: &str) -> Result<TextureHandle, ResourceLoadError> {
        self.textures.get_or_load(&mut self.platform, path)
    }

    pub fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures
            .get(texture)
            .map(|texture| self.platform.texture_size(texture))
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Build a new active actor and register it with the game.
    pub fn create_actor(&mut self, behavior: Box<dyn ActorBehavior>) -> &mut Actor {
        let id = self.queue.allocate_id();
        self.add_actor(Actor::new(id, behavior));
        let index = self.actors.len() - 1;
        &mut self.actors[index]
    }

    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id();
        self.actors.push(actor);
        id
    }

    /// Take an actor out of the game. The last actor moves into its slot.
    /// Dropping the returned actor destroys it and its components.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|actor| actor.id() == id)?;
        log::debug!("Removing actor {:?}", id);
        Some(self.actors.swap_remove(index))
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id() == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id() == id)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Stop the loop after the current frame.
    pub fn quit(&mut self) {
        self.is_running = false;
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Destroy every actor (last first), release every texture, then release
    /// the platform.
    pub fn shutdown(self) {
        drop(self);
        log::info!("Platform released");
    }
}

impl<P: Platform> Drop for Game<P> {
    fn drop(&mut self) {
        let actor_count = self.actors.len() + self.queue.spawned().len();
        while let Some(actor) = self.actors.pop() {
            drop(actor);
        }
        drop(self.queue.take_spawned());

        let texture_count = self.textures.clear(&mut self.platform);
        log::info!(
            "Shutdown: destroyed {} actors, released {} textures",
            actor_count,
            texture_count
        );
        // The platform field drops after this returns
    }
}
