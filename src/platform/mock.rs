//! In-memory platform for tests
//!
//! The clock is scripted: every `ticks()` call advances it by `tick_step` ms,
//! so the frame-pacing wait terminates without real time passing.
//!
//! Texture destruction and the platform's own drop are appended to `journal`,
//! which tests can share with their behaviors to check teardown order.

use super::{ImageDecoder, KeyState, PlatformContext, Renderer};
use crate::context::{ActorQueue, FrameContext};
use crate::texture::{TextureCache, TextureLoader};
use sdl2::event::Event;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub type Journal = Rc<RefCell<Vec<String>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct MockSurface {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockTexture {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetColor(Color),
    Clear,
    Texture { path: PathBuf, dest: Rect, angle: f64 },
    Present,
}

pub struct MockPlatform {
    now: Cell<u32>,
    pub tick_step: u32,
    /// Event batches, one per `poll_events` call
    pub event_frames: VecDeque<Vec<Event>>,
    pub keys: KeyState,
    pub decode_calls: Vec<PathBuf>,
    pub convert_calls: usize,
    pub missing_files: HashSet<PathBuf>,
    pub fail_conversion: bool,
    pub texture_size: (u32, u32),
    pub draws: Vec<DrawCall>,
    pub destroyed: Vec<PathBuf>,
    pub journal: Journal,
}

impl MockPlatform {
    pub fn new() -> Self {
        MockPlatform {
            now: Cell::new(0),
            tick_step: 1,
            event_frames: VecDeque::new(),
            keys: KeyState::new(),
            decode_calls: Vec::new(),
            convert_calls: 0,
            missing_files: HashSet::new(),
            fail_conversion: false,
            texture_size: (64, 32),
            draws: Vec::new(),
            destroyed: Vec::new(),
            journal: Journal::default(),
        }
    }

    pub fn push_events(&mut self, events: Vec<Event>) {
        self.event_frames.push_back(events);
    }

    pub fn drawn_textures(&self) -> Vec<PathBuf> {
        self.draws
            .iter()
            .filter_map(|call| match call {
                DrawCall::Texture { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PlatformContext for MockPlatform {
    fn poll_events(&mut self) -> Vec<Event> {
        self.event_frames.pop_front().unwrap_or_default()
    }

    fn key_state(&self) -> KeyState {
        self.keys.clone()
    }

    fn ticks(&self) -> u32 {
        let now = self.now.get().wrapping_add(self.tick_step);
        self.now.set(now);
        now
    }
}

impl ImageDecoder for MockPlatform {
    type Surface = MockSurface;
    type Texture = MockTexture;

    fn load_image(&mut self, path: &Path) -> Result<Self::Surface, String> {
        self.decode_calls.push(path.to_path_buf());
        if self.missing_files.contains(path) {
            return Err(format!("Couldn't open {}", path.display()));
        }
        Ok(MockSurface {
            path: path.to_path_buf(),
        })
    }

    fn create_texture(&mut self, surface: &Self::Surface) -> Result<Self::Texture, String> {
        self.convert_calls += 1;
        if self.fail_conversion {
            return Err("Texture creation failed".to_string());
        }
        Ok(MockTexture {
            path: surface.path.clone(),
            width: self.texture_size.0,
            height: self.texture_size.1,
        })
    }

    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32) {
        (texture.width, texture.height)
    }

    fn destroy_texture(&mut self, texture: Self::Texture) {
        self.journal
            .borrow_mut()
            .push(format!("destroy {}", texture.path.display()));
        self.destroyed.push(texture.path);
    }
}

impl Renderer for MockPlatform {
    fn set_draw_color(&mut self, color: Color) {
        self.draws.push(DrawCall::SetColor(color));
    }

    fn clear(&mut self) {
        self.draws.push(DrawCall::Clear);
    }

    fn present(&mut self) {
        self.draws.push(DrawCall::Present);
    }

    fn draw_texture(&mut self, texture: &Self::Texture, dest: Rect, angle: f64) -> Result<(), String> {
        self.draws.push(DrawCall::Texture {
            path: texture.path.clone(),
            dest,
            angle,
        });
        Ok(())
    }
}

impl Drop for MockPlatform {
    fn drop(&mut self) {
        self.journal.borrow_mut().push("platform dropped".to_string());
    }
}

/// Everything a `FrameContext` borrows, for running hooks outside a `Game`.
pub struct MockFrame {
    pub platform: MockPlatform,
    pub cache: TextureCache<MockTexture>,
    pub queue: ActorQueue,
}

impl MockFrame {
    pub fn new() -> Self {
        MockFrame {
            platform: MockPlatform::new(),
            cache: TextureCache::new("assets"),
            queue: ActorQueue::new(),
        }
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut FrameContext) -> R) -> R {
        let mut loader = TextureLoader::new(&mut self.cache, &mut self.platform);
        let mut ctx = FrameContext::new(&mut loader, &mut self.queue);
        f(&mut ctx)
    }
}
