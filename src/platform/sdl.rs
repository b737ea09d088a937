//! SDL2 backend
//!
//! Acquisition is staged: SDL core, video, timer, window, renderer, SDL_image,
//! event pump. Each step binds a local, so when a later step fails the `?`
//! return drops everything acquired so far in reverse order. Nothing is left
//! half-initialized.
//!
//! Textures are created with the `unsafe_textures` feature so they carry no
//! lifetime and can sit in the game's texture cache next to the renderer that
//! created them. They have no `Drop`; the cache hands each one back through
//! `destroy_texture` before the platform (and its renderer) goes away.

use super::{ImageDecoder, KeyState, PlatformContext, Renderer};
use crate::config::GameConfig;
use crate::error::{InitStage, InitializationError};
use sdl2::event::Event;
use sdl2::image::{InitFlag, LoadSurface, Sdl2ImageContext};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, Sdl, TimerSubsystem, VideoSubsystem};
use std::path::Path;

pub struct SdlPlatform {
    // Field order is drop order: renderer side first, SDL core last.
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
    _image_context: Sdl2ImageContext,
    timer: TimerSubsystem,
    _video: VideoSubsystem,
    _sdl: Sdl,
}

fn stage_failed(stage: InitStage, message: impl ToString) -> InitializationError {
    let error = InitializationError::new(stage, message.to_string());
    log::error!("{}", error);
    error
}

impl SdlPlatform {
    pub fn init(config: &GameConfig) -> Result<Self, InitializationError> {
        let sdl = sdl2::init().map_err(|e| stage_failed(InitStage::Sdl, e))?;
        let video = sdl.video().map_err(|e| stage_failed(InitStage::Video, e))?;
        let timer = sdl.timer().map_err(|e| stage_failed(InitStage::Timer, e))?;

        let window_config = &config.window;
        let window = video
            .window(&window_config.title, window_config.width, window_config.height)
            .position(window_config.x, window_config.y)
            .build()
            .map_err(|e| stage_failed(InitStage::Window, e))?;
        log::info!(
            "Created window {}x{} '{}'",
            window_config.width,
            window_config.height,
            window_config.title
        );

        let mut canvas_builder = window.into_canvas().accelerated();
        if window_config.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| stage_failed(InitStage::Renderer, e))?;
        let texture_creator = canvas.texture_creator();

        let image_context =
            sdl2::image::init(InitFlag::PNG).map_err(|e| stage_failed(InitStage::Image, e))?;

        let event_pump = sdl.event_pump().map_err(|e| stage_failed(InitStage::Events, e))?;

        log::info!("SDL platform initialized");

        Ok(SdlPlatform {
            canvas,
            texture_creator,
            event_pump,
            _image_context: image_context,
            timer,
            _video: video,
            _sdl: sdl,
        })
    }
}

impl PlatformContext for SdlPlatform {
    fn poll_events(&mut self) -> Vec<Event> {
        self.event_pump.poll_iter().collect()
    }

    fn key_state(&self) -> KeyState {
        KeyState::from_pressed(self.event_pump.keyboard_state().pressed_scancodes())
    }

    fn ticks(&self) -> u32 {
        self.timer.ticks()
    }
}

impl ImageDecoder for SdlPlatform {
    type Surface = Surface<'static>;
    type Texture = Texture;

    fn load_image(&mut self, path: &Path) -> Result<Self::Surface, String> {
        Surface::from_file(path)
    }

    fn create_texture(&mut self, surface: &Self::Surface) -> Result<Self::Texture, String> {
        self.texture_creator
            .create_texture_from_surface(surface)
            .map_err(|e| e.to_string())
    }

    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32) {
        let query = texture.query();
        (query.width, query.height)
    }

    fn destroy_texture(&mut self, texture: Self::Texture) {
        // SAFETY: the texture came from `self.texture_creator`, whose renderer
        // (`self.canvas`) is alive for as long as `self` is
        unsafe { texture.destroy() }
    }
}

impl Renderer for SdlPlatform {
    fn set_draw_color(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn present(&mut self) {
        self.canvas.present();
    }

    fn draw_texture(&mut self, texture: &Self::Texture, dest: Rect, angle: f64) -> Result<(), String> {
        self.canvas
            .copy_ex(texture, None, Some(dest), angle, None, false, false)
    }
}
