//! Path-keyed texture cache
//!
//! Every texture is decoded at most once. The cache owns the textures; callers
//! receive a `TextureHandle`, a plain index that stays valid until the cache
//! is cleared at shutdown.

use crate::error::ResourceLoadError;
use crate::platform::ImageDecoder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Non-owning reference to a cached texture.
///
/// Two lookups of the same resolved path yield equal handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owns every texture the game has loaded, keyed by resolved path.
///
/// Paths are resolved by joining them onto the asset root, so `"ship.png"`
/// and `"./ship.png"` under the same root are different keys but the same
/// spelling always maps to the same entry.
///
/// # Lifetime
///
/// Textures live exactly as long as the cache holds them. There is no per-
/// texture reference count: a handle stays usable until `clear` hands every
/// texture back to the decoder that created it, which `Game::shutdown` does
/// after all actors are gone and before the platform is released.
pub struct TextureCache<T> {
    asset_root: PathBuf,
    by_path: HashMap<PathBuf, TextureHandle>,
    textures: Vec<T>,
}

impl<T> TextureCache<T> {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        TextureCache {
            asset_root: asset_root.into(),
            by_path: HashMap::new(),
            textures: Vec::new(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.asset_root.join(path)
    }

    /// Return the cached texture for `path`, decoding and converting it on
    /// first use.
    ///
    /// Failures are logged and returned; nothing is cached for a failed path,
    /// so a later call tries again.
    pub fn get_or_load<D>(&mut self, decoder: &mut D, path: &str) -> Result<TextureHandle, ResourceLoadError>
    where
        D: ImageDecoder<Texture = T>,
    {
        let resolved = self.resolve(path);

        if let Some(handle) = self.by_path.get(&resolved) {
            return Ok(*handle);
        }

        let surface = decoder.load_image(&resolved).map_err(|reason| {
            let error = ResourceLoadError::Decode {
                path: resolved.clone(),
                reason,
            };
            log::error!("{}", error);
            error
        })?;

        // The surface is dropped (freed) on both paths once conversion returns
        let texture = decoder.create_texture(&surface).map_err(|reason| {
            let error = ResourceLoadError::Convert {
                path: resolved.clone(),
                reason,
            };
            log::error!("{}", error);
            error
        })?;

        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        log::debug!("Cached texture {} as #{}", resolved.display(), handle.0);
        self.by_path.insert(resolved, handle);

        Ok(handle)
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&T> {
        self.textures.get(handle.0)
    }

    pub fn handle_for(&self, resolved: &Path) -> Option<TextureHandle> {
        self.by_path.get(resolved).copied()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Destroy every texture through `decoder`, in load order. Outstanding
    /// handles become dangling and `get` returns `None` for them.
    pub fn clear<D>(&mut self, decoder: &mut D) -> usize
    where
        D: ImageDecoder<Texture = T>,
    {
        let released = self.textures.len();
        self.by_path.clear();
        for texture in self.textures.drain(..) {
            decoder.destroy_texture(texture);
        }
        released
    }
}

/// Texture lookup for code that doesn't know the platform type, such as
/// component hooks running inside a frame.
pub trait TextureSource {
    fn get_texture(&mut self, path: &str) -> Result<TextureHandle, ResourceLoadError>;

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)>;
}

/// Borrows the cache and its decoder together for one pass.
pub struct TextureLoader<'a, D: ImageDecoder> {
    cache: &'a mut TextureCache<D::Texture>,
    decoder: &'a mut D,
}

impl<'a, D: ImageDecoder> TextureLoader<'a, D> {
    pub fn new(cache: &'a mut TextureCache<D::Texture>, decoder: &'a mut D) -> Self {
        TextureLoader { cache, decoder }
    }
}

impl<D: ImageDecoder> TextureSource for TextureLoader<'_, D> {
    fn get_texture(&mut self, path: &str) -> Result<TextureHandle, ResourceLoadError> {
        self.cache.get_or_load(&mut *self.decoder, path)
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.cache
            .get(texture)
            .map(|texture| self.decoder.texture_size(texture))
    }
}
