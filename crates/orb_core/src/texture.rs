//! Texture loading and caching for materials and the sky.
//!
//! Textures are decoded once with the `image` crate and kept as straight
//! (non-premultiplied) RGBA floats in [0, 1]. No color-space conversion is
//! applied: texel values are the encoded byte values divided by 255.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use orb_math::Color;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Texture {0} has no pixels")]
    Empty(String),

    #[error("Texture {path}: expected {expected} pixels, got {actual}")]
    SizeMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture.
///
/// Row 0 is the top of the image. Never empty, and `pixels` always holds
/// exactly `width * height` entries.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,

    /// Pixel data as [R, G, B, A], row-major
    pixels: Vec<[f32; 4]>,

    /// Original file path (for debugging)
    path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    ///
    /// Fails if either dimension is zero or `pixels` does not hold
    /// `width * height` entries.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<[f32; 4]>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                path,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x as f32, color.y as f32, color.z as f32, 1.0]],
            path: "<solid>".to_string(),
        }
    }

    /// Texture width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build a texture from an already decoded image.
    pub fn from_image(img: &DynamicImage, path: impl Into<String>) -> TextureResult<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();

        Self::new(width, height, pixels, path)
    }

    /// Decode a texture from a file (format chosen by the `image` crate).
    pub fn load(path: &Path) -> TextureResult<Self> {
        let img = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Self::from_image(&img, path.to_string_lossy())
    }

    /// Un-premultiplied color at integer pixel coordinates.
    ///
    /// Coordinates outside the image are clamped to the nearest edge.
    /// Fully transparent texels have no color and return `None`.
    pub fn texel(&self, x: i64, y: i64) -> Option<Color> {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let [r, g, b, a] = self.pixels[y * self.width as usize + x];
        if a <= 0.0 {
            return None;
        }
        // Pixels are stored straight, so the color channels need no division.
        Some(Color::new(r as f64, g as f64, b as f64))
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 4]>()
    }
}

/// Cache for loaded textures.
///
/// A path is decoded at most once; materials and the sky share the result.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(Texture::load(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width(),
            texture.height(),
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Insert an in-memory texture under a path key.
    pub fn insert(&mut self, path: impl Into<String>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(path.into(), texture.clone());
        texture
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
