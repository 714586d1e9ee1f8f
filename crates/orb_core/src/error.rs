//! Configuration errors.

use thiserror::Error;

use crate::texture::TextureError;

/// Errors that make a scene unrenderable.
///
/// All of these are detected before rendering starts.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("image must be at least 2x2 pixels, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("samples_per_pixel must be at least 1")]
    InvalidSamples,

    #[error("max_depth must be at least 1")]
    InvalidDepth,

    #[error("object {index}: radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),

    #[error("material {name}: index of refraction must be positive, got {ior}")]
    InvalidRefractionIndex { name: String, ior: f64 },

    #[error("object {object} references unknown material {name:?}")]
    UnknownMaterial { object: usize, name: String },

    #[error("invalid render setting: {0}")]
    InvalidSetting(String),

    #[error("texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scene parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
