//! Orb Core - scene description and texture support for the path tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraParams`,
//!   `MaterialDesc`, `SphereDesc`, `RenderSettings`
//! - **Validation**: every configuration error is reported as a `SceneError`
//!   before any rendering work starts
//! - **Textures**: decoding via the `image` crate and a path-keyed cache
//!
//! # Example
//!
//! ```ignore
//! use orb_core::SceneDescription;
//!
//! let scene = SceneDescription::load("scenes/spheres.json")?;
//! println!("{} objects, {} materials", scene.objects.len(), scene.materials.len());
//! ```

pub mod error;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use scene::{
    CameraParams, LightSampling, MaterialDesc, RenderSettings, SceneDescription, SkyDesc,
    SphereDesc,
};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
