//! Scene description types.
//!
//! A `SceneDescription` is the renderer-agnostic form of a scene: plain data
//! that can be written by hand, read from JSON, and validated before the
//! renderer turns it into intersectable geometry.

use std::collections::BTreeMap;
use std::path::Path;

use orb_math::{Color, Point3, Vec3, VecExt};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Camera placement, fixed for the whole render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Eye position
    pub look_from: Point3,

    /// Point the camera is aimed at
    pub look_at: Point3,

    /// World "up", used to orient the image plane
    #[serde(default = "default_view_up")]
    pub view_up: Vec3,

    /// Vertical field of view in degrees
    pub vertical_fov: f64,

    /// Image-plane width divided by height
    pub aspect_ratio: f64,
}

fn default_view_up() -> Vec3 {
    Vec3::Y
}

impl CameraParams {
    /// Check that the parameters produce a well-defined camera basis.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.vertical_fov > 0.0 && self.vertical_fov < 180.0) {
            return Err(SceneError::InvalidFieldOfView(self.vertical_fov));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(SceneError::InvalidAspectRatio(self.aspect_ratio));
        }

        let view = self.look_from - self.look_at;
        if view.near_zero() {
            return Err(SceneError::DegenerateCamera(
                "look_from and look_at coincide".to_string(),
            ));
        }
        if self.view_up.near_zero() {
            return Err(SceneError::DegenerateCamera(
                "view_up has zero length".to_string(),
            ));
        }
        if self.view_up.cross(view.unit()).near_zero() {
            return Err(SceneError::DegenerateCamera(
                "view_up is parallel to the viewing direction".to_string(),
            ));
        }
        Ok(())
    }
}

/// Surface material, referenced by name from spheres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Light source. Terminates paths with a fixed color.
    Emissive {
        #[serde(default = "default_white")]
        color: Color,
    },

    /// Lambertian-style diffuse surface.
    Diffuse { albedo: Color },

    /// Reflective surface; `fuzz` is clamped to [0, 1] when built.
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },

    /// Refractive surface (glass, water).
    Dielectric { ior: f64 },

    /// Diffuse surface whose color comes from an image.
    Textured {
        #[serde(default = "default_white")]
        albedo: Color,
        texture: String,
        #[serde(default)]
        horizontal_offset: f64,
    },
}

fn default_white() -> Color {
    Color::ONE
}

impl MaterialDesc {
    /// True for light sources.
    pub fn is_emissive(&self) -> bool {
        matches!(self, MaterialDesc::Emissive { .. })
    }

    fn validate(&self, name: &str) -> SceneResult<()> {
        if let MaterialDesc::Dielectric { ior } = self {
            if !(*ior > 0.0 && ior.is_finite()) {
                return Err(SceneError::InvalidRefractionIndex {
                    name: name.to_string(),
                    ior: *ior,
                });
            }
        }
        Ok(())
    }
}

/// A sphere in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    /// Key into `SceneDescription::materials`
    pub material: String,
}

/// Background image sampled by ray direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyDesc {
    pub texture: String,
}

/// Tuning for the direct light sampling heuristic.
///
/// A scattering hit in the first `window` bounces samples every light with
/// probability `light_count * diffuse_probability`. Each probe ray is traced
/// with the `(probe_depth, probe_max_depth)` depth pair.
///
/// Emissive surfaces end the path where they are hit, so they never sample
/// lights and need no probability of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSampling {
    pub diffuse_probability: f64,
    pub window: u32,
    pub probe_depth: u32,
    pub probe_max_depth: u32,
}

impl Default for LightSampling {
    fn default() -> Self {
        Self {
            diffuse_probability: 0.1,
            window: 2,
            probe_depth: 2,
            probe_max_depth: 5,
        }
    }
}

/// Options that affect how a scene is rendered but not what is in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Master seed; each scanline derives its own generator from it
    pub seed: u64,

    /// Output gamma. 1.0 writes the averaged color unchanged.
    pub gamma: f64,

    /// Keep emissive spheres in the intersection list as visible surfaces
    pub lights_visible: bool,

    pub light_sampling: LightSampling,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            gamma: 1.0,
            lights_visible: false,
            light_sampling: LightSampling::default(),
        }
    }
}

impl RenderSettings {
    /// Check gamma and the light sampling probability.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.gamma > 0.0 && self.gamma.is_finite()) {
            return Err(SceneError::InvalidSetting(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        let p = self.light_sampling.diffuse_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SceneError::InvalidSetting(format!(
                "light_sampling.diffuse_probability must be in [0, 1], got {p}"
            )));
        }
        Ok(())
    }
}

/// Complete, renderer-agnostic scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub camera: CameraParams,
    #[serde(default)]
    pub sky: Option<SkyDesc>,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<SphereDesc>,
    #[serde(default)]
    pub render: RenderSettings,
}

impl SceneDescription {
    /// Parse a scene from JSON text. The result is not yet validated.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file. The result is not yet validated.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let scene = Self::from_json_str(&text)?;
        log::debug!(
            "Parsed scene {}: {} objects, {} materials",
            path.as_ref().display(),
            scene.objects.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    /// Check every configuration constraint.
    ///
    /// Texture files are not touched here; they are checked when loaded.
    pub fn validate(&self) -> SceneResult<()> {
        validate_settings(self.width, self.height, self.samples_per_pixel, self.max_depth)?;
        self.camera.validate()?;
        self.render.validate()?;

        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        for (index, object) in self.objects.iter().enumerate() {
            validate_radius(index, object.radius)?;
            if !self.materials.contains_key(&object.material) {
                return Err(SceneError::UnknownMaterial {
                    object: index,
                    name: object.material.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Check image size and sampling parameters.
pub fn validate_settings(
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
) -> SceneResult<()> {
    // Ray generation divides by (width - 1) and (height - 1)
    if width < 2 || height < 2 {
        return Err(SceneError::InvalidDimensions { width, height });
    }
    if samples_per_pixel == 0 {
        return Err(SceneError::InvalidSamples);
    }
    if max_depth == 0 {
        return Err(SceneError::InvalidDepth);
    }
    Ok(())
}

/// Check a sphere radius.
pub fn validate_radius(index: usize, radius: f64) -> SceneResult<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidRadius { index, radius })
    }
}
