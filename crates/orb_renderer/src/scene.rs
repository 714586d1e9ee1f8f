//! Renderable scene: validated geometry, camera, background and settings.
//!
//! Emissive spheres are partitioned into a separate light list when the
//! scene is built. Unless `lights_visible` is set they are not part of the
//! intersection list at all, and only serve as direct light sampling
//! targets.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    sky_gradient, Camera, Dielectric, DiffuseLight, HitRecord, Hittable, HittableList, Lambertian,
    Material, Metal, Sky, Sphere, TexturedLambertian,
};
use orb_core::scene::{validate_radius, validate_settings};
use orb_core::{
    CameraParams, MaterialDesc, RenderSettings, SceneDescription, SceneResult, TextureCache,
};
use orb_math::{Color, Interval, Ray};

/// A scene ready to render. Read-only once built, so the values
/// [`SceneBuilder::build`] validated stay valid.
pub struct Scene {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    camera: Camera,
    settings: RenderSettings,
    world: HittableList,
    lights: Vec<Sphere>,
    sky: Option<Sky>,
}

impl Scene {
    /// Build a scene from a description, decoding textures through `cache`.
    pub fn from_description(desc: &SceneDescription, cache: &mut TextureCache) -> SceneResult<Self> {
        desc.validate()?;

        let mut materials: BTreeMap<&str, Arc<Material>> = BTreeMap::new();
        for (name, material) in &desc.materials {
            materials.insert(name.as_str(), Arc::new(build_material(name, material, cache)?));
        }

        let mut builder = SceneBuilder::new(desc.camera.clone())
            .with_resolution(desc.width, desc.height)
            .with_quality(desc.samples_per_pixel, desc.max_depth)
            .with_settings(desc.render.clone());

        if let Some(sky) = &desc.sky {
            builder = builder.with_sky(Sky::new(cache.load(&sky.texture)?));
        }

        for object in &desc.objects {
            // validate() guarantees every name resolves
            if let Some(material) = materials.get(object.material.as_str()) {
                builder = builder.add(Sphere::new(object.center, object.radius, material.clone()));
            }
        }

        builder.build()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel, at least 1.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Path depth budget, at least 1.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Closest hit among the visible objects.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.world.hit(ray, ray_t)
    }

    /// Color for a ray that hit nothing.
    pub fn background(&self, ray: &Ray) -> Color {
        match &self.sky {
            Some(sky) => sky.sample(ray.direction()),
            None => sky_gradient(ray.direction()),
        }
    }

    /// Emissive spheres, in declaration order.
    pub fn lights(&self) -> &[Sphere] {
        &self.lights
    }

    /// Number of objects rays can intersect.
    pub fn visible_objects(&self) -> usize {
        self.world.len()
    }

    pub fn sky(&self) -> Option<&Sky> {
        self.sky.as_ref()
    }
}

fn build_material(
    name: &str,
    desc: &MaterialDesc,
    cache: &mut TextureCache,
) -> SceneResult<Material> {
    let material = match desc {
        MaterialDesc::Emissive { color } => DiffuseLight::new(*color).into(),
        MaterialDesc::Diffuse { albedo } => Lambertian::new(*albedo).into(),
        MaterialDesc::Metal { albedo, fuzz } => {
            if !(0.0..=1.0).contains(fuzz) {
                log::warn!("Material '{}': fuzz {} clamped to [0, 1]", name, fuzz);
            }
            Metal::new(*albedo, *fuzz).into()
        }
        MaterialDesc::Dielectric { ior } => Dielectric::new(*ior).into(),
        MaterialDesc::Textured {
            albedo,
            texture,
            horizontal_offset,
        } => TexturedLambertian::new(*albedo, cache.load(texture)?, *horizontal_offset).into(),
    };
    Ok(material)
}

/// Assembles a [`Scene`] in code.
///
/// ```ignore
/// let scene = SceneBuilder::new(camera_params)
///     .with_resolution(320, 180)
///     .with_quality(16, 8)
///     .add(Sphere::new(Point3::ZERO, 1.0, grey))
///     .build()?;
/// ```
pub struct SceneBuilder {
    camera: CameraParams,
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    sky: Option<Sky>,
    settings: RenderSettings,
    objects: Vec<Sphere>,
}

impl SceneBuilder {
    /// Start a scene with default quality settings and no objects.
    pub fn new(camera: CameraParams) -> Self {
        Self {
            camera,
            width: 400,
            height: 225,
            samples_per_pixel: 10,
            max_depth: 10,
            sky: None,
            settings: RenderSettings::default(),
            objects: Vec::new(),
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Use an image background instead of the gradient.
    pub fn with_sky(mut self, sky: Sky) -> Self {
        self.sky = Some(sky);
        self
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    /// Add a sphere. Order is kept.
    pub fn add(mut self, sphere: Sphere) -> Self {
        self.objects.push(sphere);
        self
    }

    /// Validate everything and partition out the lights.
    pub fn build(self) -> SceneResult<Scene> {
        validate_settings(self.width, self.height, self.samples_per_pixel, self.max_depth)?;
        self.settings.validate()?;
        for (index, sphere) in self.objects.iter().enumerate() {
            validate_radius(index, sphere.radius())?;
        }
        let camera = Camera::new(&self.camera)?;

        let mut world = HittableList::new();
        let mut lights = Vec::new();
        for sphere in self.objects {
            if sphere.material().is_emissive() {
                lights.push(sphere.clone());
                if self.settings.lights_visible {
                    world.add(Box::new(sphere));
                }
            } else {
                world.add(Box::new(sphere));
            }
        }

        log::debug!(
            "Scene built: {} visible objects, {} lights (lights visible: {})",
            world.len(),
            lights.len(),
            self.settings.lights_visible
        );

        Ok(Scene {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            camera,
            settings: self.settings,
            world,
            lights,
            sky: self.sky,
        })
    }
}
