//! Orb Renderer - CPU Path Tracing
//!
//! A recursive path tracer over an exhaustively searched list of spheres,
//! with a biased direct-light sampling heuristic layered on top. Scanlines
//! render in parallel; every scanline owns its random generator, so a given
//! seed always reproduces the same image.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sky;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult, TexturedLambertian};
pub use renderer::{
    color_to_rgba, ray_color, render, render_line, render_pixel, ImageBuffer, HIT_EPSILON,
};
pub use sampling::{gen_f64, random_in_unit_sphere, row_rng};
pub use scene::{Scene, SceneBuilder};
pub use sky::{sky_gradient, Sky};
pub use sphere::Sphere;

/// Re-export math and scene description types
pub use orb_core::{CameraParams, LightSampling, RenderSettings, SceneDescription, SceneError, TextureCache};
pub use orb_math::{Color, Interval, Point3, Ray, Vec3};
