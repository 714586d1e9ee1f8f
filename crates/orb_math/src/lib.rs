//! Orb math - vectors, rays and optics helpers shared by the renderer.
//!
//! Everything is `f64`. `Vec3` is glam's `DVec3`; the extra operations the
//! path tracer needs live on [`VecExt`].

// Re-export glam for convenience
pub use glam;

mod interval;
mod optics;
mod ray;
mod vector;

pub use interval::Interval;
pub use optics::{reflect, reflectance, refract};
pub use ray::Ray;
pub use vector::{degrees_to_radians, Color, Point3, Vec3, VecExt, NEAR_ZERO_EPSILON};
