//! Reflection, refraction and Fresnel helpers.

use crate::Vec3;

/// Mirror `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `uv` through a surface with unit normal `n`.
///
/// `eta_ratio` is the ratio of refractive indices (incident over transmitted).
/// The parallel component uses `|r_perp|^2` (Snell's law in vector form).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f64, ref_index: f64) -> f64 {
    let r0 = ((1.0 - ref_index) / (1.0 + ref_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
