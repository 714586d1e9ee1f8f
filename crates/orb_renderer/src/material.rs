//! Surface materials and how they scatter light.
//!
//! The set of materials is closed: [`Material`] is an enum over one struct
//! per behavior, and every variant answers the same question - given an
//! incident ray and a hit, does the path continue, in which direction, and
//! with what attenuation.

use std::sync::Arc;

use crate::{gen_f64, hittable::HitRecord, random_in_unit_sphere};
use orb_core::Texture;
use orb_math::{reflect, reflectance, refract, Color, Ray, VecExt};
use rand::RngCore;

/// Outcome of a scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterResult {
    /// The path continues along `scattered`, weighted by `attenuation`.
    Scattered { attenuation: Color, scattered: Ray },
    /// The path ends here. `color` is the light the surface contributes:
    /// the emission of a light, or black for an absorbed ray.
    Terminated { color: Color },
}

impl ScatterResult {
    /// The color factor carried by either outcome.
    pub fn attenuation(&self) -> Color {
        match *self {
            ScatterResult::Scattered { attenuation, .. } => attenuation,
            ScatterResult::Terminated { color } => color,
        }
    }
}

/// A surface material.
#[derive(Clone)]
pub enum Material {
    Emissive(DiffuseLight),
    Diffuse(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    Textured(TexturedLambertian),
}

impl Material {
    /// Scatter an incoming ray at `rec`.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        match self {
            Material::Emissive(m) => m.scatter(),
            Material::Diffuse(m) => m.scatter(rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
            Material::Textured(m) => m.scatter(rec, rng),
        }
    }

    /// True for light sources.
    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive(_))
    }
}

impl From<DiffuseLight> for Material {
    fn from(m: DiffuseLight) -> Self {
        Material::Emissive(m)
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Diffuse(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

impl From<TexturedLambertian> for Material {
    fn from(m: TexturedLambertian) -> Self {
        Material::Textured(m)
    }
}

/// Light emitter. Terminates every path that reaches it.
#[derive(Debug, Clone)]
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }

    fn scatter(&self) -> ScatterResult {
        ScatterResult::Terminated { color: self.emit }
    }
}

impl Default for DiffuseLight {
    fn default() -> Self {
        Self::new(Color::ONE)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        ScatterResult::Scattered {
            attenuation: self.albedo,
            scattered: diffuse_bounce(rec, rng),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough.
    ///   Clamped to [0, 1].
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        // Fuzz is relative to the incident length, not a unit reflection
        let reflected = reflect(ray_in.direction(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the ray below the surface; those rays are absorbed
        if direction.dot(rec.normal) > 0.0 {
            ScatterResult::Scattered {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, direction),
            }
        } else {
            ScatterResult::Terminated { color: Color::ZERO }
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self { ior }
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().unit();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || reflectance(cos_theta, refraction_ratio) > gen_f64(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        ScatterResult::Scattered {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

/// Diffuse material colored by an image wrapped around the surface.
#[derive(Debug, Clone)]
pub struct TexturedLambertian {
    /// Shows through fully transparent texels
    albedo: Color,
    texture: Arc<Texture>,
    /// Added to u before lookup; rotates the image around the sphere
    horizontal_offset: f64,
}

impl TexturedLambertian {
    pub fn new(albedo: Color, texture: Arc<Texture>, horizontal_offset: f64) -> Self {
        Self {
            albedo,
            texture,
            horizontal_offset,
        }
    }

    /// Color at surface coordinates (u, v).
    ///
    /// The offset u wraps back by one only once, so offsets that push u
    /// more than a full turn out of [0, 1] clamp to the image edge.
    pub fn albedo_at(&self, u: f64, v: f64) -> Color {
        let mut rot = u + self.horizontal_offset;
        if rot > 1.0 {
            rot -= 1.0;
        }

        // Image row 0 is the top, surface v = 0 is the bottom
        let x = (rot * self.texture.width() as f64).floor() as i64;
        let y = ((1.0 - v) * (self.texture.height() - 1) as f64).floor() as i64;

        self.texture.texel(x, y).unwrap_or(self.albedo)
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        ScatterResult::Scattered {
            attenuation: self.albedo_at(rec.u, rec.v),
            scattered: diffuse_bounce(rec, rng),
        }
    }
}

/// Normal plus a random point in the unit sphere, falling back to the normal
/// when the two nearly cancel.
fn diffuse_bounce(rec: &HitRecord, rng: &mut dyn RngCore) -> Ray {
    let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

    // Catch degenerate scatter direction
    if scatter_direction.near_zero() {
        scatter_direction = rec.normal;
    }

    Ray::new(rec.p, scatter_direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit<'a>(material: &'a Material, ray: &Ray, normal: Vec3, front_face: bool) -> HitRecord<'a> {
        HitRecord {
            p: ray.at(1.0),
            normal,
            material,
            u: 0.5,
            v: 0.5,
            t: 1.0,
            front_face,
        }
    }

    #[test]
    fn test_emissive_terminates_with_light_color() {
        let material = Material::from(DiffuseLight::new(Color::new(4.0, 3.0, 2.0)));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let rec = hit(&material, &ray, Vec3::Z, true);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(material.is_emissive());
        assert_eq!(
            material.scatter(&ray, &rec, &mut rng),
            ScatterResult::Terminated {
                color: Color::new(4.0, 3.0, 2.0)
            }
        );
    }

    #[test]
    fn test_lambertian_scatters_outward() {
        let albedo = Color::new(0.2, 0.4, 0.6);
        let material = Material::from(Lambertian::new(albedo));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let rec = hit(&material, &ray, Vec3::Z, true);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..200 {
            match material.scatter(&ray, &rec, &mut rng) {
                ScatterResult::Scattered {
                    attenuation,
                    scattered,
                } => {
                    assert_eq!(attenuation, albedo);
                    assert_eq!(scattered.origin(), rec.p);
                    assert!(scattered.direction().dot(rec.normal) > 0.0);
                }
                other => panic!("diffuse must continue, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::from(Metal::new(Color::ONE, 0.0));
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = hit(&material, &ray, Vec3::Y, true);
        let mut rng = StdRng::seed_from_u64(3);

        match material.scatter(&ray, &rec, &mut rng) {
            ScatterResult::Scattered { scattered, .. } => {
                let expected = Vec3::new(1.0, 1.0, 0.0);
                assert!((scattered.direction() - expected).length() < 1e-12);
            }
            other => panic!("mirror must reflect, got {other:?}"),
        }
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        let material = Material::from(Metal::new(Color::ONE, 0.0));
        // Incident direction along the normal reflects into the surface
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let rec = hit(&material, &ray, Vec3::Y, true);
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(
            material.scatter(&ray, &rec, &mut rng),
            ScatterResult::Terminated { color: Color::ZERO }
        );
    }

    #[test]
    fn test_metal_fuzz_scales_with_incident_length() {
        let material = Material::from(Metal::new(Color::ONE, 1.0));
        // Long grazing ray: reflection is (10, 0.5, 0), so only fuzz offsets
        // with y < -0.5 end below the surface. That cap holds 5/32 of the
        // unit ball's volume.
        let ray = Ray::new(Vec3::new(-10.0, 0.5, 0.0), Vec3::new(10.0, -0.5, 0.0));
        let rec = hit(&material, &ray, Vec3::Y, true);
        let mut rng = StdRng::seed_from_u64(8);

        let draws = 20_000;
        let absorbed = (0..draws)
            .filter(|_| {
                matches!(
                    material.scatter(&ray, &rec, &mut rng),
                    ScatterResult::Terminated { .. }
                )
            })
            .count();
        let fraction = absorbed as f64 / draws as f64;
        assert!(
            (fraction - 0.15625).abs() < 0.02,
            "absorbed fraction {fraction}"
        );
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::from(Dielectric::new(1.5));
        // Leaving glass at a grazing angle: ratio 1.5, sin ~ 0.99
        let direction = Vec3::new(1.0, 0.1, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, -0.1, 0.0), direction);
        let rec = hit(&material, &ray, Vec3::NEG_Y, false);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            match material.scatter(&ray, &rec, &mut rng) {
                ScatterResult::Scattered {
                    attenuation,
                    scattered,
                } => {
                    assert_eq!(attenuation, Color::ONE);
                    let expected = reflect(direction.unit(), rec.normal);
                    assert!((scattered.direction() - expected).length() < 1e-12);
                }
                other => panic!("dielectric must continue, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_dielectric_mostly_refracts_head_on() {
        let material = Material::from(Dielectric::new(1.5));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = hit(&material, &ray, Vec3::Y, true);
        let mut rng = StdRng::seed_from_u64(6);

        // r0 = 0.04 at normal incidence
        let refracted = (0..1000)
            .filter(|_| match material.scatter(&ray, &rec, &mut rng) {
                ScatterResult::Scattered { scattered, .. } => scattered.direction().y < 0.0,
                ScatterResult::Terminated { .. } => false,
            })
            .count();
        assert!(refracted > 900, "refracted {refracted} of 1000");
    }

    #[test]
    fn test_textured_lookup_with_offset() {
        // Left half red, right half green
        let texture = Arc::new(Texture::new(
            2,
            1,
            vec![[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]],
            "<test>",
        )
        .unwrap());
        let plain = TexturedLambertian::new(Color::ZERO, texture.clone(), 0.0);
        assert_eq!(plain.albedo_at(0.25, 0.5), Color::new(1.0, 0.0, 0.0));
        assert_eq!(plain.albedo_at(0.75, 0.5), Color::new(0.0, 1.0, 0.0));

        // Offset 0.5 swaps the halves, wrapping past 1
        let shifted = TexturedLambertian::new(Color::ZERO, texture, 0.5);
        assert_eq!(shifted.albedo_at(0.25, 0.5), Color::new(0.0, 1.0, 0.0));
        assert_eq!(shifted.albedo_at(0.75, 0.5), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_textured_flips_v() {
        // Top row white, bottom row black
        let texture = Arc::new(Texture::new(
            1,
            2,
            vec![[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 1.0]],
            "<test>",
        )
        .unwrap());
        let material = TexturedLambertian::new(Color::ZERO, texture, 0.0);
        assert_eq!(material.albedo_at(0.5, 1.0), Color::ONE);
        assert_eq!(material.albedo_at(0.5, 0.0), Color::ZERO);
    }

    #[test]
    fn test_textured_transparent_texel_uses_albedo() {
        let texture = Arc::new(Texture::new(1, 1, vec![[1.0, 1.0, 1.0, 0.0]], "<test>").unwrap());
        let albedo = Color::new(0.1, 0.2, 0.3);
        let material = Material::from(TexturedLambertian::new(albedo, texture, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let rec = hit(&material, &ray, Vec3::Z, true);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(material.scatter(&ray, &rec, &mut rng).attenuation(), albedo);
    }
}
