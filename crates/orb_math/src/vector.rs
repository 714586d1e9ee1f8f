use glam::DVec3;

/// 3-component vector used for points, directions and colors.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = Vec3;

/// Components with magnitude below this count as zero.
pub const NEAR_ZERO_EPSILON: f64 = 1e-4;

/// Operations the path tracer needs on top of glam's vector API.
///
/// glam already covers add/sub/scale, `dot`, `cross`, `length`,
/// `length_squared` and `distance`.
pub trait VecExt {
    /// True when every component is within [`NEAR_ZERO_EPSILON`] of zero.
    fn near_zero(&self) -> bool;

    /// Normalize. A zero-length input yields non-finite components; callers
    /// must not pass one.
    fn unit(self) -> Self;
}

impl VecExt for DVec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().max_element() < NEAR_ZERO_EPSILON
    }

    #[inline]
    fn unit(self) -> Self {
        self / self.length()
    }
}

/// Convert degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_has_length_one() {
        let samples = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-7.5, 0.25, 1e-3),
            Vec3::new(1e6, -1e6, 3.0),
            Vec3::new(0.0, 0.0, -42.0),
        ];
        for v in samples {
            assert!((v.unit().length() - 1.0).abs() < 1e-9, "{v:?}");
        }
    }

    #[test]
    fn test_near_zero_symmetric() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(5e-5, -5e-5, 0.0).near_zero());
        assert!(!Vec3::new(-1.0, 0.0, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, 2e-4).near_zero());
    }

    #[test]
    fn test_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!((b - a).length_squared(), 25.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(degrees_to_radians(0.0), 0.0);
    }
}
