//! Camera for ray generation.

use orb_core::{CameraParams, SceneResult};
use orb_math::{degrees_to_radians, Point3, Ray, Vec3, VecExt};

/// Pinhole camera mapping normalized image-plane coordinates to world rays.
///
/// Derived once from [`CameraParams`] and immutable afterwards.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,

    // Orthonormal basis; w points away from the view direction
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Build a camera, rejecting parameters that give no valid basis.
    pub fn new(params: &CameraParams) -> SceneResult<Self> {
        params.validate()?;

        let theta = degrees_to_radians(params.vertical_fov);
        let half_height = (theta / 2.0).tan();
        let half_width = params.aspect_ratio * half_height;

        let w = (params.look_from - params.look_at).unit();
        let u = params.view_up.cross(w).unit();
        let v = w.cross(u);

        let origin = params.look_from;
        Ok(Self {
            origin,
            lower_left_corner: origin - half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
            u,
            v,
            w,
        })
    }

    /// Ray through image-plane point (s, t); (0, 0) is the lower left corner
    /// and (1, 1) the upper right.
    pub fn get_ray(&self, s: f64, t: f64) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// The (u, v, w) basis.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::SceneError;

    fn params() -> CameraParams {
        CameraParams {
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            view_up: Vec3::Y,
            vertical_fov: 90.0,
            aspect_ratio: 2.0,
        }
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(&params()).unwrap();
        let (u, v, w) = camera.basis();

        assert!((w - Vec3::Z).length() < 1e-12);
        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
        assert_eq!(camera.origin(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(&params()).unwrap();
        let ray = camera.get_ray(0.5, 0.5);

        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction().unit() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_rays_span_field_of_view() {
        // fov 90 => half height 1 at unit distance; aspect 2 => half width 2
        let camera = Camera::new(&params()).unwrap();

        let lower_left = camera.get_ray(0.0, 0.0).direction();
        assert!((lower_left - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-12);

        let upper_right = camera.get_ray(1.0, 1.0).direction();
        assert!((upper_right - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_tilted_camera_basis_is_orthonormal() {
        let camera = Camera::new(&CameraParams {
            look_from: Vec3::new(4.0, 4.0, 4.0),
            look_at: Vec3::new(0.0, 1.0, 0.0),
            view_up: Vec3::Y,
            vertical_fov: 50.0,
            aspect_ratio: 16.0 / 9.0,
        })
        .unwrap();
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-9);
        }
        assert!(u.dot(v).abs() < 1e-9);
        assert!(u.dot(w).abs() < 1e-9);
        assert!(v.dot(w).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_camera_rejected() {
        let mut p = params();
        p.look_at = p.look_from;
        assert!(matches!(
            Camera::new(&p),
            Err(SceneError::DegenerateCamera(_))
        ));
    }
}
