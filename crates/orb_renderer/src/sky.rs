//! Background seen by rays that leave the scene.

use std::sync::Arc;

use orb_core::Texture;
use orb_math::{Color, Interval, Vec3, VecExt};

/// Map a direction to background coordinates (u, t) in [0, 1].
///
/// `t` runs from 0 looking straight down to 1 looking straight up. `u` does
/// the same for the x axis.
fn direction_to_uv(direction: Vec3) -> (f64, f64) {
    let unit = direction.unit();
    let t = Interval::UNIT.clamp(0.5 * (unit.y + 1.0));
    let u = Interval::UNIT.clamp(0.5 * (unit.x + 1.0));
    (u, t)
}

/// Vertical white-to-blue gradient used when there is no sky image.
pub fn sky_gradient(direction: Vec3) -> Color {
    let (_, t) = direction_to_uv(direction);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white.lerp(blue, t)
}

/// Image background indexed by ray direction.
#[derive(Clone, Debug)]
pub struct Sky {
    texture: Arc<Texture>,
}

impl Sky {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Background color for a ray travelling along `direction`.
    ///
    /// Looking up reads the top image row. Transparent texels are black.
    pub fn sample(&self, direction: Vec3) -> Color {
        let (u, t) = direction_to_uv(direction);
        let x = u * (self.texture.width() - 1) as f64;
        let y = (1.0 - t) * (self.texture.height() - 1) as f64;
        self.texture
            .texel(x as i64, y as i64)
            .unwrap_or(Color::ZERO)
    }
}
