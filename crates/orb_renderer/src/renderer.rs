//! Core path tracing renderer.
//!
//! Implements recursive path tracing with:
//! - Probabilistic direct light sampling toward emissive spheres
//! - Jittered multi-sampling per pixel
//! - One parallel task per scanline, each with its own generator

use std::path::Path;
use std::time::Instant;

use crate::{gen_f64, row_rng, HitRecord, Scene, ScatterResult};
use image::{ImageResult, Rgba, RgbaImage};
use orb_math::{Color, Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;

/// Lower bound of the hit interval for every ray; keeps a bounced ray from
/// re-hitting the surface it leaves.
pub const HIT_EPSILON: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Returns black once `depth` reaches zero. On a scattering hit the bounce
/// is traced with `(max_depth, depth - 1)` as its depth pair, so the two
/// values trade places each bounce and `depth` drops by one every second
/// bounce. The result is clamped to [0, 1] per channel.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(HIT_EPSILON, f64::INFINITY)) else {
        return scene.background(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        ScatterResult::Terminated { color } => color,
        ScatterResult::Scattered {
            attenuation,
            scattered,
        } => {
            let direct = sample_lights(scene, &rec, attenuation, depth, max_depth, rng);
            let indirect = ray_color(&scattered, scene, max_depth, depth - 1, rng);
            (direct + attenuation * indirect).clamp(Color::ZERO, Color::ONE)
        }
    }
}

/// Direct light term: with some probability, probe every light from the hit
/// point and average what the probes see.
///
/// Only scattering hits get here; a visible light ends its path in
/// `ray_color` with its own emission.
fn sample_lights(
    scene: &Scene,
    rec: &HitRecord,
    attenuation: Color,
    depth: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let lights = scene.lights();
    if lights.is_empty() {
        return Color::ZERO;
    }

    let tuning = &scene.settings().light_sampling;
    let light_count = lights.len() as f64;

    // The draw happens even outside the window so the random stream does not
    // depend on depth.
    let triggered = gen_f64(rng) > 1.0 - light_count * tuning.diffuse_probability;
    if !triggered || !in_light_window(depth, max_depth, tuning.window) {
        return Color::ZERO;
    }

    let mut sum = Color::ZERO;
    for light in lights {
        let probe = Ray::new(rec.p, light.center() - rec.p);
        sum += attenuation
            * ray_color(&probe, scene, tuning.probe_depth, tuning.probe_max_depth, rng);
    }
    sum / light_count
}

/// True for the last `window` bounces below `max_depth`.
///
/// A `max_depth` smaller than the window never qualifies.
fn in_light_window(depth: u32, max_depth: u32, window: u32) -> bool {
    max_depth
        .checked_sub(window)
        .is_some_and(|floor| depth > floor)
}

/// Convert a linear color to 8-bit RGBA.
///
/// Channels are clamped to [0, 1], raised to `1 / gamma`, scaled by 255 and
/// truncated. Alpha is always opaque.
pub fn color_to_rgba(color: Color, gamma: f64) -> [u8; 4] {
    let mut c = color.clamp(Color::ZERO, Color::ONE);
    if gamma != 1.0 {
        c = c.powf(1.0 / gamma);
    }
    [
        (c.x * 255.0) as u8,
        (c.y * 255.0) as u8,
        (c.z * 255.0) as u8,
        255,
    ]
}

/// Average of `samples_per_pixel` jittered samples for pixel (x, y).
///
/// Row 0 is the top of the image; image-plane v = 0 is the bottom.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
    let width = scene.width() as f64;
    let height = scene.height() as f64;
    let samples = scene.samples_per_pixel();
    let max_depth = scene.max_depth();
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let u = (x as f64 + gen_f64(rng)) / (width - 1.0);
        let v = (height - (y as f64 + gen_f64(rng))) / (height - 1.0);
        let ray = scene.camera().get_ray(u, v);
        pixel_color += ray_color(&ray, scene, max_depth, max_depth, rng);
    }

    pixel_color / samples as f64
}

/// Render scanline `y` into `row`, which holds `width` RGBA pixels.
pub fn render_line(scene: &Scene, y: u32, row: &mut [u8], rng: &mut dyn RngCore) {
    for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
        let color = render_pixel(scene, x as u32, y, rng);
        pixel.copy_from_slice(&color_to_rgba(color, scene.settings().gamma));
    }
}

/// Render the whole scene.
///
/// Each scanline is an independent rayon task seeded from
/// `(settings.seed, y)`, so output is identical for any thread count.
pub fn render(scene: &Scene) -> ImageBuffer {
    let mut image = ImageBuffer::new(scene.width(), scene.height());

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} ({} objects, {} lights)",
        scene.width(),
        scene.height(),
        scene.samples_per_pixel(),
        scene.max_depth(),
        scene.visible_objects(),
        scene.lights().len()
    );

    let start = Instant::now();
    let row_bytes = scene.width() as usize * 4;
    image
        .pixels
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = row_rng(scene.settings().seed, y as u32);
            render_line(scene, y as u32, row, &mut rng);
        });

    log::info!("Frame time: {:?}", start.elapsed());
    image
}

/// 8-bit RGBA image, row-major with row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| Rgba(self.get(x, y)))
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}
