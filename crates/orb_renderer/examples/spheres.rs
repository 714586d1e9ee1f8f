//! Simple path tracer example.
//!
//! Builds a small scene in code (ground, glass, metal, a lamp and a field of
//! small random spheres) and saves it as PNG.
//!
//! Run with: cargo run --release --example spheres -- [output.png]

use std::sync::Arc;

use orb_renderer::{
    render, CameraParams, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal,
    SceneBuilder, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "spheres.png".to_string());

    println!("Orb Path Tracer - Spheres Example");
    println!("=================================");

    let camera = CameraParams {
        look_from: Vec3::new(13.0, 2.0, 3.0),
        look_at: Vec3::new(0.0, 0.0, 0.0),
        view_up: Vec3::new(0.0, 1.0, 0.0),
        vertical_fov: 20.0,
        aspect_ratio: 16.0 / 9.0,
    };

    let start = std::time::Instant::now();
    let mut builder = SceneBuilder::new(camera)
        .with_resolution(400, 225)
        .with_quality(32, 8)
        .with_seed(2024);
    for sphere in build_spheres() {
        builder = builder.add(sphere);
    }
    let scene = match builder.build() {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Invalid scene: {}", e);
            return;
        }
    };
    println!("Scene built in {:?}", start.elapsed());

    let image = render(&scene);

    match image.save_png(&output) {
        Ok(()) => println!("Saved to {}", output),
        Err(e) => eprintln!("Failed to save {}: {}", output, e),
    }
}

fn shared(material: impl Into<Material>) -> Arc<Material> {
    Arc::new(material.into())
}

fn build_spheres() -> Vec<Sphere> {
    let mut spheres = Vec::new();

    // Ground
    spheres.push(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        shared(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    ));

    // Three main spheres
    spheres.push(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        shared(Dielectric::new(1.5)),
    ));
    spheres.push(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        shared(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    spheres.push(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        shared(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    // Lamp overhead; only reached through direct light sampling
    spheres.push(Sphere::new(
        Vec3::new(0.0, 6.0, 0.0),
        1.0,
        shared(DiffuseLight::new(Color::new(1.0, 0.95, 0.8))),
    ));

    // Small random spheres, fixed seed so the layout is stable
    let mut rng = StdRng::seed_from_u64(7);
    let glass = shared(Dielectric::new(1.5));

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                shared(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f64>(),
                    0.5 + 0.5 * rng.gen::<f64>(),
                    0.5 + 0.5 * rng.gen::<f64>(),
                );
                shared(Metal::new(albedo, 0.5 * rng.gen::<f64>()))
            } else {
                glass.clone()
            };
            spheres.push(Sphere::new(center, 0.2, material));
        }
    }

    println!("Created {} spheres", spheres.len());
    spheres
}
