//! Example: Load, validate and summarize a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.json

use std::env;

use orb_core::{MaterialDesc, SceneDescription};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene.json>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/spheres.json");
        println!("  cargo run --example inspect_scene -- scenes/earth.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    let scene = match SceneDescription::load(path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
            return;
        }
    };

    println!("\n=== Scene: {} ===", path);
    println!("Resolution: {}x{}", scene.width, scene.height);
    println!("Samples: {}, max depth: {}", scene.samples_per_pixel, scene.max_depth);
    println!(
        "Camera: {:?} -> {:?}, fov {:.1}, aspect {:.3}",
        scene.camera.look_from,
        scene.camera.look_at,
        scene.camera.vertical_fov,
        scene.camera.aspect_ratio
    );
    match &scene.sky {
        Some(sky) => println!("Sky: {}", sky.texture),
        None => println!("Sky: gradient"),
    }

    println!("\n--- Materials ---");
    for (name, material) in &scene.materials {
        let kind = match material {
            MaterialDesc::Emissive { .. } => "emissive",
            MaterialDesc::Diffuse { .. } => "diffuse",
            MaterialDesc::Metal { .. } => "metal",
            MaterialDesc::Dielectric { .. } => "dielectric",
            MaterialDesc::Textured { .. } => "textured",
        };
        println!("  {} ({})", name, kind);
    }

    println!("\n--- Objects ---");
    for (i, object) in scene.objects.iter().enumerate() {
        println!(
            "  [{}] r={:.2} at ({:.2}, {:.2}, {:.2}) using {}",
            i, object.radius, object.center.x, object.center.y, object.center.z, object.material
        );
    }

    match scene.validate() {
        Ok(()) => println!("\nScene is valid"),
        Err(e) => eprintln!("\nScene is invalid: {}", e),
    }
}
