use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use orb_core::{SceneDescription, TextureCache};
use orb_renderer::{render, Scene};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let mut description = SceneDescription::load(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    args.apply_overrides(&mut description);

    // Texture paths in the scene file are relative to the file itself
    let base_dir = args.scene.parent().unwrap_or(Path::new("."));
    let mut textures = TextureCache::with_base_dir(base_dir);

    let scene = Scene::from_description(&description, &mut textures)
        .with_context(|| format!("Invalid scene {}", args.scene.display()))?;

    let image = render(&scene);
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Wrote {}", args.output.display());
    Ok(())
}
