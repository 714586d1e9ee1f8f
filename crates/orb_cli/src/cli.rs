use std::path::PathBuf;

use clap::Parser;
use orb_core::SceneDescription;

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "orb")]
#[command(about = "Render a JSON sphere scene with a CPU path tracer")]
pub struct Args {
    /// Scene file (JSON)
    pub scene: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Override the scene's random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,
}

impl Args {
    /// Apply command line overrides to a loaded scene, before validation.
    pub fn apply_overrides(&self, scene: &mut SceneDescription) {
        if let Some(seed) = self.seed {
            scene.render.seed = seed;
        }
        if let Some(samples) = self.samples {
            scene.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            scene.max_depth = max_depth;
        }
    }
}
