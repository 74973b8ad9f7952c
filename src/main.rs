use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use log::{ debug, error, info };

use sphere_tracer::scene::Scene;
use sphere_tracer::parallel::parallel_render;
use sphere_tracer::error::Result;
use sphere_tracer::consts::{ NUM_THREADS, OUT_FILE };

/// Renders spheres with Phong lighting, hard shadows and mirror reflections.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// JSON scene description; renders the built-in scene when left out
    #[clap(short, long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Where to write the PPM image
    #[clap(short, long, value_name = "FILE", default_value = OUT_FILE)]
    output: PathBuf,

    /// Canvas width in pixels, overriding the scene
    #[clap(long)]
    width: Option<usize>,

    /// Canvas height in pixels, overriding the scene
    #[clap(long)]
    height: Option<usize>,

    /// Number of reflection bounces, overriding the scene
    #[clap(short, long)]
    depth: Option<i32>,

    /// Render threads; 1 renders on the main thread
    #[clap(short, long, default_value_t = NUM_THREADS)]
    threads: usize,
}

fn run(args: Args) -> Result<()> {
    let mut scene = match args.scene {
        Some(ref path) => Scene::load(path)?,
        None => {
            debug!("No scene given, using the built-in scene");
            Scene::reference()
        }
    };

    if let Some(width) = args.width {
        scene.camera.hsize = width;
    }
    if let Some(height) = args.height {
        scene.camera.vsize = height;
    }
    if let Some(depth) = args.depth {
        scene.recursion_depth = depth;
    }

    let started = Instant::now();
    let canvas = if args.threads <= 1 {
        info!("Rendering {}x{} on the main thread...", scene.camera.hsize,
            scene.camera.vsize);
        scene.render()
    } else {
        parallel_render(scene.world, scene.camera, scene.recursion_depth,
            args.threads)?
    };
    info!("Rendered in {:.2?}", started.elapsed());

    canvas.save(&args.output)?;
    info!("Saved render to {}.", args.output.display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();
    debug!("{:?}", args);

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
