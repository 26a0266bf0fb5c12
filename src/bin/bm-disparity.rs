//! Compute disparity and depth maps for a stereo image pair from the command line.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::{Path, PathBuf};

use bm_disparity::{pipeline::Pipeline, prelude::*};
use clap::Parser;
use image::GrayImage;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(version, about = "Block matching stereo disparity and depth")]
struct Args {
    /// Left image of the rectified pair
    #[arg(default_value = "images/left.png")]
    left: PathBuf,

    /// Right image of the rectified pair
    #[arg(default_value = "images/right.png")]
    right: PathBuf,

    /// TOML configuration file, command line options override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Matcher to use, `iterative` or `vectorized`
    #[arg(short, long, value_parser = parse_method)]
    method: Option<Method>,

    /// Number of horizontal shifts searched
    #[arg(short = 'd', long)]
    num_disparities: Option<usize>,

    /// Matching window side length (odd, at least 3)
    #[arg(short, long)]
    block: Option<usize>,

    /// Use the legacy 2 * block window in the iterative matcher
    #[arg(long)]
    legacy_window: bool,

    /// Where to write the disparity image
    #[arg(long, default_value = "disparity.png")]
    disparity_out: PathBuf,

    /// Where to write the normalised depth image
    #[arg(long)]
    depth_out: Option<PathBuf>
}

// -----------------------------------------------------------------------------------------------
// MAIN
// -----------------------------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default()
    };

    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(n) = args.num_disparities {
        config.matcher.num_disparities = n;
    }
    if let Some(block) = args.block {
        config.matcher.block = block;
    }
    if args.legacy_window {
        config.matcher.window = WindowGeometry::Legacy;
    }

    let mut pipeline = Pipeline::new(config)?;
    let output = pipeline.run(&args.left, &args.right)?;

    save(&output.display, &args.disparity_out)?;

    if let Some(path) = &args.depth_out {
        save(&output.depth.to_luma_normalised(), path)?;
    }

    Ok(())
}

fn parse_method(s: &str) -> std::result::Result<Method, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn save(img: &GrayImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|source| Error::OutputUnwritable {
        path: path.to_path_buf(),
        source
    })?;

    log::info!("Wrote {:?}", path);

    Ok(())
}
