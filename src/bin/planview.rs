//! Command-line driver: classify a raster map and write debug artifacts.
//!
//! The planner itself is external, so the SVG produced here carries only the
//! header and background; it is the harness a planning run appends to.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;

use planview::{ClassifyOptions, ObstaclePalette, SvgSceneWriter, classify, raster::codec};

#[derive(Parser, Debug)]
#[command(name = "planview", version)]
struct Cli {
    /// Input raster map image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the black/white classification back out as an image.
    #[arg(long)]
    filtered: Option<PathBuf>,

    /// Write an SVG overlay referencing the input image.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Obstacle palette JSON (colors + tolerance). Defaults to the built-in
    /// palette.
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Override the palette's per-channel match tolerance.
    #[arg(long)]
    tolerance: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let palette = match &cli.palette {
        Some(path) => ObstaclePalette::from_json_path(path)?,
        None => ObstaclePalette::default(),
    };
    let opts = ClassifyOptions {
        tolerance: cli.tolerance.unwrap_or(palette.tolerance),
        recolor: cli.filtered.is_some(),
        ..ClassifyOptions::default()
    };

    let mut raster = codec::decode(&cli.in_path)?;
    let canvas = raster.canvas();
    let grid = classify(&mut raster, &palette.colors, &opts)?;
    info!(
        blocked = grid.blocked_count(),
        total = grid.len(),
        "classified {}",
        cli.in_path.display()
    );

    if let Some(path) = &cli.filtered {
        info!("writing filtered image to {}", path.display());
        codec::encode(&raster, path)?;
    }

    if let Some(path) = &cli.svg {
        info!("writing svg overlay to {}", path.display());
        let file = File::create(path)
            .with_context(|| format!("create svg file '{}'", path.display()))?;
        let mut writer = SvgSceneWriter::new(BufWriter::new(file));
        writer.open(canvas)?;
        writer.draw_background(&cli.in_path.to_string_lossy())?;
        writer.close()?;
    }

    Ok(())
}
