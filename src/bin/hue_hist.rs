use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{Level, info};

use hue_histogram::{
    DisplaySurface, HeadlessSurface, HueHistogramVisualizer, RerunSurface, VisualizerConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "hue_hist",
    about = "Show an image and write the histogram of its hue channel",
    version
)]
struct Cli {
    /// Input image (png, jpg, bmp, ...)
    image: PathBuf,

    /// Output PNG path; its directory must already exist
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// JSON file with visualizer settings
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Skip the viewer and only write the histogram
    #[arg(long = "headless")]
    headless: bool,

    /// Log every step
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = match &cli.config {
        Some(path) => VisualizerConfig::from_json_file(path)?,
        None => VisualizerConfig::default(),
    };
    if let Some(output) = cli.output {
        config = config.with_output_path(output);
    }

    let img = image::open(&cli.image)
        .map_err(|e| format!("Failed to open {}: {e}", cli.image.display()))?;

    let surface: Box<dyn DisplaySurface> = if cli.headless {
        Box::new(HeadlessSurface::new())
    } else {
        Box::new(RerunSurface::new(
            config.viewer_app_id.clone(),
            config.viewer_executable.clone(),
        ))
    };

    let mut visualizer = HueHistogramVisualizer::new(surface, config)?;
    let hist = visualizer.visualize(&img)?;

    match hist.dominant_bin() {
        Some(bin) => info!(
            bin,
            hue = hist.bin_center(bin),
            count = hist.count(bin),
            "dominant hue"
        ),
        None => info!("no hue values counted"),
    }

    Ok(())
}
