//! Hue histogram diagnostics for captcha images.
//!
//! Shows an image on a [`surface::DisplaySurface`], bins the hue channel of
//! every pixel and writes the histogram plot as a PNG.

pub mod config;
pub mod error;
pub mod histogram;
pub mod hue;
pub mod plot;
pub mod raster;
pub mod surface;
pub mod visualizer;

pub use config::VisualizerConfig;
pub use error::VisualizeError;
pub use histogram::HueHistogram;
pub use raster::{RasterSource, RgbRaster, SampleData, SampleGrid};
pub use surface::{DisplaySurface, HeadlessSurface, RerunSurface};
pub use visualizer::HueHistogramVisualizer;
