use bytesize::ByteSize;
use tracing::{debug, info, warn};

use crate::config::VisualizerConfig;
use crate::error::VisualizeError;
use crate::histogram::HueHistogram;
use crate::hue::hue_channel;
use crate::plot::{render_histogram, write_png};
use crate::raster::RasterSource;
use crate::surface::{DisplaySurface, HeadlessSurface, RerunSurface};

/// Shows an image and writes the histogram of its hue channel to disk.
///
/// The visualizer owns its display surface, and [`visualize`](Self::visualize)
/// takes `&mut self`, so calls on one visualizer never overlap.
pub struct HueHistogramVisualizer<S: DisplaySurface> {
    surface: S,
    config: VisualizerConfig,
}

impl HueHistogramVisualizer<HeadlessSurface> {
    pub fn headless(config: VisualizerConfig) -> Result<Self, VisualizeError> {
        Self::new(HeadlessSurface::new(), config)
    }
}

impl HueHistogramVisualizer<RerunSurface> {
    /// A visualizer that shows images in a rerun viewer and waits for it to close.
    pub fn with_viewer(config: VisualizerConfig) -> Result<Self, VisualizeError> {
        let surface = RerunSurface::new(
            config.viewer_app_id.clone(),
            config.viewer_executable.clone(),
        );
        Self::new(surface, config)
    }
}

impl<S: DisplaySurface> HueHistogramVisualizer<S> {
    pub fn new(surface: S, config: VisualizerConfig) -> Result<Self, VisualizeError> {
        config.validate()?;
        Ok(Self { surface, config })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Shows `image`, then bins its hue channel and writes the histogram plot.
    ///
    /// Steps run in this order: validate, clear, render, present, convert to
    /// HSV, bin, write. An invalid image fails before the surface is touched.
    /// A write failure is reported after the image was already presented.
    /// The returned histogram is the one that was plotted.
    pub fn visualize<I>(&mut self, image: &I) -> Result<HueHistogram, VisualizeError>
    where
        I: RasterSource + ?Sized,
    {
        let raster = image.to_raster()?;
        let (width, height) = raster.dimensions();
        debug!(width, height, "raster accepted");

        self.surface.clear()?;
        self.surface.render_raster(&raster)?;
        self.surface.present()?;
        debug!("raster presented");

        let hues = hue_channel(&raster);
        let hist = HueHistogram::from_values(hues, self.config.bins, self.config.range)?;
        if hist.dropped() > 0 {
            warn!(dropped = hist.dropped(), "hue values outside histogram range");
        }
        debug!(
            bins = hist.bins(),
            total = hist.total(),
            dominant = ?hist.dominant_bin(),
            "hue histogram computed"
        );

        let plot = render_histogram(&hist, self.config.plot_width, self.config.plot_height)?;
        let path = &self.config.output_path;
        let written = write_png(&plot, path)?;
        info!(path = %path.display(), size = %ByteSize::b(written), "hue histogram written");

        Ok(hist)
    }
}
