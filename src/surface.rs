//! Display surfaces that show the input raster to a human.

use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::VisualizeError;
use crate::raster::RgbRaster;

const IMAGE_ENTITY: &str = "image";
const RECORDING_FILE: &str = "frame.rrd";

/// Something a raster can be drawn on and shown from.
///
/// A surface is owned by exactly one visualizer; every method takes `&mut self`.
pub trait DisplaySurface {
    /// Drops whatever was rendered before.
    fn clear(&mut self) -> Result<(), VisualizeError>;

    /// Draws `raster` as the current frame. Nothing is shown until [`present`](Self::present).
    fn render_raster(&mut self, raster: &RgbRaster) -> Result<(), VisualizeError>;

    /// Shows the current frame. Interactive surfaces block until the viewer is dismissed.
    fn present(&mut self) -> Result<(), VisualizeError>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn clear(&mut self) -> Result<(), VisualizeError> {
        (**self).clear()
    }

    fn render_raster(&mut self, raster: &RgbRaster) -> Result<(), VisualizeError> {
        (**self).render_raster(raster)
    }

    fn present(&mut self) -> Result<(), VisualizeError> {
        (**self).present()
    }
}

/// A surface with no viewer attached. Presenting only records the frame.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    frame: Option<RgbImage>,
    last_presented: Option<RgbImage>,
    presented: usize,
    clears: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many frames have been presented.
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// The frame shown by the last `present` call.
    pub fn last_presented(&self) -> Option<&RgbImage> {
        self.last_presented.as_ref()
    }
}

impl DisplaySurface for HeadlessSurface {
    fn clear(&mut self) -> Result<(), VisualizeError> {
        self.frame = None;
        self.clears += 1;
        Ok(())
    }

    fn render_raster(&mut self, raster: &RgbRaster) -> Result<(), VisualizeError> {
        self.frame = Some(raster.to_rgb8());
        Ok(())
    }

    fn present(&mut self) -> Result<(), VisualizeError> {
        self.presented += 1;
        self.last_presented = self.frame.clone();
        Ok(())
    }
}

/// Shows frames in a rerun viewer and waits for it to be closed.
///
/// Each `present` records the frame to a temporary `.rrd` file, launches the
/// viewer executable on it, and blocks until that process exits. There is no
/// timeout.
pub struct RerunSurface {
    app_id: String,
    viewer: PathBuf,
    frame: Option<RgbImage>,
}

impl RerunSurface {
    pub fn new(app_id: impl Into<String>, viewer: impl Into<PathBuf>) -> Self {
        Self {
            app_id: app_id.into(),
            viewer: viewer.into(),
            frame: None,
        }
    }

    fn record(&self, frame: &RgbImage, rrd: &Path) -> Result<(), VisualizeError> {
        let rec = rerun::RecordingStreamBuilder::new(self.app_id.as_str())
            .save(rrd)
            .map_err(|e| VisualizeError::io_other(rrd, e))?;
        rec.log(
            IMAGE_ENTITY,
            &rerun::Image::from_elements(
                frame.as_raw().as_slice(),
                [frame.width(), frame.height()],
                rerun::ColorModel::RGB,
            ),
        )
        .map_err(|e| VisualizeError::io_other(rrd, e))?;
        // Dropping the last handle flushes the file sink.
        drop(rec);
        Ok(())
    }
}

impl DisplaySurface for RerunSurface {
    fn clear(&mut self) -> Result<(), VisualizeError> {
        self.frame = None;
        Ok(())
    }

    fn render_raster(&mut self, raster: &RgbRaster) -> Result<(), VisualizeError> {
        self.frame = Some(raster.to_rgb8());
        Ok(())
    }

    fn present(&mut self) -> Result<(), VisualizeError> {
        let Some(frame) = &self.frame else {
            return Ok(());
        };

        let dir = tempfile::Builder::new()
            .prefix("hue-hist-")
            .tempdir()
            .map_err(|e| VisualizeError::io(std::env::temp_dir(), e))?;
        let rrd = dir.path().join(RECORDING_FILE);
        self.record(frame, &rrd)?;

        debug!(
            viewer = %self.viewer.display(),
            rrd = %rrd.display(),
            "waiting for viewer to close"
        );
        let status = Command::new(&self.viewer)
            .arg(&rrd)
            .status()
            .map_err(|e| VisualizeError::io(&self.viewer, e))?;
        if !status.success() {
            return Err(VisualizeError::io_other(
                &self.viewer,
                format!("viewer exited with {status}"),
            ));
        }
        debug!("viewer closed");
        Ok(())
    }
}
