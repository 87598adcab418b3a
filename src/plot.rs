use image::{ImageError, ImageFormat, RgbImage};
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::VisualizeError;
use crate::histogram::HueHistogram;
use crate::hue::hue_to_rgb8;

const MARGIN_LEFT: i32 = 40;
const MARGIN_RIGHT: i32 = 20;
const MARGIN_TOP: i32 = 20;
const MARGIN_BOTTOM: i32 = 40;
const TICK_LEN: i32 = 6;
const X_TICKS: usize = 4;
const Y_GRID_LINES: i32 = 4;
const FRAME_COLOR: RGBColor = RGBColor(40, 40, 40);
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);

const PLOT_TARGET: &str = "histogram plot";

/// Renders `hist` as a bar chart into an in-memory RGB image.
///
/// Bars are scaled to the tallest bin and tinted with the hue they cover.
/// Text is never drawn.
pub fn render_histogram(
    hist: &HueHistogram,
    width: u32,
    height: u32,
) -> Result<RgbImage, VisualizeError> {
    let plot_w = width as i32 - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height as i32 - MARGIN_TOP - MARGIN_BOTTOM;
    if plot_w <= 0 || plot_h <= 0 {
        return Err(VisualizeError::invalid(format!(
            "plot size {width}x{height} leaves no room for the chart"
        )));
    }

    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| VisualizeError::invalid("width*height overflow"))?;
    let mut rgb = vec![255u8; pixel_count * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        let draw_err = |e| VisualizeError::io_other(PLOT_TARGET, e);
        root.fill(&WHITE).map_err(draw_err)?;

        let (x0, y0) = (MARGIN_LEFT, MARGIN_TOP);
        let (x1, y1) = (MARGIN_LEFT + plot_w, MARGIN_TOP + plot_h);

        for i in 1..Y_GRID_LINES {
            let y = y1 - plot_h * i / Y_GRID_LINES;
            root.draw(&PathElement::new([(x0, y), (x1, y)], GRID_COLOR))
                .map_err(draw_err)?;
        }

        let bins = hist.bins() as i64;
        let max = hist.max_count();
        if max > 0 {
            for (bin, &count) in hist.counts().iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let xa = x0 + (plot_w as i64 * bin as i64 / bins) as i32;
                let xb = x0 + (plot_w as i64 * (bin as i64 + 1) / bins) as i32;
                let bar_h = ((count as f64 / max as f64) * plot_h as f64).round().max(1.0) as i32;
                let [r, g, b] = hue_to_rgb8(hist.bin_center(bin));
                root.draw(&Rectangle::new(
                    [(xa, y1 - bar_h), (xb.max(xa + 1), y1)],
                    RGBColor(r, g, b).filled(),
                ))
                .map_err(draw_err)?;
            }
        }

        root.draw(&Rectangle::new([(x0, y0), (x1, y1)], FRAME_COLOR))
            .map_err(draw_err)?;
        for i in 0..=X_TICKS {
            let x = x0 + plot_w * i as i32 / X_TICKS as i32;
            root.draw(&PathElement::new([(x, y1), (x, y1 + TICK_LEN)], FRAME_COLOR))
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| VisualizeError::io_other(PLOT_TARGET, "plot buffer size mismatch"))
}

/// Writes `img` as a PNG at `path`, replacing any existing file.
///
/// The parent directory is not created. Returns the number of bytes written.
pub fn write_png(img: &RgbImage, path: &Path) -> Result<u64, VisualizeError> {
    let file = File::create(path).map_err(|e| VisualizeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    img.write_to(&mut writer, ImageFormat::Png).map_err(|e| match e {
        ImageError::IoError(source) => VisualizeError::io(path, source),
        other => VisualizeError::io_other(path, other),
    })?;
    writer.flush().map_err(|e| VisualizeError::io(path, e))?;

    let written = writer
        .get_ref()
        .metadata()
        .map(|m| m.len())
        .map_err(|e| VisualizeError::io(path, e))?;
    Ok(written)
}
