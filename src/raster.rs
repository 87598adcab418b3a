//! Input rasters and the validation that turns them into normalized RGB.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::VisualizeError;

/// Typed sample storage for a [`SampleGrid`].
#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
    /// 8-bit samples, 0..=255.
    U8(Vec<u8>),
    /// Normalized samples, expected in [0, 1].
    F32(Vec<f32>),
}

impl SampleData {
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A row-major grid of samples with an explicit shape.
///
/// A color image has shape `[height, width, channels]`. Any other rank is
/// accepted here and rejected when converted to an [`RgbRaster`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    pub shape: Vec<usize>,
    pub data: SampleData,
}

impl SampleGrid {
    pub fn new(shape: impl Into<Vec<usize>>, data: SampleData) -> Self {
        Self {
            shape: shape.into(),
            data,
        }
    }

    pub fn from_u8(shape: impl Into<Vec<usize>>, samples: Vec<u8>) -> Self {
        Self::new(shape, SampleData::U8(samples))
    }

    pub fn from_f32(shape: impl Into<Vec<usize>>, samples: Vec<f32>) -> Self {
        Self::new(shape, SampleData::F32(samples))
    }
}

/// A validated RGB raster with every channel normalized to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RgbRaster {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl RgbRaster {
    /// Builds a raster from row-major pixels, checking dimensions and range.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> Result<Self, VisualizeError> {
        if width == 0 || height == 0 {
            return Err(VisualizeError::invalid(format!(
                "empty raster ({width}x{height})"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| VisualizeError::invalid("width*height overflow"))?;
        if pixels.len() != expected {
            return Err(VisualizeError::invalid(format!(
                "expected {expected} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        if let Some(bad) = pixels
            .iter()
            .flatten()
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(VisualizeError::invalid(format!(
                "RGB samples must be in [0, 1], found {bad}"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[[f32; 3]] {
        &self.pixels
    }

    /// Quantizes back to 8-bit for display.
    pub fn to_rgb8(&self) -> RgbImage {
        let raw: Vec<u8> = self
            .pixels
            .iter()
            .flatten()
            .map(|v| (v * 255.0).round() as u8)
            .collect();
        // Dimensions were checked in `new`, so the buffer length always matches.
        RgbImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}

/// Anything that can be read as an RGB raster.
///
/// `to_raster` is the only validation gate: it runs before the visualizer
/// touches its surface or the filesystem.
pub trait RasterSource {
    fn to_raster(&self) -> Result<RgbRaster, VisualizeError>;
}

impl RasterSource for RgbRaster {
    fn to_raster(&self) -> Result<RgbRaster, VisualizeError> {
        Ok(self.clone())
    }
}

impl RasterSource for SampleGrid {
    fn to_raster(&self) -> Result<RgbRaster, VisualizeError> {
        let [height, width, channels] = self.shape[..] else {
            return Err(VisualizeError::invalid(format!(
                "expected shape [height, width, channels], got {:?}",
                self.shape
            )));
        };
        if channels != 3 {
            return Err(VisualizeError::invalid(format!(
                "expected 3 channels, got {channels}"
            )));
        }
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| VisualizeError::invalid("shape overflow"))?;
        if self.data.len() != expected {
            return Err(VisualizeError::invalid(format!(
                "shape {:?} needs {expected} samples, got {}",
                self.shape,
                self.data.len()
            )));
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(VisualizeError::invalid("raster dimensions exceed u32"));
        };

        let pixels: Vec<[f32; 3]> = match &self.data {
            SampleData::U8(samples) => samples
                .chunks_exact(3)
                .map(|px| {
                    [
                        px[0] as f32 / 255.0,
                        px[1] as f32 / 255.0,
                        px[2] as f32 / 255.0,
                    ]
                })
                .collect(),
            SampleData::F32(samples) => samples
                .chunks_exact(3)
                .map(|px| [px[0], px[1], px[2]])
                .collect(),
        };

        RgbRaster::new(w, h, pixels)
    }
}

impl RasterSource for RgbImage {
    fn to_raster(&self) -> Result<RgbRaster, VisualizeError> {
        let (w, h) = self.dimensions();
        SampleGrid::from_u8([h as usize, w as usize, 3], self.as_raw().clone()).to_raster()
    }
}

impl RasterSource for RgbaImage {
    fn to_raster(&self) -> Result<RgbRaster, VisualizeError> {
        let (w, h) = self.dimensions();
        SampleGrid::from_u8([h as usize, w as usize, 4], self.as_raw().clone()).to_raster()
    }
}

impl RasterSource for DynamicImage {
    fn to_raster(&self) -> Result<RgbRaster, VisualizeError> {
        let color = self.color();
        if color.channel_count() != 3 {
            return Err(VisualizeError::invalid(format!(
                "expected an RGB image, got {color:?} with {} channel(s)",
                color.channel_count()
            )));
        }
        match self {
            DynamicImage::ImageRgb8(img) => img.to_raster(),
            // 16-bit and float RGB: normalize through f32, float ones are then range-checked.
            other => {
                let rgb = other.to_rgb32f();
                let (w, h) = rgb.dimensions();
                SampleGrid::from_f32([h as usize, w as usize, 3], rgb.into_raw()).to_raster()
            }
        }
    }
}
