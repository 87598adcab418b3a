use palette::{FromColor, Hsv, Srgb};

use crate::raster::RgbRaster;

/// Hue of one normalized RGB pixel, in [0, 1). Achromatic pixels map to 0.
pub fn hue_of(rgb: [f32; 3]) -> f32 {
    let hsv: Hsv = Hsv::from_color(Srgb::new(rgb[0], rgb[1], rgb[2]));
    if hsv.saturation <= 0.0 {
        return 0.0;
    }
    let turns = hsv.hue.into_positive_degrees() / 360.0;
    // 359.99999 degrees can round up to a full turn in f32.
    if turns >= 1.0 { 0.0 } else { turns }
}

/// Hue channel of `raster`, flattened in row-major order, one value per pixel.
pub fn hue_channel(raster: &RgbRaster) -> Vec<f32> {
    raster.pixels().iter().copied().map(hue_of).collect()
}

/// The fully saturated, full value RGB color for a hue in [0, 1].
pub fn hue_to_rgb8(hue: f32) -> [u8; 3] {
    let hsv: Hsv = Hsv::new(hue * 360.0, 1.0, 1.0);
    let rgb: Srgb = Srgb::from_color(hsv);
    [
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}
