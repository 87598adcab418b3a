use hue_histogram::plot::render_histogram;
use hue_histogram::{
    HeadlessSurface, HueHistogram, HueHistogramVisualizer, SampleGrid, VisualizeError,
    VisualizerConfig,
};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const OUTPUT_NAME: &str = "00.origin.hue.hist.png";

fn output_in(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_NAME)
}

fn visualizer_for(path: PathBuf) -> HueHistogramVisualizer<HeadlessSurface> {
    HueHistogramVisualizer::headless(VisualizerConfig::default().with_output_path(path))
        .expect("default config is valid")
}

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

#[test]
fn red_4x4_fills_bin_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = output_in(dir.path());
    let mut viz = visualizer_for(out.clone());

    let hist = viz.visualize(&solid(4, 4, [255, 0, 0])).expect("visualize");

    assert_eq!(hist.bins(), 512);
    assert_eq!(hist.count(0), 16);
    assert_eq!(hist.total(), 16);
    assert!(hist.counts()[1..].iter().all(|&c| c == 0));

    let meta = std::fs::metadata(&out).expect("output written");
    assert!(meta.len() > 0);
    let decoded = image::open(&out).expect("output decodes");
    assert_eq!(decoded.width(), 800);
    assert_eq!(decoded.height(), 600);
}

#[test]
fn solid_color_has_single_dominant_bin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut viz = visualizer_for(output_in(dir.path()));

    // green: 1/3 turn, blue: 2/3 turn, magenta: 5/6 turn
    for (rgb, expected) in [([0, 255, 0], 170), ([0, 0, 255], 341), ([255, 0, 255], 426)] {
        let hist = viz.visualize(&solid(3, 5, rgb)).expect("visualize");
        assert_eq!(hist.dominant_bin(), Some(expected), "rgb {rgb:?}");
        assert_eq!(hist.count(expected), 15);
    }
}

#[test]
fn grey_image_counts_into_bin_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut viz = visualizer_for(output_in(dir.path()));

    let hist = viz.visualize(&solid(2, 2, [128, 128, 128])).expect("visualize");
    assert_eq!(hist.dominant_bin(), Some(0));
    assert_eq!(hist.count(0), 4);
}

#[test]
fn flat_samples_fail_before_any_side_effect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = output_in(dir.path());
    let mut viz = visualizer_for(out.clone());

    let flat = SampleGrid::from_f32([16], vec![0.25; 16]);
    let err = viz.visualize(&flat).unwrap_err();

    assert!(matches!(err, VisualizeError::InvalidInput(_)), "got {err:?}");
    assert!(!out.exists());
    assert_eq!(viz.surface().clears(), 0);
    assert_eq!(viz.surface().presented(), 0);
}

#[test]
fn greyscale_dynamic_image_is_invalid_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = output_in(dir.path());
    let mut viz = visualizer_for(out.clone());

    let err = viz.visualize(&DynamicImage::new_luma8(4, 4)).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(!out.exists());
}

#[test]
fn float_image_out_of_range_is_invalid_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = output_in(dir.path());
    let mut viz = visualizer_for(out.clone());

    let mut img = image::Rgb32FImage::new(2, 2);
    img.put_pixel(1, 1, Rgb([2.0, 0.0, 0.0]));
    let err = viz.visualize(&DynamicImage::ImageRgb32F(img)).unwrap_err();

    assert!(err.is_invalid_input());
    assert!(!out.exists());
}

#[test]
fn missing_directory_is_io_error_after_present() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("temp").join(OUTPUT_NAME);
    let mut viz = visualizer_for(out.clone());

    let err = viz.visualize(&solid(4, 4, [255, 0, 0])).unwrap_err();

    match err {
        VisualizeError::Io { path, source } => {
            assert_eq!(path, out);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {other:?}"),
    }
    assert_eq!(viz.surface().presented(), 1);
    let shown = viz.surface().last_presented().expect("raster was shown");
    assert_eq!(shown.get_pixel(0, 0).0, [255, 0, 0]);
    assert!(!out.exists());
}

#[test]
fn second_call_overwrites_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = output_in(dir.path());
    let mut viz = visualizer_for(out.clone());

    viz.visualize(&solid(4, 4, [255, 0, 0])).expect("first call");
    let first = image::open(&out).expect("first output").to_rgb8();

    let blue = viz.visualize(&solid(4, 4, [0, 0, 255])).expect("second call");
    let second = image::open(&out).expect("second output").to_rgb8();

    let config = VisualizerConfig::default();
    let expected = render_histogram(&blue, config.plot_width, config.plot_height).expect("render");
    assert_eq!(second, expected);
    assert_ne!(first, second);
    assert_eq!(viz.surface().presented(), 2);
}

#[test]
fn four_channel_input_fails_before_any_side_effect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = output_in(dir.path());
    let mut viz = visualizer_for(out.clone());

    let grid = SampleGrid::from_u8([2, 2, 4], [255, 0, 0, 0].repeat(4));
    assert!(viz.visualize(&grid).unwrap_err().is_invalid_input());

    let rgba = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
    assert!(viz.visualize(&rgba).unwrap_err().is_invalid_input());
    assert!(viz.visualize(&DynamicImage::ImageRgba8(rgba)).unwrap_err().is_invalid_input());

    assert!(!out.exists());
    assert_eq!(viz.surface().clears(), 0);
    assert_eq!(viz.surface().presented(), 0);
}

#[test]
fn histogram_matches_direct_binning() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut viz = visualizer_for(output_in(dir.path()));

    let grid = SampleGrid::from_f32(
        [1, 3, 3],
        vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
    );
    let hist = viz.visualize(&grid).expect("visualize");

    // red, green, yellow (1/6 turn)
    let expected =
        HueHistogram::from_values([0.0, 1.0 / 3.0, 1.0 / 6.0], 512, (0.0, 1.0)).expect("histogram");
    assert_eq!(hist.counts(), expected.counts());
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = VisualizerConfig {
        bins: 0,
        ..VisualizerConfig::default()
    };
    let err = HueHistogramVisualizer::headless(config).err().expect("zero bins rejected");
    assert!(err.is_invalid_input());
}
