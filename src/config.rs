use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VisualizeError;

pub const DEFAULT_OUTPUT_PATH: &str = "temp/00.origin.hue.hist.png";
pub const DEFAULT_BINS: usize = 512;
pub const DEFAULT_RANGE: (f32, f32) = (0.0, 1.0);
const DEFAULT_PLOT_WIDTH: u32 = 800;
const DEFAULT_PLOT_HEIGHT: u32 = 600;
const DEFAULT_VIEWER_APP_ID: &str = "Hue Histogram";
const DEFAULT_VIEWER_EXECUTABLE: &str = "rerun";

/// Configuration for [`HueHistogramVisualizer`](crate::HueHistogramVisualizer).
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Where the histogram PNG is written. The parent directory must exist.
    pub output_path: PathBuf,
    pub bins: usize,
    pub range: (f32, f32),
    pub plot_width: u32,
    pub plot_height: u32,
    /// Application id shown by the rerun viewer.
    pub viewer_app_id: String,
    /// Viewer program, run with the recorded `.rrd` file as its only argument.
    pub viewer_executable: PathBuf,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            bins: DEFAULT_BINS,
            range: DEFAULT_RANGE,
            plot_width: DEFAULT_PLOT_WIDTH,
            plot_height: DEFAULT_PLOT_HEIGHT,
            viewer_app_id: DEFAULT_VIEWER_APP_ID.to_string(),
            viewer_executable: PathBuf::from(DEFAULT_VIEWER_EXECUTABLE),
        }
    }
}

impl VisualizerConfig {
    /// Reads a JSON config file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VisualizeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| VisualizeError::io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, VisualizeError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| VisualizeError::invalid(format!("bad config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Checks the histogram and plot settings.
    pub fn validate(&self) -> Result<(), VisualizeError> {
        if self.bins == 0 {
            return Err(VisualizeError::invalid("bins must be at least 1"));
        }
        let (lo, hi) = self.range;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(VisualizeError::invalid(format!(
                "histogram range must be finite with lo < hi, got ({lo}, {hi})"
            )));
        }
        if self.plot_width == 0 || self.plot_height == 0 {
            return Err(VisualizeError::invalid("plot dimensions must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_output() {
        let config = VisualizerConfig::default();
        assert_eq!(config.output_path, PathBuf::from("temp/00.origin.hue.hist.png"));
        assert_eq!(config.bins, 512);
        assert_eq!(config.range, (0.0, 1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = VisualizerConfig::from_json_str(r#"{ "bins": 64 }"#).expect("parse");
        assert_eq!(config.bins, 64);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = VisualizerConfig::from_json_str(r#"{ "range": [1.0, 0.0] }"#).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
