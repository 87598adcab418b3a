use std::path::{Path, PathBuf};

/// Errors that can occur while producing a hue histogram diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum VisualizeError {
    /// The input cannot be read as an RGB raster, or the histogram settings are unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VisualizeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wraps a non-`io::Error` failure (plotting, viewer) as an I/O-class error.
    pub(crate) fn io_other(path: impl AsRef<Path>, err: impl ToString) -> Self {
        Self::io(path, std::io::Error::other(err.to_string()))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
