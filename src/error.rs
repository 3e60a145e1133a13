//! Error types for the editor

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing, rendering or exporting
#[derive(Error, Debug)]
pub enum Error {
    /// Tab index outside the five known tabs
    #[error("Invalid tab index: {0} (expected 0..=4)")]
    InvalidTab(usize),

    /// A color string that is not `#rrggbb`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The rasterizer failed to snapshot the preview
    #[error("Rasterization failed: {0}")]
    RasterError(String),

    /// The download could not be delivered
    #[error("Download failed: {0}")]
    DownloadError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
