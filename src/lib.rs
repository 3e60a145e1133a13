//! textsnap
//!
//! A headless single-screen text card editor: type some text, pick a font
//! size and two colors, preview the result on a square surface and export
//! it as a PNG.
//!
//! # Features
//!
//! - **State machine**: five tabs, exactly one control panel visible at a time
//! - **Square preview**: a post-commit reconciler keeps the preview height
//!   equal to its floored width
//! - **Pluggable collaborators**: script detection, rasterization, downloads
//!   and clocks are traits with default implementations
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use textsnap::{Editor, EditorConfig};
//! use textsnap::export::MemorySink;
//!
//! # async fn run() -> textsnap::Result<()> {
//! let sink = Arc::new(MemorySink::new());
//! let mut editor = Editor::builder(EditorConfig::default())
//!     .sink(sink.clone())
//!     .build()?;
//! editor.set_text("こんにちは");
//! editor.select_tab(1)?;
//! editor.input_size(120);
//! let download = editor.save().await?;
//! assert!(download.filename.starts_with("instagram-img-"));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod color;
pub mod editor;
pub mod export;
pub mod rendering;
pub mod script;
pub mod state;
pub mod widgets;

pub use color::HexColor;
pub use editor::{Commit, CommitHook, Editor, EditorBuilder};
pub use state::{EditorState, Tab};

/// Viewport dimensions in CSS pixels. Fractional widths are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Configuration for an [`Editor`]
///
/// # Examples
///
/// ```
/// let cfg = textsnap::EditorConfig::default();
/// assert_eq!(cfg.max_preview_width, 640.0);
/// assert_eq!(cfg.initial.font_size_px, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Viewport the editor is laid out in
    pub viewport: Viewport,
    /// The preview never grows wider than this
    pub max_preview_width: f64,
    /// State at mount
    pub initial: EditorState,
    /// Prefix of exported file names
    pub filename_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            max_preview_width: 640.0,
            initial: EditorState::default(),
            filename_prefix: export::FILENAME_PREFIX.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_preview_width.is_finite() && self.max_preview_width > 0.0) {
            return Err(Error::ConfigError(format!(
                "max_preview_width must be positive, got {}",
                self.max_preview_width
            )));
        }
        let limit = f64::from(rendering::raster::MAX_SURFACE_PX);
        if self.max_preview_width > limit {
            return Err(Error::ConfigError(format!(
                "max_preview_width {} exceeds {}",
                self.max_preview_width, limit
            )));
        }
        if !(self.viewport.width.is_finite() && (0.0..=limit).contains(&self.viewport.width)) {
            return Err(Error::ConfigError(format!("bad viewport width {}", self.viewport.width)));
        }
        let size = self.initial.font_size_px;
        if !(widgets::SizeSlider::MIN..=widgets::SizeSlider::MAX).contains(&size) {
            return Err(Error::ConfigError(format!("initial font size {} outside 12..=500", size)));
        }
        if self.filename_prefix.is_empty() || self.filename_prefix.contains(['/', '\\']) {
            return Err(Error::ConfigError(format!("bad filename prefix {:?}", self.filename_prefix)));
        }
        Ok(())
    }
}
