//! Downloads produced by the export procedure
//!
//! A [`Download`] is an `href` (an image data URI) plus a file name, the same
//! pair a browser anchor with a `download` attribute carries. Sinks decide
//! what "clicking" that anchor means.

use crate::{Error, Result};
use base64::Engine as Base64Engine;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default prefix for exported file names
pub const FILENAME_PREFIX: &str = "instagram-img";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub href: String,
    pub filename: String,
}

/// `<prefix>-<epoch-ms>`
pub fn export_filename(prefix: &str, epoch_ms: i64) -> String {
    format!("{}-{}", prefix, epoch_ms)
}

/// Source of the timestamp used in file names
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock stuck at one instant, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Receives synthesized downloads.
pub trait DownloadSink: Send + Sync {
    fn deliver(&self, download: &Download) -> Result<()>;
}

/// Keeps every download in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    downloads: Mutex<Vec<Download>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downloads(&self) -> Vec<Download> {
        self.downloads.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&self, download: &Download) -> Result<()> {
        self.downloads
            .lock()
            .map_err(|e| Error::DownloadError(format!("sink poisoned: {}", e)))?
            .push(download.clone());
        Ok(())
    }
}

/// Writes downloads into a directory, like a browser's download folder.
///
/// The extension implied by the data URI's MIME type is appended to the file name.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: std::sync::Arc<Mutex<Vec<PathBuf>>>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), written: Default::default() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far
    pub fn written(&self) -> Vec<PathBuf> {
        self.written.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl DownloadSink for FileSink {
    fn deliver(&self, download: &Download) -> Result<()> {
        let (mime, bytes) = decode_data_url(&download.href)?;
        let mut name = download.filename.clone();
        if let Some(ext) = extension_for(&mime) {
            name.push('.');
            name.push_str(ext);
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)?;
        log::info!("wrote {} ({})", path.display(), mime);
        if let Ok(mut w) = self.written.lock() {
            w.push(path);
        }
        Ok(())
    }
}

fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Split a base64 `data:` URI into its MIME type and decoded bytes.
pub fn decode_data_url(href: &str) -> Result<(String, Vec<u8>)> {
    let rest = href
        .strip_prefix("data:")
        .ok_or_else(|| Error::DownloadError("not a data URI".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::DownloadError("data URI has no payload".into()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| Error::DownloadError("only base64 data URIs are supported".into()))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::DownloadError(format!("bad base64 payload: {}", e)))?;
    Ok((mime.to_string(), bytes))
}
