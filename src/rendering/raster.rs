//! Rasterization of the preview surface into PNG snapshots

use crate::rendering::paint::{paint_preview, PaintCommand};
use crate::rendering::{PreviewNode, Screenshot};
use crate::{Error, Result};
use base64::Engine as Base64Engine;
use futures::future::{BoxFuture, FutureExt};

/// Largest preview side, in pixels, that will be rasterized
pub const MAX_SURFACE_PX: u32 = 16384;

/// Everything a rasterizer sees: the preview contents and its pinned size.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSnapshot {
    pub node: PreviewNode,
    pub width: u32,
    pub height: u32,
}

/// Converts a live preview into a static image.
pub trait Rasterizer: Send + Sync {
    fn rasterize<'a>(&'a self, snapshot: &'a PreviewSnapshot) -> BoxFuture<'a, Result<Screenshot>>;
}

/// Built-in rasterizer: paints into an RGBA buffer and encodes PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixmapRasterizer;

impl Rasterizer for PixmapRasterizer {
    fn rasterize<'a>(&'a self, snapshot: &'a PreviewSnapshot) -> BoxFuture<'a, Result<Screenshot>> {
        futures::future::ready(rasterize_preview(snapshot)).boxed()
    }
}

/// Straight RGBA8 pixel buffer.
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Pixmap {
    /// Allocate a transparent pixmap; fails if the buffer size overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| Error::RasterError(format!("pixmap {}x{} is too large", width, height)))?;
        Ok(Self { width, height, data: vec![0; len] })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some((self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]))
    }

    /// Fill a rectangle, clipped to the pixmap bounds
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: (u8, u8, u8, u8)) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                let i = (row + px as usize) * 4;
                self.data[i..i + 4].copy_from_slice(&[rgba.0, rgba.1, rgba.2, rgba.3]);
            }
        }
    }

    pub fn execute(&mut self, cmds: &[PaintCommand]) {
        for cmd in cmds {
            match *cmd {
                PaintCommand::SolidRect { x, y, width, height, rgba }
                | PaintCommand::Glyph { x, y, width, height, rgba, .. } => {
                    self.fill_rect(x, y, width, height, rgba)
                }
            }
        }
    }

    #[cfg(feature = "raster")]
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| Error::RasterError(format!("PNG header: {}", e)))?;
            writer
                .write_image_data(&self.data)
                .map_err(|e| Error::RasterError(format!("PNG data: {}", e)))?;
            writer
                .finish()
                .map_err(|e| Error::RasterError(format!("PNG finish: {}", e)))?;
        }
        Ok(out)
    }

    #[cfg(not(feature = "raster"))]
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        Err(Error::RasterError("PNG encoding requires the `raster` feature".into()))
    }
}

/// Paint and encode a snapshot synchronously.
pub fn rasterize_preview(snapshot: &PreviewSnapshot) -> Result<Screenshot> {
    if snapshot.width == 0 || snapshot.height == 0 {
        return Err(Error::RasterError(format!(
            "preview surface has no area ({}x{})",
            snapshot.width, snapshot.height
        )));
    }
    if snapshot.width > MAX_SURFACE_PX || snapshot.height > MAX_SURFACE_PX {
        return Err(Error::RasterError(format!(
            "preview surface {}x{} exceeds {}px",
            snapshot.width, snapshot.height, MAX_SURFACE_PX
        )));
    }
    let mut pixmap = Pixmap::new(snapshot.width, snapshot.height)?;
    pixmap.execute(&paint_preview(&snapshot.node, snapshot.width, snapshot.height));
    let png_data = pixmap.encode_png()?;
    Ok(Screenshot { width: snapshot.width, height: snapshot.height, png_data })
}

impl Screenshot {
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }

    /// `data:image/png;base64,...`
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }
}
