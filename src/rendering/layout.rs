//! Preview surface geometry and the square-keeping reconciler

use crate::Viewport;

/// Explicit pixel dimensions set on the preview surface.
/// `None` means the dimension is left to layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewSurface {
    pub style: InlineStyle,
}

/// Answers layout queries about the preview surface.
pub trait LayoutHost {
    /// Rendered width of the preview surface, possibly fractional.
    fn computed_width(&self, style: &InlineStyle) -> f64;
}

/// Block layout: the preview fills the viewport width up to a maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    pub viewport: Viewport,
    pub max_preview_width: f64,
}

impl ViewportLayout {
    pub fn new(viewport: Viewport, max_preview_width: f64) -> Self {
        Self { viewport, max_preview_width }
    }
}

impl LayoutHost for ViewportLayout {
    fn computed_width(&self, style: &InlineStyle) -> f64 {
        let fluid = self.viewport.width.min(self.max_preview_width).max(0.0);
        match style.width {
            Some(w) => f64::from(w).min(self.max_preview_width),
            None => fluid,
        }
    }
}

fn floored(width: f64) -> u32 {
    if width.is_finite() && width > 0.0 {
        width.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Force the surface height to the floored computed width.
/// Returns the resulting height; calling it again with the same layout is a no-op.
pub fn reconcile_square(surface: &mut PreviewSurface, layout: &dyn LayoutHost) -> u32 {
    let side = floored(layout.computed_width(&surface.style));
    surface.style.height = Some(side);
    side
}

/// Pin both dimensions to the same integer value ahead of a snapshot.
pub fn pin_export_geometry(surface: &mut PreviewSurface, layout: &dyn LayoutHost) -> u32 {
    let side = reconcile_square(surface, layout);
    surface.style.width = Some(floored(layout.computed_width(&surface.style)));
    side
}

/// Return the width to layout control after an export.
pub fn release_width(surface: &mut PreviewSurface) {
    surface.style.width = None;
}
