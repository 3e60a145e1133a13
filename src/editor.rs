//! The editor controller: state holder, tab controller and export procedure
//!
//! Every state mutation is committed: the state is re-rendered, then the
//! post-commit hooks run in registration order. The square-keeping
//! reconciler is always the first hook.

use crate::color::HexColor;
use crate::export::{export_filename, Clock, Download, DownloadSink, MemorySink, SystemClock};
use crate::rendering::layout::{
    pin_export_geometry, reconcile_square, release_width, LayoutHost, PreviewSurface, ViewportLayout,
};
use crate::rendering::raster::{PixmapRasterizer, PreviewSnapshot, Rasterizer};
use crate::rendering::{render, HostElement, RenderTree};
use crate::script::{JapaneseDetector, ScriptDetector};
use crate::state::{EditorState, Tab};
use crate::widgets::{ColorPicker, SizeSlider, TextArea};
use crate::{EditorConfig, Result, Viewport};
use log::{debug, info};
use std::sync::Arc;

/// What a post-commit hook gets to see and touch.
pub struct Commit<'a> {
    pub state: &'a EditorState,
    pub tree: &'a RenderTree,
    pub surface: &'a mut PreviewSurface,
    pub layout: &'a dyn LayoutHost,
}

/// Runs after every state commit, once layout is available.
pub type CommitHook = Box<dyn FnMut(&mut Commit<'_>) + Send>;

fn resize_reconciler() -> CommitHook {
    Box::new(|commit: &mut Commit<'_>| {
        reconcile_square(commit.surface, commit.layout);
    })
}

/// Builder for [`Editor`]; anything not set falls back to the built-in collaborator.
pub struct EditorBuilder {
    config: EditorConfig,
    detector: Option<Box<dyn ScriptDetector>>,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    sink: Option<Arc<dyn DownloadSink>>,
    clock: Option<Arc<dyn Clock>>,
    hooks: Vec<CommitHook>,
}

impl EditorBuilder {
    pub fn detector(mut self, detector: impl ScriptDetector + 'static) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    pub fn rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn DownloadSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Extra post-commit hook, run after the reconciler
    pub fn hook(mut self, hook: CommitHook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Validate the config and mount the editor (first render + commit hooks).
    pub fn build(self) -> Result<Editor> {
        self.config.validate()?;
        let state = self.config.initial.clone();
        let layout = ViewportLayout::new(self.config.viewport, self.config.max_preview_width);
        let mut hooks = vec![resize_reconciler()];
        hooks.extend(self.hooks);

        let detector = self.detector.unwrap_or_else(|| Box::new(JapaneseDetector));
        let mut host = HostElement::default();
        let tree = render(&state, detector.as_ref(), &mut host);

        let mut editor = Editor {
            slider: SizeSlider::new(state.font_size_px),
            text_area: TextArea::new(state.text.clone()),
            back_picker: ColorPicker::new(state.background_color),
            front_picker: ColorPicker::new(state.foreground_color),
            host,
            surface: PreviewSurface::default(),
            tree,
            layout,
            hooks,
            detector,
            rasterizer: self.rasterizer.unwrap_or_else(|| Arc::new(PixmapRasterizer)),
            sink: self.sink.unwrap_or_else(|| Arc::new(MemorySink::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            state,
            config: self.config,
        };
        editor.run_hooks();
        if editor.state.active_tab == Tab::Size {
            editor.relayout_slider();
        }
        info!(
            "editor mounted: viewport {}x{}, preview {}px",
            editor.layout.viewport.width,
            editor.layout.viewport.height,
            editor.surface.style.height.unwrap_or(0)
        );
        Ok(editor)
    }
}

pub struct Editor {
    config: EditorConfig,
    state: EditorState,
    host: HostElement,
    surface: PreviewSurface,
    layout: ViewportLayout,
    tree: RenderTree,

    slider: SizeSlider,
    text_area: TextArea,
    back_picker: ColorPicker,
    front_picker: ColorPicker,

    hooks: Vec<CommitHook>,
    detector: Box<dyn ScriptDetector>,
    rasterizer: Arc<dyn Rasterizer>,
    sink: Arc<dyn DownloadSink>,
    clock: Arc<dyn Clock>,
}

impl Editor {
    pub fn builder(config: EditorConfig) -> EditorBuilder {
        EditorBuilder {
            config,
            detector: None,
            rasterizer: None,
            sink: None,
            clock: None,
            hooks: Vec::new(),
        }
    }

    /// Mount an editor with the built-in collaborators.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Render output of the last commit
    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn host(&self) -> &HostElement {
        &self.host
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    pub fn slider(&self) -> &SizeSlider {
        &self.slider
    }

    pub fn text_area(&self) -> &TextArea {
        &self.text_area
    }

    pub fn add_commit_hook(&mut self, hook: CommitHook) {
        self.hooks.push(hook);
    }

    fn commit(&mut self) {
        self.tree = render(&self.state, self.detector.as_ref(), &mut self.host);
        self.run_hooks();
        debug!(
            "commit: tab={} size={} lang={:?} height={:?}",
            self.state.active_tab.name(),
            self.state.font_size_px,
            self.tree.lang,
            self.surface.style.height
        );
    }

    fn run_hooks(&mut self) {
        let mut hooks = std::mem::take(&mut self.hooks);
        let mut commit = Commit {
            state: &self.state,
            tree: &self.tree,
            surface: &mut self.surface,
            layout: &self.layout,
        };
        for hook in hooks.iter_mut() {
            hook(&mut commit);
        }
        self.hooks = hooks;
    }

    fn relayout_slider(&mut self) {
        // Controls span the full viewport width
        self.slider.layout(self.layout.viewport.width);
    }

    /// Activate the tab at `index` (0..=4).
    pub fn select_tab(&mut self, index: usize) -> Result<Tab> {
        let tab = Tab::from_index(index)?;
        debug!("select tab {} -> {}", self.state.active_tab.name(), tab.name());
        self.state.active_tab = tab;
        self.commit();
        // The slider was created hidden; lay it out now that its panel is visible
        if tab == Tab::Size {
            self.relayout_slider();
        }
        Ok(tab)
    }

    /// Keystroke into the text area, not yet committed.
    pub fn type_text(&mut self, text: &str) {
        self.text_area.input(text);
    }

    /// Key-up in the text area commits its value.
    pub fn key_up(&mut self) {
        self.state.text = self.text_area.key_up();
        self.commit();
    }

    pub fn set_text(&mut self, text: &str) {
        self.type_text(text);
        self.key_up();
    }

    /// Slider input; returns the clamped size that was committed.
    pub fn input_size(&mut self, raw: i64) -> u32 {
        let size = self.slider.input(raw);
        self.state.font_size_px = size;
        self.commit();
        size
    }

    pub fn pick_background(&mut self, color: &str) -> Result<HexColor> {
        let color = self.back_picker.pick(color)?;
        self.state.background_color = color;
        self.commit();
        Ok(color)
    }

    pub fn pick_foreground(&mut self, color: &str) -> Result<HexColor> {
        let color = self.front_picker.pick(color)?;
        self.state.foreground_color = color;
        self.commit();
        Ok(color)
    }

    /// Window resize: only the reconciler runs, there is no re-render.
    pub fn resize(&mut self, viewport: Viewport) {
        self.layout.viewport = viewport;
        let side = reconcile_square(&mut self.surface, &self.layout);
        if self.state.active_tab == Tab::Size {
            self.relayout_slider();
        }
        debug!("resize to {}x{}: preview {}px", viewport.width, viewport.height, side);
    }

    /// Snapshot the preview and hand a download to the sink.
    ///
    /// Both dimensions are pinned to the floored width while the rasterizer
    /// runs; afterwards only the width is released. If rasterization or
    /// delivery fails the error is returned and the width stays pinned.
    ///
    /// This is not the fire-and-forget export of a browser click handler.
    /// The editor is mutably borrowed until the returned future completes,
    /// so a second export cannot start while one is pending, and the state
    /// cannot be edited in the meantime either. Exports are serialized per
    /// editor; nothing lets two run independently.
    pub async fn save(&mut self) -> Result<Download> {
        let side = pin_export_geometry(&mut self.surface, &self.layout);
        let snapshot = PreviewSnapshot {
            node: self.tree.preview.clone(),
            width: self.surface.style.width.unwrap_or(side),
            height: side,
        };
        debug!("export: snapshot {}x{}", snapshot.width, snapshot.height);

        let rasterizer = Arc::clone(&self.rasterizer);
        let screenshot = rasterizer.rasterize(&snapshot).await?;

        let download = Download {
            href: screenshot.to_data_url(),
            filename: export_filename(&self.config.filename_prefix, self.clock.now_millis()),
        };
        self.sink.deliver(&download)?;
        release_width(&mut self.surface);
        info!(
            "exported {} ({}x{}, {} bytes)",
            download.filename,
            screenshot.width,
            screenshot.height,
            screenshot.png_data.len()
        );
        Ok(download)
    }
}
