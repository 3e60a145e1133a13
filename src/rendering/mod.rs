//! Rendering: editor state to a visual tree, paint list and raster image

pub mod layout;
pub mod paint;
pub mod raster;

use crate::color::HexColor;
use crate::script::{FontFamily, LangMode, ScriptDetector};
use crate::state::{EditorState, Tab};
use std::collections::BTreeMap;

/// Attribute name mirrored from the derived language mode
pub const LANG_ATTRIBUTE: &str = "lang";

/// Vertical offset applied to Japanese text, in pixels
pub const JAPANESE_OFFSET_PX: i32 = -16;

/// The host element carrying the language-mode attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostElement {
    attributes: BTreeMap<String, String>,
}

impl HostElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }
}

/// The preview surface contents, styled from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewNode {
    /// Literal text as stored in state
    pub text: String,
    pub font_size_px: u32,
    pub background: HexColor,
    pub foreground: HexColor,
    pub lang: LangMode,
    pub font_family: FontFamily,
    pub offset_y_px: i32,
}

impl PreviewNode {
    /// Lines as displayed under `white-space: pre-line`
    pub fn lines(&self) -> Vec<String> {
        pre_line(&self.text)
    }
}

/// Collapse spaces and tabs, keep line breaks, trim line edges.
pub fn pre_line(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split([' ', '\t']).filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    TextArea { value: String },
    Slider { min: u32, max: u32, step: u32, value: u32 },
    ColorPicker { color: HexColor },
    SaveButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub tab: Tab,
    pub kind: PanelKind,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabBar {
    pub active_index: usize,
    pub icons: [&'static str; 5],
}

/// Full render output for one commit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub preview: PreviewNode,
    pub tab_bar: TabBar,
    pub panels: Vec<ControlPanel>,
    pub lang: LangMode,
}

impl RenderTree {
    /// The single selected panel
    pub fn visible_panel(&self) -> Option<&ControlPanel> {
        self.panels.iter().find(|p| p.selected)
    }

    pub fn visible_count(&self) -> usize {
        self.panels.iter().filter(|p| p.selected).count()
    }
}

/// Render the state. The only side effect is mirroring the language mode onto `host`.
pub fn render(state: &EditorState, detector: &dyn ScriptDetector, host: &mut HostElement) -> RenderTree {
    let lang = LangMode::detect(detector, &state.text);
    match lang.attribute() {
        Some(value) => host.set_attribute(LANG_ATTRIBUTE, value),
        None => host.remove_attribute(LANG_ATTRIBUTE),
    }

    let preview = PreviewNode {
        text: state.text.clone(),
        font_size_px: state.font_size_px,
        background: state.background_color,
        foreground: state.foreground_color,
        lang,
        font_family: lang.font_family(),
        offset_y_px: if lang == LangMode::Japanese { JAPANESE_OFFSET_PX } else { 0 },
    };

    let panels = Tab::ALL
        .iter()
        .map(|&tab| ControlPanel {
            tab,
            kind: panel_kind(tab, state),
            selected: tab == state.active_tab,
        })
        .collect();

    RenderTree {
        preview,
        tab_bar: TabBar {
            active_index: state.active_tab.index(),
            icons: Tab::ALL.map(Tab::icon),
        },
        panels,
        lang,
    }
}

fn panel_kind(tab: Tab, state: &EditorState) -> PanelKind {
    match tab {
        Tab::Text => PanelKind::TextArea { value: state.text.clone() },
        Tab::Size => PanelKind::Slider {
            min: crate::widgets::SizeSlider::MIN,
            max: crate::widgets::SizeSlider::MAX,
            step: 1,
            value: state.font_size_px,
        },
        Tab::Back => PanelKind::ColorPicker { color: state.background_color },
        Tab::Front => PanelKind::ColorPicker { color: state.foreground_color },
        Tab::Save => PanelKind::SaveButton,
    }
}

/// A rasterized snapshot of the preview surface.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, png_data: Vec::new() }
    }
}
