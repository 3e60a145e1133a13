//! Editor state: the five fields everything else is derived from

use crate::color::HexColor;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// The five control tabs, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Text,
    Size,
    Back,
    Front,
    Save,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Text, Tab::Size, Tab::Back, Tab::Front, Tab::Save];

    pub fn from_index(index: usize) -> Result<Tab> {
        Self::ALL.get(index).copied().ok_or(Error::InvalidTab(index))
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Text => 0,
            Tab::Size => 1,
            Tab::Back => 2,
            Tab::Front => 3,
            Tab::Save => 4,
        }
    }

    /// Material icon shown on the tab bar
    pub fn icon(self) -> &'static str {
        match self {
            Tab::Text => "text_format",
            Tab::Size => "format_size",
            Tab::Back => "flip_to_back",
            Tab::Front => "flip_to_front",
            Tab::Save => "save",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::Text => "text",
            Tab::Size => "size",
            Tab::Back => "back",
            Tab::Front => "front",
            Tab::Save => "save",
        }
    }
}

/// The editor's entire mutable state.
///
/// Font size is stored as given; clamping to the slider range is the slider
/// widget's job, not the state holder's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub active_tab: Tab,
    pub text: String,
    pub font_size_px: u32,
    pub background_color: HexColor,
    pub foreground_color: HexColor,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Text,
            text: "ある".to_string(),
            font_size_px: 50,
            background_color: HexColor::BLACK,
            foreground_color: HexColor::WHITE,
        }
    }
}
