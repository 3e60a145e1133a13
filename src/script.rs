//! Script detection and the derived language mode

use serde::{Deserialize, Serialize};
use unicode_script::{Script, UnicodeScript};

/// Predicate deciding whether a text contains a particular script.
pub trait ScriptDetector: Send + Sync {
    fn has_script(&self, text: &str) -> bool;
}

/// Detects Japanese text: any Hiragana, Katakana or Han character.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseDetector;

impl ScriptDetector for JapaneseDetector {
    fn has_script(&self, text: &str) -> bool {
        text.chars()
            .any(|c| matches!(c.script(), Script::Hiragana | Script::Katakana | Script::Han))
    }
}

/// Language mode derived from the text on each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangMode {
    #[default]
    Default,
    Japanese,
}

impl LangMode {
    pub fn detect(detector: &dyn ScriptDetector, text: &str) -> Self {
        if detector.has_script(text) {
            LangMode::Japanese
        } else {
            LangMode::Default
        }
    }

    /// Value of the host `lang` attribute, if any
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            LangMode::Default => None,
            LangMode::Japanese => Some("japanese"),
        }
    }

    pub fn font_family(self) -> FontFamily {
        match self {
            LangMode::Default => FontFamily::Default,
            LangMode::Japanese => FontFamily::NotoSerifJp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    Default,
    NotoSerifJp,
}

impl FontFamily {
    pub fn css(self) -> &'static str {
        match self {
            FontFamily::Default => "serif",
            FontFamily::NotoSerifJp => "'Noto Serif JP', serif",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kana_and_kanji() {
        let d = JapaneseDetector;
        assert!(d.has_script("ある"));
        assert!(d.has_script("カタカナ"));
        assert!(d.has_script("漢字"));
        assert!(d.has_script("hello 世界"));
    }

    #[test]
    fn latin_and_empty_are_not_japanese() {
        let d = JapaneseDetector;
        assert!(!d.has_script(""));
        assert!(!d.has_script("hello world"));
        assert!(!d.has_script("Привет 123"));
        assert_eq!(LangMode::detect(&d, ""), LangMode::Default);
    }

    #[test]
    fn japanese_mode_selects_noto() {
        assert_eq!(LangMode::Japanese.attribute(), Some("japanese"));
        assert_eq!(LangMode::Japanese.font_family(), FontFamily::NotoSerifJp);
        assert_eq!(LangMode::Default.attribute(), None);
        assert_eq!(FontFamily::NotoSerifJp.css(), "'Noto Serif JP', serif");
        assert_eq!(FontFamily::Default.css(), "serif");
    }
}
