//! Input widgets bound to the editor state
//!
//! The widgets own the input constraints: the slider clamps and steps sizes,
//! the color picker only ever emits valid `#rrggbb` values, and the text area
//! buffers keystrokes until key-up.

use crate::color::HexColor;
use crate::Result;

/// Discrete size slider.
///
/// A slider created inside a hidden panel has a zero-width track until
/// [`SizeSlider::layout`] is called once the panel is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSlider {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    value: u32,
    track_width: f64,
}

impl SizeSlider {
    pub const MIN: u32 = 12;
    pub const MAX: u32 = 500;

    pub fn new(value: u32) -> Self {
        let mut slider = Self {
            min: Self::MIN,
            max: Self::MAX,
            step: 1,
            value: Self::MIN,
            track_width: 0.0,
        };
        slider.value = slider.clamp(i64::from(value));
        slider
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Handle a raw input value and return the value the slider emits.
    pub fn input(&mut self, raw: i64) -> u32 {
        self.value = self.clamp(raw);
        self.value
    }

    fn clamp(&self, raw: i64) -> u32 {
        let min = i64::from(self.min);
        let clamped = raw.clamp(min, i64::from(self.max));
        let step = i64::from(self.step.max(1));
        let snapped = min + ((clamped - min) / step) * step;
        snapped as u32
    }

    /// Recompute the track geometry for the given container width.
    pub fn layout(&mut self, container_width: f64) {
        self.track_width = container_width.max(0.0);
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn is_laid_out(&self) -> bool {
        self.track_width > 0.0
    }

    /// Horizontal position of the thumb along the track
    pub fn thumb_offset(&self) -> f64 {
        let span = f64::from(self.max - self.min);
        if span == 0.0 {
            return 0.0;
        }
        self.track_width * f64::from(self.value - self.min) / span
    }
}

/// Hex color picker; parses user input into a color or rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPicker {
    color: HexColor,
}

impl ColorPicker {
    pub fn new(color: HexColor) -> Self {
        Self { color }
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    /// Pick a color; on success the picker emits the normalized value.
    pub fn pick(&mut self, input: &str) -> Result<HexColor> {
        self.color = input.trim().parse()?;
        Ok(self.color)
    }
}

/// Multi-line text entry. Input is buffered and committed on key-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextArea {
    value: String,
}

impl TextArea {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The value to commit to the editor state
    pub fn key_up(&self) -> String {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_clamps_to_range() {
        let mut s = SizeSlider::new(50);
        assert_eq!(s.input(0), 12);
        assert_eq!(s.input(-40), 12);
        assert_eq!(s.input(9000), 500);
        assert_eq!(s.input(123), 123);
        assert_eq!(SizeSlider::new(1000).value(), 500);
    }

    #[test]
    fn hidden_slider_has_no_track_until_laid_out() {
        let mut s = SizeSlider::new(256);
        assert!(!s.is_laid_out());
        assert_eq!(s.thumb_offset(), 0.0);
        s.layout(488.0);
        assert!(s.is_laid_out());
        assert_eq!(s.track_width(), 488.0);
        assert_eq!(s.thumb_offset(), 244.0);
    }

    #[test]
    fn picker_keeps_last_valid_color() {
        let mut p = ColorPicker::new(HexColor::BLACK);
        assert_eq!(p.pick("#ABCDEF").unwrap().to_string(), "#abcdef");
        assert!(p.pick("red").is_err());
        assert_eq!(p.color().to_string(), "#abcdef");
    }

    #[test]
    fn text_area_commits_buffer() {
        let mut t = TextArea::new("ある");
        t.input("あるい");
        assert_eq!(t.key_up(), "あるい");
    }
}
