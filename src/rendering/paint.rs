//! Paint list for the preview surface
//!
//! Glyphs are painted as filled boxes on a fixed advance grid; the built-in
//! rasterizer has no font outlines.

use crate::rendering::PreviewNode;
use unicode_script::{Script, UnicodeScript};

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
    Glyph {
        ch: char,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
}

const LINE_HEIGHT: f64 = 1.2;

fn is_wide(ch: char) -> bool {
    matches!(ch.script(), Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul)
}

fn advance(ch: char, size: f64) -> f64 {
    if is_wide(ch) {
        size
    } else if ch.is_whitespace() {
        size * 0.3
    } else {
        size * 0.6
    }
}

/// Build the paint list for a `width` x `height` preview.
///
/// Text is centered on both axes, then shifted by the node's vertical offset.
pub fn paint_preview(node: &PreviewNode, width: u32, height: u32) -> Vec<PaintCommand> {
    let mut cmds = vec![PaintCommand::SolidRect {
        x: 0,
        y: 0,
        width,
        height,
        rgba: node.background.rgba(),
    }];

    let size = f64::from(node.font_size_px);
    let line_h = size * LINE_HEIGHT;
    let lines = node.lines();
    let block_h = line_h * lines.len() as f64;
    let mut top = (f64::from(height) - block_h) / 2.0 + f64::from(node.offset_y_px);
    let rgba = node.foreground.rgba();

    for line in &lines {
        let line_w: f64 = line.chars().map(|c| advance(c, size)).sum();
        let mut x = (f64::from(width) - line_w) / 2.0;
        for ch in line.chars() {
            let adv = advance(ch, size);
            if !ch.is_whitespace() {
                let (w, h) = if is_wide(ch) { (size * 0.8, size * 0.8) } else { (size * 0.5, size * 0.7) };
                let gx = x + (adv - w) / 2.0;
                let gy = top + (line_h - h) / 2.0;
                cmds.push(PaintCommand::Glyph {
                    ch,
                    x: gx.round() as i32,
                    y: gy.round() as i32,
                    width: w.round().max(1.0) as u32,
                    height: h.round().max(1.0) as u32,
                    rgba,
                });
            }
            x += adv;
        }
        top += line_h;
    }
    cmds
}
