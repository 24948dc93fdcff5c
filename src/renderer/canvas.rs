//! Immediate-mode 2D drawing surface
//!
//! The scene only ever issues these primitives, so any canvas-like target
//! (the browser's 2D context, a recorder for tests) can implement it.

use super::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    pub color: Color,
    pub align: TextAlign,
}

/// Primitive draw calls. Implementations clamp alpha to `[0, 1]`.
pub trait Canvas2d {
    /// Fill a rect with a top-to-bottom linear gradient
    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
    /// Global opacity for subsequent calls
    fn set_alpha(&mut self, alpha: f32);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Gradient {
        rect: [f32; 4],
        top: Color,
        bottom: Color,
    },
    Rect {
        rect: [f32; 4],
        color: Color,
        alpha: f32,
    },
    RoundRect {
        rect: [f32; 4],
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Text {
        text: String,
        pos: [f32; 2],
        style: TextStyle,
    },
}

/// Canvas that records every call; used headless and in tests
#[derive(Debug)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
    alpha: f32,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            cmds: Vec::new(),
            alpha: 1.0,
        }
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.alpha = 1.0;
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Plain rects drawn with `color`
    pub fn rects_with(&self, color: Color) -> Vec<[f32; 4]> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect { rect, color: c, .. } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas2d for DrawList {
    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color) {
        self.cmds.push(DrawCmd::Gradient {
            rect: [x, y, w, h],
            top,
            bottom,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.cmds.push(DrawCmd::Rect {
            rect: [x, y, w, h],
            color,
            alpha: self.alpha,
        });
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::RoundRect {
            rect: [x, y, w, h],
            radius,
            color,
            alpha: self.alpha,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::Circle {
            center: [cx, cy],
            radius,
            color,
            alpha: self.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.cmds.push(DrawCmd::Text {
            text: text.to_string(),
            pos: [x, y],
            style,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}
