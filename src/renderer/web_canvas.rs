//! Browser `CanvasRenderingContext2d` backend

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::canvas::{Canvas2d, TextStyle};
use super::color::Color;

/// 2D context of a mounted canvas
pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn check(result: Result<(), JsValue>, what: &str) {
        if let Err(e) = result {
            log::warn!("canvas {what} failed: {e:?}");
        }
    }
}

impl Canvas2d for WebCanvas {
    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color) {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        let gradient = self.ctx.create_linear_gradient(x, y, x, y + h);
        Self::check(gradient.add_color_stop(0.0, &top.to_css()), "gradient stop");
        Self::check(gradient.add_color_stop(1.0, &bottom.to_css()), "gradient stop");
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        let r = (radius as f64).clamp(0.0, w.min(h) / 2.0);
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        ctx.move_to(x + r, y);
        Self::check(ctx.arc_to(x + w, y, x + w, y + h, r), "arc_to");
        Self::check(ctx.arc_to(x + w, y + h, x, y + h, r), "arc_to");
        Self::check(ctx.arc_to(x, y + h, x, y, r), "arc_to");
        Self::check(ctx.arc_to(x, y, x + w, y, r), "arc_to");
        ctx.close_path();
        ctx.fill();
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        Self::check(
            self.ctx
                .arc(cx as f64, cy as f64, radius.max(0.0) as f64, 0.0, TAU),
            "arc",
        );
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_fill_style_str(&style.color.to_css());
        Self::check(self.ctx.fill_text(text, x as f64, y as f64), "fill_text");
    }

    fn set_alpha(&mut self, alpha: f32) {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.ctx.set_global_alpha(alpha as f64);
    }
}
