//! Colors for 2D rendering

use crate::sim::Hsl;

/// sRGB color with straight alpha
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// HSL (degrees, percent, percent) to RGB
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.hue.rem_euclid(360.0) / 60.0;
        let s = (hsl.saturation / 100.0).clamp(0.0, 1.0);
        let l = (hsl.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                self.a.clamp(0.0, 1.0)
            )
        }
    }
}

/// Colors for game elements
pub mod palette {
    use super::Color;

    pub const SKY_TOP: Color = Color::hex(0x1e1b4b);
    pub const SKY_BOTTOM: Color = Color::hex(0x0f172a);
    pub const STAR: Color = Color::rgb(255, 255, 255).with_alpha(0.3);
    pub const GROUND: Color = Color::hex(0x374151);
    pub const GROUND_DASH: Color = Color::hex(0x4b5563);

    pub const OBSTACLE: Color = Color::hex(0xef4444);
    pub const OBSTACLE_STUD: Color = Color::hex(0xfca5a5);

    pub const SKIN: Color = Color::hex(0xf5c842);
    pub const FACE: Color = Color::hex(0x1a1a1a);
    pub const SHIRT: Color = Color::hex(0x4a7ebf);
    pub const PANTS: Color = Color::hex(0x8a9a5b);

    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const ACCENT: Color = Color::hex(0xa855f7);
    pub const VEIL: Color = Color::rgb(0, 0, 0).with_alpha(0.5);
}
