//! 2D rendering module
//!
//! The scene is drawn with immediate-mode primitives through [`Canvas2d`];
//! the browser's 2D context is one implementation, [`DrawList`] another.

pub mod canvas;
pub mod color;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web_canvas;

pub use canvas::{Canvas2d, DrawCmd, DrawList, TextAlign, TextStyle};
pub use color::{Color, palette};
pub use scene::draw;
#[cfg(target_arch = "wasm32")]
pub use web_canvas::WebCanvas;
