//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pure mapping in `input`)
//! - Mounting the widget and driving frames (`web`, wasm32 only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputEvent, Key, map_event};
