//! Mini Runner - an endless-runner showcase widget
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, particles, game state)
//! - `renderer`: Immediate-mode 2D drawing of a simulation frame
//! - `engine`: Fixed timestep driver tying simulation and rendering together
//! - `platform`: Input adapter and browser glue
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
#[cfg(target_arch = "wasm32")]
pub use platform::web::MiniGameWidget;
pub use settings::{QualityPreset, Settings};
pub use sim::{GameMode, GameState, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; one tick per 60 Hz frame
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest host frame we account for (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical drawing surface
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 200.0;
    pub const GROUND_Y: f32 = 160.0;

    /// Player slot (the world scrolls, the player stays put)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Per-tick physics (units per tick, units per tick²)
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_FORCE: f32 = -14.0;
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// World speed
    pub const GAME_SPEED_INITIAL: f32 = 6.0;
    pub const GAME_SPEED_INCREMENT: f32 = 0.001;

    /// Largest width/height an obstacle may be constructed with
    pub const MAX_OBSTACLE_DIM: f32 = 120.0;

    /// Starfield scrolls at this fraction of world speed
    pub const STAR_PARALLAX: f32 = 0.2;
    /// Ground dash period
    pub const GROUND_TILE: f32 = 40.0;
    /// Scroll accumulator wraps here; multiple of both the star and ground periods
    pub const SCROLL_WRAP: f32 = WORLD_WIDTH / STAR_PARALLAX;
}

/// Wrap `value` into `[0, period)`; a non-positive period yields 0
#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    if period <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negatives
    if wrapped >= period { 0.0 } else { wrapped }
}
