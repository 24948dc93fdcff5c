//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (all rates are per tick)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod obstacles;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use obstacles::Obstacle;
pub use particles::{Hsl, Particle};
pub use player::Player;
pub use state::{GameMode, GameState, Snapshot};
pub use tick::{Command, apply, tick};
