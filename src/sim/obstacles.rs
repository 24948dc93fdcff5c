//! Obstacle spawning and scrolling
//!
//! No minimum gap is enforced between spawns; the cadence alone spaces
//! obstacles out, so back-to-back blocks are possible at high scores.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{GameMode, GameState};
use crate::consts::*;
use crate::tuning::Span;

/// A ground-standing block scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Dimensions are clamped to `[1, MAX_OBSTACLE_DIM]`
    pub fn new(id: u32, x: f32, width: f32, height: f32) -> Self {
        let clamp = |v: f32, name: &str| {
            let clamped = if v.is_finite() {
                v.clamp(1.0, MAX_OBSTACLE_DIM)
            } else {
                1.0
            };
            if clamped != v {
                log::warn!("obstacle {name} {v} clamped to {clamped}");
            }
            clamped
        };
        Self {
            id,
            x,
            width: clamp(width, "width"),
            height: clamp(height, "height"),
        }
    }

    /// Box standing on the ground line
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, GROUND_Y - self.height, self.width, self.height)
    }

    /// Trailing edge has passed the left boundary
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Scroll every obstacle left by `speed` and drop the ones that left the world
pub fn advance(obstacles: &mut Vec<Obstacle>, speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    obstacles.retain(|o| !o.is_offscreen());
}

/// Spawn at the right edge if this tick is on the mode's cadence.
///
/// Returns the new obstacle's ID.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    let (interval, width, height) = match state.mode {
        GameMode::Playing => (
            state.tuning.spawn_interval(state.score),
            state.tuning.play_width,
            state.tuning.play_height,
        ),
        GameMode::IdleDemo => (
            state.tuning.demo_interval,
            state.tuning.demo_width,
            state.tuning.demo_height,
        ),
        GameMode::GameOver => return None,
    };

    if state.frame_counter == 0 || state.frame_counter % u64::from(interval.max(1)) != 0 {
        return None;
    }
    Some(spawn(state, width, height))
}

fn spawn(state: &mut GameState, width: Span, height: Span) -> u32 {
    let id = state.next_entity_id();
    let w = width.lerp(state.rng.random::<f32>());
    let h = height.lerp(state.rng.random::<f32>());
    state.obstacles.push(Obstacle::new(id, WORLD_WIDTH, w, h));
    log::debug!("spawned obstacle {id} ({w:.1}x{h:.1}) at tick {}", state.frame_counter);
    id
}
