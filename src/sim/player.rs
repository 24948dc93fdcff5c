//! Player physics
//!
//! Screen space: y grows downward, so an upward jump impulse is negative.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// The runner. Horizontal position is fixed at `PLAYER_X`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge of the player box
    pub y: f32,
    pub vy: f32,
    pub airborne: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: Self::ground_line(),
            vy: 0.0,
            airborne: false,
        }
    }
}

impl Player {
    /// Lowest allowed `y`: standing on the ground
    #[inline]
    pub const fn ground_line() -> f32 {
        GROUND_Y - PLAYER_HEIGHT
    }

    /// Standing on the ground with the landing already processed
    #[inline]
    pub fn is_grounded(&self) -> bool {
        !self.airborne && self.y >= Self::ground_line()
    }

    /// Apply gravity, integrate, clamp to the ground.
    ///
    /// Returns true on the tick the player lands.
    pub fn integrate(&mut self, gravity: f32) -> bool {
        self.vy += gravity;
        self.y += self.vy;

        if self.y >= Self::ground_line() {
            let landed = self.airborne;
            self.y = Self::ground_line();
            self.vy = 0.0;
            self.airborne = false;
            return landed;
        }
        false
    }

    /// Start a jump if grounded. Returns whether the impulse was applied.
    pub fn try_jump(&mut self, force: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vy = force;
        self.airborne = true;
        true
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(PLAYER_X, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Where jump dust comes from
    pub fn feet(&self) -> Vec2 {
        Vec2::new(PLAYER_X + 10.0, self.y + PLAYER_HEIGHT)
    }

    /// Where the explosion comes from
    pub fn core(&self) -> Vec2 {
        Vec2::new(PLAYER_X + 10.0, self.y + PLAYER_HEIGHT / 2.0)
    }
}
