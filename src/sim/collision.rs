//! Axis-aligned collision detection
//!
//! Only the player can hit anything, and any hit is terminal, so the
//! detector just answers "which obstacle, if any, overlaps the player".

use glam::Vec2;

use super::obstacles::Obstacle;

/// Axis-aligned bounding box in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// First obstacle overlapping `player`, by spawn order
pub fn first_hit<'a>(player: &Aabb, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| player.overlaps(&o.bounds()))
}
