//! Cosmetic particles (jump dust, crash burst)
//!
//! Bursts are small and short-lived, so the set is bounded by decay alone.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::BurstTuning;

/// Particle color in HSL (hue in degrees, saturation/lightness in percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left; removed at 0
    pub life: u32,
    pub initial_life: u32,
    pub color: Hsl,
}

impl Particle {
    /// `life` is clamped to at least one tick
    pub fn new(pos: Vec2, vel: Vec2, life: u32, color: Hsl) -> Self {
        let life = life.max(1);
        Self {
            pos,
            vel,
            life,
            initial_life: life,
            color,
        }
    }

    /// Render opacity in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        if self.initial_life == 0 {
            return 0.0;
        }
        (self.life as f32 / self.initial_life as f32).clamp(0.0, 1.0)
    }
}

/// Integrate, age, and prune
pub fn update(particles: &mut Vec<Particle>, gravity: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += gravity;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Emit `burst.count` particles at `origin`
pub fn burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, origin: Vec2, burst: &BurstTuning) {
    particles.reserve(burst.count as usize);
    for _ in 0..burst.count {
        let vx = (rng.random::<f32>() - 0.5) * 2.0 * burst.spread_x;
        let vy = if burst.upward_only {
            -rng.random::<f32>() * burst.spread_y
        } else {
            (rng.random::<f32>() - 0.5) * 2.0 * burst.spread_y
        };
        let color = Hsl {
            hue: burst.hue.lerp(rng.random::<f32>()),
            saturation: burst.saturation,
            lightness: burst.lightness,
        };
        particles.push(Particle::new(origin, Vec2::new(vx, vy), burst.life, color));
    }
}
