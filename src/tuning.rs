//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults are the
//! shipped balance; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be positive")]
    NonPositive { field: &'static str },
    #[error("tuning range `{field}` has min above max")]
    InvertedRange { field: &'static str },
}

/// Half-open `[min, max)` range used for randomized spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in `[0, 1)` into the span
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }

    fn check(&self, field: &'static str) -> Result<(), TuningError> {
        if self.min > self.max {
            return Err(TuningError::InvertedRange { field });
        }
        if self.min <= 0.0 {
            return Err(TuningError::NonPositive { field });
        }
        Ok(())
    }
}

/// Particle burst shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstTuning {
    pub count: u32,
    pub life: u32,
    /// Horizontal velocity is drawn from `±spread_x`
    pub spread_x: f32,
    /// Vertical velocity; jump bursts only kick upward
    pub spread_y: f32,
    pub upward_only: bool,
    pub hue: Span,
    pub saturation: f32,
    pub lightness: f32,
}

/// Engine-wide balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_force: f32,
    pub speed_initial: f32,
    pub speed_increment: f32,
    /// Playing spawn interval: `max(min_interval, base_interval - score / score_divisor)`
    pub base_interval: u32,
    pub min_interval: u32,
    pub score_divisor: u32,
    pub demo_interval: u32,
    pub play_width: Span,
    pub play_height: Span,
    pub demo_width: Span,
    pub demo_height: Span,
    /// Autoplay jumps when an obstacle's left edge is strictly inside this window
    pub reaction_window: Span,
    /// Score grows by one every this many playing ticks
    pub score_every: u32,
    pub particle_gravity: f32,
    pub jump_burst: BurstTuning,
    pub autoplay_burst: BurstTuning,
    pub explosion_burst: BurstTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            speed_initial: GAME_SPEED_INITIAL,
            speed_increment: GAME_SPEED_INCREMENT,
            base_interval: 100,
            min_interval: 60,
            score_divisor: 10,
            demo_interval: 80,
            play_width: Span::new(25.0, 50.0),
            play_height: Span::new(35.0, 70.0),
            demo_width: Span::new(30.0, 50.0),
            demo_height: Span::new(30.0, 60.0),
            reaction_window: Span::new(40.0, 150.0),
            score_every: 5,
            particle_gravity: PARTICLE_GRAVITY,
            jump_burst: BurstTuning {
                count: 5,
                life: 20,
                spread_x: 2.0,
                spread_y: 3.0,
                upward_only: true,
                hue: Span::new(280.0, 330.0),
                saturation: 80.0,
                lightness: 60.0,
            },
            autoplay_burst: BurstTuning {
                count: 3,
                life: 15,
                spread_x: 1.5,
                spread_y: 2.0,
                upward_only: true,
                hue: Span::new(280.0, 330.0),
                saturation: 70.0,
                lightness: 50.0,
            },
            explosion_burst: BurstTuning {
                count: 20,
                life: 30,
                spread_x: 5.0,
                spread_y: 5.0,
                upward_only: false,
                hue: Span::new(280.0, 340.0),
                saturation: 80.0,
                lightness: 60.0,
            },
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse host-provided JSON, falling back to defaults on bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring invalid tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Reject tables that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.gravity <= 0.0 {
            return Err(TuningError::NonPositive { field: "gravity" });
        }
        // Upward impulse is negative in screen space
        if self.jump_force >= 0.0 {
            return Err(TuningError::NonPositive { field: "jump_force" });
        }
        if self.speed_initial <= 0.0 {
            return Err(TuningError::NonPositive { field: "speed_initial" });
        }
        if self.speed_increment < 0.0 {
            return Err(TuningError::NonPositive { field: "speed_increment" });
        }
        for (field, value) in [
            ("base_interval", self.base_interval),
            ("min_interval", self.min_interval),
            ("score_divisor", self.score_divisor),
            ("demo_interval", self.demo_interval),
            ("score_every", self.score_every),
        ] {
            if value == 0 {
                return Err(TuningError::NonPositive { field });
            }
        }
        if self.min_interval > self.base_interval {
            return Err(TuningError::InvertedRange { field: "min_interval" });
        }
        self.play_width.check("play_width")?;
        self.play_height.check("play_height")?;
        self.demo_width.check("demo_width")?;
        self.demo_height.check("demo_height")?;
        self.reaction_window.check("reaction_window")?;
        for (field, burst) in [
            ("jump_burst", &self.jump_burst),
            ("autoplay_burst", &self.autoplay_burst),
            ("explosion_burst", &self.explosion_burst),
        ] {
            if burst.life == 0 {
                return Err(TuningError::NonPositive { field });
            }
            if burst.hue.min > burst.hue.max {
                return Err(TuningError::InvertedRange { field });
            }
        }
        Ok(())
    }

    /// Ticks between obstacle spawns while playing
    pub fn spawn_interval(&self, score: u32) -> u32 {
        self.base_interval
            .saturating_sub(score / self.score_divisor.max(1))
            .max(self.min_interval)
            .max(1)
    }
}
