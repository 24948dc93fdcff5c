//! Game state and core simulation types
//!
//! One authoritative struct owns every simulation field so the per-tick
//! update order can be enforced in a single place.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::particles::Particle;
use super::player::Player;
use crate::consts::SCROLL_WRAP;
use crate::tuning::Tuning;
use crate::wrap;

/// Coarse game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Scripted showcase, the initial mode
    #[default]
    IdleDemo,
    /// A human run in progress
    Playing,
    /// Run ended by a collision; waiting for restart
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::IdleDemo => "idle-demo",
            GameMode::Playing => "playing",
            GameMode::GameOver => "game-over",
        }
    }
}

/// Read-only view handed to the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub score: u32,
    pub high_score: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance table
    pub tuning: Tuning,
    /// Spawn and particle randomness; never a global generator
    pub rng: Pcg32,
    pub mode: GameMode,
    pub player: Player,
    /// Spawn order == left-to-right order
    pub obstacles: Vec<Obstacle>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Best score this session; never persisted
    pub high_score: u32,
    pub game_speed: f32,
    pub frame_counter: u64,
    /// Distance scrolled, wrapped to keep precision (background offsets only)
    pub world_scroll: f32,
    next_id: u32,
}

impl GameState {
    /// Create a new idle-demo state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let game_speed = tuning.speed_initial;
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::IdleDemo,
            player: Player::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score: 0,
            game_speed,
            frame_counter: 0,
            world_scroll: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear everything a run owns. Keeps the high score, the RNG stream
    /// and the ID counter so removed obstacles can never be confused with
    /// new ones.
    pub fn reset_run(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.particles.clear();
        self.score = 0;
        self.game_speed = self.tuning.speed_initial;
        self.frame_counter = 0;
        self.world_scroll = 0.0;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            score: self.score,
            high_score: self.high_score,
        }
    }

    /// Advance the background scroll accumulator
    pub fn scroll_world(&mut self) {
        self.world_scroll = wrap(self.world_scroll + self.game_speed, SCROLL_WRAP);
    }
}
