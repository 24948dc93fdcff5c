//! Fixed timestep driver
//!
//! Owns one game state, turns host frame times into whole simulation
//! ticks, and draws once per host frame. Platform independent; the
//! browser glue and the headless binary both drive it the same way.

use crate::consts::*;
use crate::renderer::{self, Canvas2d};
use crate::settings::Settings;
use crate::sim::{self, Command, GameMode, GameState, Snapshot};
use crate::tuning::Tuning;

pub struct Engine {
    state: GameState,
    settings: Settings,
    accumulator: f32,
    stopped: bool,
    /// Last snapshot handed out by `take_change`
    reported: Option<Snapshot>,
}

impl Engine {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_tuning(seed, Tuning::default(), settings)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        log::info!("Engine created with seed {seed}");
        Self {
            state: GameState::with_tuning(seed, tuning),
            settings,
            accumulator: 0.0,
            stopped: false,
            reported: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Run the simulation ticks owed for `dt` seconds of host time.
    ///
    /// Returns how many ticks ran.
    pub fn frame(&mut self, dt: f32) -> u32 {
        if self.stopped {
            return 0;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim::tick(&mut self.state);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Draw the current state
    pub fn draw(&self, canvas: &mut impl Canvas2d) {
        renderer::draw(&self.state, &self.settings, canvas);
    }

    pub fn command(&mut self, command: Command) -> bool {
        if self.stopped {
            return false;
        }
        sim::apply(&mut self.state, command)
    }

    pub fn jump(&mut self) -> bool {
        self.command(Command::Jump)
    }

    pub fn start(&mut self) -> bool {
        self.command(Command::Start)
    }

    pub fn restart(&mut self) -> bool {
        self.command(Command::Restart)
    }

    pub fn stop_to_demo(&mut self) -> bool {
        self.command(Command::StopToDemo)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The snapshot if it differs from the last one returned here
    pub fn take_change(&mut self) -> Option<Snapshot> {
        let current = self.snapshot();
        if self.reported == Some(current) {
            return None;
        }
        self.reported = Some(current);
        Some(current)
    }

    /// Stop for good; later frames and commands are ignored
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("Engine stopped at score {}", self.state.score);
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::settings::QualityPreset;

    fn engine() -> Engine {
        Engine::new(42, Settings::default())
    }

    #[test]
    fn test_one_tick_per_60hz_frame() {
        let mut engine = engine();
        assert_eq!(engine.frame(SIM_DT), 1);
        assert_eq!(engine.state().frame_counter, 1);
    }

    #[test]
    fn test_fast_frames_accumulate() {
        let mut engine = engine();
        assert_eq!(engine.frame(SIM_DT / 2.0), 0);
        assert_eq!(engine.frame(SIM_DT / 2.0), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut engine = engine();
        assert_eq!(engine.frame(5.0), MAX_SUBSTEPS);
        // Backlog dropped, not replayed
        assert_eq!(engine.frame(0.0), 0);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut engine = engine();
        assert_eq!(engine.frame(f32::NAN), 0);
        assert_eq!(engine.frame(-1.0), 0);
        assert_eq!(engine.state().frame_counter, 0);
    }

    #[test]
    fn test_stopped_engine_is_inert() {
        let mut engine = engine();
        engine.stop();
        assert!(engine.is_stopped());
        assert_eq!(engine.frame(SIM_DT), 0);
        assert!(!engine.start());
        assert_eq!(engine.mode(), GameMode::IdleDemo);
    }

    #[test]
    fn test_observables_follow_commands() {
        let mut engine = engine();
        assert_eq!(engine.mode(), GameMode::IdleDemo);
        assert!(engine.start());
        for _ in 0..10 {
            engine.frame(SIM_DT);
        }
        assert_eq!(engine.mode(), GameMode::Playing);
        assert_eq!(engine.score(), 2);
        assert_eq!(engine.high_score(), 0);
        assert!(engine.stop_to_demo());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_take_change_reports_once() {
        let mut engine = engine();
        assert!(engine.take_change().is_some());
        assert!(engine.take_change().is_none());
        engine.frame(SIM_DT);
        // Demo ticks don't move score or mode
        assert!(engine.take_change().is_none());
        engine.start();
        let change = engine.take_change().unwrap();
        assert_eq!(change.mode, GameMode::Playing);
    }

    #[test]
    fn test_quality_switch_changes_drawing() {
        let mut engine = engine();
        engine.frame(SIM_DT);
        let mut list = DrawList::new();
        engine.draw(&mut list);
        let medium = list.len();

        let low = engine.settings().with_quality(QualityPreset::Low);
        engine.set_settings(low);
        assert_eq!(engine.settings().quality, QualityPreset::Low);
        assert!(!engine.settings().particles);

        list.clear();
        engine.draw(&mut list);
        // No stars, plain runner box
        assert!(list.len() < medium);
    }

    #[test]
    fn test_draw_frame() {
        let mut engine = engine();
        engine.start();
        engine.frame(SIM_DT);
        let mut list = DrawList::new();
        engine.draw(&mut list);
        assert_eq!(list.texts(), vec!["Score: 0"]);
    }
}
