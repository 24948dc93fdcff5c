//! Fixed timestep simulation tick and mode transitions
//!
//! Core game loop that advances simulation deterministically. Within a
//! tick the order is: control input, physics, obstacles, particles,
//! collision. Collision must see obstacles after they moved.

use super::state::{GameMode, GameState};
use super::{autoplay, collision, obstacles, particles};

/// Commands the host may issue. Any command that does not apply to the
/// current mode is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    /// Idle-Demo/Game-Over -> Playing with a fresh run
    Start,
    /// Game-Over -> Playing
    Restart,
    /// Playing/Game-Over -> Idle-Demo
    StopToDemo,
}

/// Apply a command. Returns whether it had any effect.
pub fn apply(state: &mut GameState, command: Command) -> bool {
    match command {
        Command::Jump => {
            if state.mode != GameMode::Playing {
                return false;
            }
            human_jump(state)
        }
        Command::Start => match state.mode {
            GameMode::IdleDemo | GameMode::GameOver => {
                enter_playing(state);
                true
            }
            GameMode::Playing => false,
        },
        Command::Restart => {
            if state.mode != GameMode::GameOver {
                return false;
            }
            enter_playing(state);
            true
        }
        Command::StopToDemo => match state.mode {
            GameMode::Playing | GameMode::GameOver => {
                state.reset_run();
                state.mode = GameMode::IdleDemo;
                log::info!("Back to demo (high score {})", state.high_score);
                true
            }
            GameMode::IdleDemo => false,
        },
    }
}

impl GameState {
    pub fn jump(&mut self) -> bool {
        apply(self, Command::Jump)
    }

    pub fn start(&mut self) -> bool {
        apply(self, Command::Start)
    }

    pub fn restart(&mut self) -> bool {
        apply(self, Command::Restart)
    }

    pub fn stop_to_demo(&mut self) -> bool {
        apply(self, Command::StopToDemo)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState) {
    // Control input: only the demo player acts inside the tick, human
    // jumps are applied as they arrive
    if state.mode == GameMode::IdleDemo
        && autoplay::wants_jump(&state.player, &state.obstacles, state.tuning.reaction_window)
    {
        demo_jump(state);
    }

    match state.mode {
        GameMode::Playing => {
            state.frame_counter += 1;
            state.game_speed += state.tuning.speed_increment;
            if state.frame_counter % u64::from(state.tuning.score_every.max(1)) == 0 {
                state.score += 1;
            }
        }
        GameMode::IdleDemo => state.frame_counter += 1,
        GameMode::GameOver => {}
    }

    // Physics runs in every mode so a crashed runner still falls
    state.player.integrate(state.tuning.gravity);

    if state.mode != GameMode::GameOver {
        obstacles::advance(&mut state.obstacles, state.game_speed);
        obstacles::maybe_spawn(state);
        state.scroll_world();
    }

    particles::update(&mut state.particles, state.tuning.particle_gravity);

    if state.mode == GameMode::Playing {
        let hit = collision::first_hit(&state.player.bounds(), &state.obstacles).map(|o| o.id);
        if let Some(id) = hit {
            enter_game_over(state, id);
        }
    }
}

fn enter_playing(state: &mut GameState) {
    state.reset_run();
    state.mode = GameMode::Playing;
    log::info!("Run started (high score {})", state.high_score);
}

fn enter_game_over(state: &mut GameState, obstacle_id: u32) {
    state.mode = GameMode::GameOver;
    state.high_score = state.high_score.max(state.score);
    let origin = state.player.core();
    particles::burst(
        &mut state.particles,
        &mut state.rng,
        origin,
        &state.tuning.explosion_burst,
    );
    log::info!(
        "Game over: hit obstacle {} with score {} (best {})",
        obstacle_id,
        state.score,
        state.high_score
    );
}

fn human_jump(state: &mut GameState) -> bool {
    if !state.player.try_jump(state.tuning.jump_force) {
        return false;
    }
    let feet = state.player.feet();
    particles::burst(&mut state.particles, &mut state.rng, feet, &state.tuning.jump_burst);
    true
}

fn demo_jump(state: &mut GameState) {
    if state.player.try_jump(state.tuning.jump_force) {
        let feet = state.player.feet();
        particles::burst(
            &mut state.particles,
            &mut state.rng,
            feet,
            &state.tuning.autoplay_burst,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacles::Obstacle;
    use crate::sim::player::Player;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Tuning that never spawns, for tests that place obstacles by hand
    fn no_spawn() -> Tuning {
        Tuning {
            base_interval: u32::MAX,
            min_interval: u32::MAX,
            demo_interval: u32::MAX,
            ..Tuning::default()
        }
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::with_tuning(seed, no_spawn());
        assert!(state.start());
        state
    }

    fn block_in_player_slot(state: &mut GameState) {
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, PLAYER_X, PLAYER_WIDTH, PLAYER_HEIGHT));
    }

    #[test]
    fn test_score_after_five_ticks() {
        let mut state = playing(1);
        assert_eq!(state.score, 0);
        for _ in 0..5 {
            tick(&mut state);
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_jump_applies_immediately() {
        let mut state = playing(1);
        assert!(state.jump());
        assert_eq!(state.player.vy, JUMP_FORCE);
        assert!(state.player.airborne);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_jump_while_airborne_is_ignored() {
        let mut state = playing(1);
        state.jump();
        tick(&mut state);
        let vy = state.player.vy;
        let particles = state.particles.len();
        assert!(!state.jump());
        assert_eq!(state.player.vy, vy);
        assert_eq!(state.particles.len(), particles);
    }

    #[test]
    fn test_overlap_ends_run() {
        let mut state = playing(1);
        for _ in 0..12 {
            tick(&mut state);
        }
        let score = state.score;
        assert!(score > 0);
        block_in_player_slot(&mut state);
        tick(&mut state);
        assert_eq!(state.mode, GameMode::GameOver);
        assert!(state.high_score >= score);
        assert_eq!(state.particles.len(), 20);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = playing(1);
        block_in_player_slot(&mut state);
        tick(&mut state);
        assert_eq!(state.mode, GameMode::GameOver);

        assert!(state.restart());
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.game_speed, GAME_SPEED_INITIAL);
    }

    #[test]
    fn test_stop_to_demo_is_idempotent() {
        let mut state = playing(1);
        for _ in 0..20 {
            tick(&mut state);
        }
        assert!(state.stop_to_demo());
        let once = state.clone();
        assert!(!state.stop_to_demo());
        assert_eq!(state.snapshot(), once.snapshot());
        assert_eq!(state.player, once.player);
        assert_eq!(state.obstacles, once.obstacles);
        assert_eq!(state.frame_counter, once.frame_counter);
        assert_eq!(state.game_speed, once.game_speed);
    }

    #[test]
    fn test_invalid_commands_are_noops() {
        let mut state = GameState::new(1);
        assert!(!state.jump());
        assert!(!state.restart());
        assert!(!state.stop_to_demo());
        assert_eq!(state.mode, GameMode::IdleDemo);

        assert!(state.start());
        assert!(!state.start());
        assert!(!state.restart());

        block_in_player_slot(&mut state);
        tick(&mut state);
        assert_eq!(state.mode, GameMode::GameOver);
        let vy = state.player.vy;
        assert!(!state.jump());
        assert_eq!(state.player.vy, vy);
    }

    #[test]
    fn test_start_from_game_over() {
        let mut state = playing(1);
        block_in_player_slot(&mut state);
        tick(&mut state);
        assert!(state.start());
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_stop_to_demo_from_game_over() {
        let mut state = playing(1);
        block_in_player_slot(&mut state);
        tick(&mut state);
        assert!(state.stop_to_demo());
        assert_eq!(state.mode, GameMode::IdleDemo);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_game_over_freezes_world_but_not_gravity() {
        let mut state = playing(1);
        state.jump();
        for _ in 0..5 {
            tick(&mut state);
        }
        // Drop a tall block onto the airborne runner
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(id, PLAYER_X, 40.0, 120.0));
        tick(&mut state);
        assert_eq!(state.mode, GameMode::GameOver);

        let score = state.score;
        let frozen = state.obstacles.clone();
        let scroll = state.world_scroll;
        for _ in 0..60 {
            tick(&mut state);
        }
        assert_eq!(state.score, score);
        assert_eq!(state.obstacles, frozen);
        assert_eq!(state.world_scroll, scroll);
        assert!(state.player.is_grounded());
        // Explosion decays away
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_collision_checked_after_obstacles_move() {
        let mut state = playing(1);
        // Overlaps the player by 3 units now, clear of it after scrolling 6
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, PLAYER_X - 37.0, 40.0, 60.0));
        tick(&mut state);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_speed_ramps_only_while_playing() {
        let mut state = GameState::with_tuning(1, no_spawn());
        for _ in 0..100 {
            tick(&mut state);
        }
        assert_eq!(state.game_speed, GAME_SPEED_INITIAL);

        state.start();
        for _ in 0..1000 {
            tick(&mut state);
        }
        assert!((state.game_speed - (GAME_SPEED_INITIAL + 1.0)).abs() < 1e-2);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_demo_plays_itself() {
        let mut state = GameState::new(2024);
        let mut jumps = 0;
        let mut seen = HashSet::new();
        for _ in 0..3000 {
            let was_airborne = state.player.airborne;
            tick(&mut state);
            if !was_airborne && state.player.airborne {
                jumps += 1;
            }
            seen.extend(state.obstacles.iter().map(|o| o.id));
        }
        assert_eq!(state.mode, GameMode::IdleDemo);
        assert_eq!(state.score, 0);
        // 3000 ticks at one spawn per 80
        assert_eq!(seen.len(), 37);
        assert!(jumps >= 30, "only {jumps} demo jumps");
    }

    #[test]
    fn test_demo_clears_every_obstacle() {
        // Run collision checks against the demo without letting them end it
        let mut state = GameState::new(99);
        for _ in 0..4000 {
            tick(&mut state);
            let hit = collision::first_hit(&state.player.bounds(), &state.obstacles);
            assert!(hit.is_none(), "demo ran into {hit:?} at tick {}", state.frame_counter);
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        for i in 0..600 {
            if i % 37 == 0 {
                state1.jump();
                state2.jump();
            }
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.particles, state2.particles);
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Tick(u8),
        Cmd(Command),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => (1u8..40).prop_map(Step::Tick),
            2 => Just(Step::Cmd(Command::Jump)),
            1 => Just(Step::Cmd(Command::Start)),
            1 => Just(Step::Cmd(Command::Restart)),
            1 => Just(Step::Cmd(Command::StopToDemo)),
        ]
    }

    proptest! {
        #[test]
        fn prop_session_invariants(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..80)) {
            let mut state = GameState::new(seed);
            let mut high_score = state.high_score;
            let mut removed: HashSet<u32> = HashSet::new();

            for step in steps {
                match step {
                    Step::Cmd(cmd) => {
                        // Resets discard obstacles without them scrolling off; those
                        // count as removed too
                        let before: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
                        apply(&mut state, cmd);
                        for id in before {
                            if !state.obstacles.iter().any(|o| o.id == id) {
                                removed.insert(id);
                            }
                        }
                    }
                    Step::Tick(n) => {
                        for _ in 0..n {
                            let before: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
                            tick(&mut state);

                            prop_assert!(state.player.y <= Player::ground_line());
                            prop_assert_eq!(
                                state.player.airborne,
                                state.player.y != Player::ground_line()
                            );
                            prop_assert!(state.high_score >= high_score);
                            high_score = state.high_score;

                            for o in &state.obstacles {
                                prop_assert!(!removed.contains(&o.id));
                            }
                            for id in before {
                                if !state.obstacles.iter().any(|o| o.id == id) {
                                    removed.insert(id);
                                }
                            }
                        }
                    }
                }
                prop_assert!(state.high_score >= high_score);
                high_score = state.high_score;
            }
        }

        #[test]
        fn prop_jump_rejected_while_airborne(seed in any::<u64>(), airborne_ticks in 1u32..30) {
            let mut state = GameState::with_tuning(seed, no_spawn());
            state.start();
            state.jump();
            for _ in 0..airborne_ticks {
                tick(&mut state);
            }
            prop_assume!(state.player.airborne);
            let vy = state.player.vy;
            prop_assert!(!state.jump());
            prop_assert_eq!(state.player.vy, vy);
        }
    }
}
