//! Scripted demo player
//!
//! Jumps whenever a block enters the reaction window in front of the
//! runner. Good enough to clear every demo-sized obstacle at demo speed.

use super::obstacles::Obstacle;
use super::player::Player;
use crate::tuning::Span;

/// Should the demo player jump this tick?
pub fn wants_jump(player: &Player, obstacles: &[Obstacle], window: Span) -> bool {
    player.is_grounded() && nearest_threat(obstacles, window).is_some()
}

/// First obstacle whose left edge is strictly inside the reaction window
pub fn nearest_threat(obstacles: &[Obstacle], window: Span) -> Option<&Obstacle> {
    obstacles
        .iter()
        .find(|o| o.x > window.min && o.x < window.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn window() -> Span {
        Tuning::default().reaction_window
    }

    #[test]
    fn test_jumps_for_block_in_window() {
        let obstacles = vec![Obstacle::new(1, 120.0, 30.0, 40.0)];
        assert!(wants_jump(&Player::default(), &obstacles, window()));
    }

    #[test]
    fn test_ignores_blocks_outside_window() {
        let far = vec![Obstacle::new(1, 400.0, 30.0, 40.0)];
        let passed = vec![Obstacle::new(2, 20.0, 30.0, 40.0)];
        let edge = vec![Obstacle::new(3, 150.0, 30.0, 40.0)];
        assert!(!wants_jump(&Player::default(), &far, window()));
        assert!(!wants_jump(&Player::default(), &passed, window()));
        assert!(!wants_jump(&Player::default(), &edge, window()));
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut player = Player::default();
        player.try_jump(-14.0);
        let obstacles = vec![Obstacle::new(1, 120.0, 30.0, 40.0)];
        assert!(!wants_jump(&player, &obstacles, window()));
    }

    #[test]
    fn test_picks_first_in_window() {
        let obstacles = vec![
            Obstacle::new(1, 10.0, 30.0, 40.0),
            Obstacle::new(2, 60.0, 30.0, 40.0),
            Obstacle::new(3, 140.0, 30.0, 40.0),
        ];
        assert_eq!(nearest_threat(&obstacles, window()).map(|o| o.id), Some(2));
    }
}
