//! Frame drawing
//!
//! `draw` is a pure read of the game state: it never mutates simulation
//! fields, so it can run any number of times per tick.

use super::canvas::{Canvas2d, TextAlign, TextStyle};
use super::color::{Color, palette};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameMode, GameState, Obstacle, Particle};
use crate::wrap;

const PARTICLE_SIZE: f32 = 4.0;
const STAR_SIZE: f32 = 2.0;
const DASH_WIDTH: f32 = 20.0;
const DASH_HEIGHT: f32 = 4.0;
const STUD_RADIUS: f32 = 3.0;

const HUD_FONT: TextStyle = TextStyle {
    font: "bold 16px monospace",
    color: palette::TEXT,
    align: TextAlign::Left,
};
const BEST_FONT: TextStyle = TextStyle {
    color: palette::ACCENT,
    ..HUD_FONT
};
const TITLE_FONT: TextStyle = TextStyle {
    font: "bold 32px sans-serif",
    color: palette::TEXT,
    align: TextAlign::Center,
};
const HINT_FONT: TextStyle = TextStyle {
    font: "16px sans-serif",
    color: palette::ACCENT,
    align: TextAlign::Center,
};

/// Draw one complete frame
pub fn draw(state: &GameState, settings: &Settings, canvas: &mut impl Canvas2d) {
    canvas.set_alpha(1.0);
    draw_background(state, settings, canvas);
    draw_ground(state, canvas);

    if settings.particles {
        for particle in &state.particles {
            draw_particle(particle, canvas);
        }
        canvas.set_alpha(1.0);
    }

    for obstacle in &state.obstacles {
        draw_obstacle(obstacle, canvas);
    }

    if settings.quality.detailed_sprites() {
        draw_runner(PLAYER_X, state.player.y, canvas);
    } else {
        canvas.fill_rect(
            PLAYER_X,
            state.player.y,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
            palette::SHIRT,
        );
    }

    match state.mode {
        GameMode::Playing if settings.show_hud => draw_hud(state, canvas),
        GameMode::GameOver => draw_game_over(state, canvas),
        _ => {}
    }
}

fn draw_background(state: &GameState, settings: &Settings, canvas: &mut impl Canvas2d) {
    canvas.fill_vertical_gradient(
        0.0,
        0.0,
        WORLD_WIDTH,
        WORLD_HEIGHT,
        palette::SKY_TOP,
        palette::SKY_BOTTOM,
    );

    let scroll = if settings.reduced_motion {
        0.0
    } else {
        state.world_scroll * STAR_PARALLAX
    };
    let band = (GROUND_Y - 20.0).max(1.0);
    for i in 0..settings.star_count() {
        let x = wrap(i as f32 * 47.0 - scroll, WORLD_WIDTH);
        let y = (i as f32 * 23.0) % band;
        canvas.fill_rect(x, y, STAR_SIZE, STAR_SIZE, palette::STAR);
    }
}

fn draw_ground(state: &GameState, canvas: &mut impl Canvas2d) {
    canvas.fill_rect(
        0.0,
        GROUND_Y,
        WORLD_WIDTH,
        WORLD_HEIGHT - GROUND_Y,
        palette::GROUND,
    );

    let offset = wrap(state.world_scroll, GROUND_TILE);
    let mut x = -offset;
    while x < WORLD_WIDTH {
        canvas.fill_rect(x, GROUND_Y, DASH_WIDTH, DASH_HEIGHT, palette::GROUND_DASH);
        x += GROUND_TILE;
    }
}

fn draw_particle(particle: &Particle, canvas: &mut impl Canvas2d) {
    canvas.set_alpha(particle.opacity());
    canvas.fill_rect(
        particle.pos.x,
        particle.pos.y,
        PARTICLE_SIZE,
        PARTICLE_SIZE,
        Color::from_hsl(particle.color),
    );
}

/// Red block with two studs on top
fn draw_obstacle(obstacle: &Obstacle, canvas: &mut impl Canvas2d) {
    let top = GROUND_Y - obstacle.height;
    canvas.fill_rect(obstacle.x, top, obstacle.width, obstacle.height, palette::OBSTACLE);

    let spacing = obstacle.width / 2.0;
    for i in 0..2 {
        canvas.fill_circle(
            obstacle.x + spacing / 2.0 + i as f32 * spacing,
            top - STUD_RADIUS,
            STUD_RADIUS,
            palette::OBSTACLE_STUD,
        );
    }
}

/// Blocky character anchored at the top-left of the player box
fn draw_runner(x: f32, y: f32, canvas: &mut impl Canvas2d) {
    // Head
    canvas.fill_round_rect(x + 3.0, y - 18.0, 24.0, 22.0, 4.0, palette::SKIN);
    // Eyes, brows, mouth
    canvas.fill_circle(x + 10.0, y - 8.0, 3.0, palette::FACE);
    canvas.fill_circle(x + 20.0, y - 8.0, 3.0, palette::FACE);
    canvas.fill_rect(x + 6.0, y - 15.0, 8.0, 2.0, palette::FACE);
    canvas.fill_rect(x + 16.0, y - 15.0, 8.0, 2.0, palette::FACE);
    canvas.fill_rect(x + 10.0, y - 2.0, 10.0, 2.0, palette::FACE);
    // Torso
    canvas.fill_round_rect(x, y + 4.0, 30.0, 26.0, 3.0, palette::SHIRT);
    // Arms
    canvas.fill_round_rect(x - 6.0, y + 6.0, 8.0, 22.0, 2.0, palette::SKIN);
    canvas.fill_round_rect(x + 28.0, y + 6.0, 8.0, 22.0, 2.0, palette::SKIN);
    // Legs
    canvas.fill_round_rect(x + 2.0, y + 30.0, 11.0, 14.0, 2.0, palette::PANTS);
    canvas.fill_round_rect(x + 17.0, y + 30.0, 11.0, 14.0, 2.0, palette::PANTS);
}

fn draw_hud(state: &GameState, canvas: &mut impl Canvas2d) {
    canvas.fill_text(&format!("Score: {}", state.score), 20.0, 30.0, HUD_FONT);
    if state.high_score > 0 {
        canvas.fill_text(&format!("Best: {}", state.high_score), 20.0, 50.0, BEST_FONT);
    }
}

fn draw_game_over(state: &GameState, canvas: &mut impl Canvas2d) {
    canvas.fill_rect(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT, palette::VEIL);

    let cx = WORLD_WIDTH / 2.0;
    let cy = WORLD_HEIGHT / 2.0;
    canvas.fill_text("GAME OVER", cx, cy - 20.0, TITLE_FONT);
    canvas.fill_text(&format!("Score: {}", state.score), cx, cy + 15.0, HINT_FONT);
    canvas.fill_text("Click or press Space to restart", cx, cy + 45.0, HINT_FONT);
}
