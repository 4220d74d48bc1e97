//! Per-frame simulation tick
//!
//! Sequences one update: starfield and debris always, then (while playing)
//! player, projectiles, enemies, collisions, and wave-clear.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::enemy::update_enemies;
use super::projectile::{
    spawn_player_bullet, update_bullets, update_particles, update_stars,
};
use super::state::{GameEvent, GameMode, SimulationState};
use super::wave::create_wave;
use crate::clamp;
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Start/restart trigger; ignored while playing
    pub start: bool,
}

impl TickInput {
    /// Net horizontal direction; left and right together cancel out
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.move_left {
            axis -= 1.0;
        }
        if self.move_right {
            axis += 1.0;
        }
        axis
    }
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    // Cosmetics keep running on the title and game-over screens
    update_stars(state, dt);
    update_particles(state, dt);

    if input.start && state.mode != GameMode::Playing {
        start_game(state);
    }

    if state.mode == GameMode::Playing {
        update_player(state, input, dt);
        update_bullets(state, dt);
        update_enemies(state, dt);
        resolve_collisions(state);

        if state.enemies.is_empty() {
            state.level += 1;
            create_wave(state, state.level);
            state.player.invuln = WAVE_CLEAR_INVULN;
        }
    }

    if state.score > state.hi_score {
        state.hi_score = state.score;
        state.events.push(GameEvent::HighScoreRaised { score: state.score });
    }
}

/// Begin a fresh run from level 1
pub fn start_game(state: &mut SimulationState) {
    state.mode = GameMode::Playing;
    state.level = 1;
    state.score = 0;
    state.lives = STARTING_LIVES;
    state.player_bullets.clear();
    state.enemy_bullets.clear();
    state.particles.clear();
    state.formation_time = 0.0;
    state.player.reset();
    log::info!("New game started");
    create_wave(state, state.level);
}

/// Move, tick down timers, fire
pub fn update_player(state: &mut SimulationState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    player.pos.x += input.axis() * player.speed * dt;
    player.pos.x = clamp(player.pos.x, PLAYER_MARGIN, FIELD_WIDTH - PLAYER_MARGIN);

    if player.cooldown > 0.0 {
        player.cooldown -= dt;
    }
    if player.invuln > 0.0 {
        player.invuln -= dt;
    }

    if input.fire && player.cooldown <= 0.0 {
        player.cooldown = PLAYER_FIRE_COOLDOWN;
        spawn_player_bullet(state);
    }
}
