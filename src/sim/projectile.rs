//! Bullets, explosion particles and the starfield
//!
//! Spawning, straight-line advancement and culling. None of this looks at
//! collisions; see `collision.rs`.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::{Bullet, Particle, Rgb, SimulationState};
use crate::consts::*;

/// Fire a shot straight up from the ship's nose
pub fn spawn_player_bullet(state: &mut SimulationState) {
    let player = &state.player;
    state.player_bullets.push(Bullet {
        pos: Vec2::new(player.pos.x, player.pos.y - player.size.y / 2.0 - 4.0),
        vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
    });
}

/// Fire from `origin`, leaning toward where the player is right now.
/// The aim is fixed at spawn.
pub fn spawn_enemy_bullet(state: &mut SimulationState, origin: Vec2) {
    let to_player = state.player.pos - origin;
    let len = to_player.length();
    let aim_x = if len > 0.0 { to_player.x / len } else { 0.0 };
    let speed = ENEMY_BULLET_BASE_SPEED + state.level as f32 * ENEMY_BULLET_SPEED_PER_LEVEL;

    state.enemy_bullets.push(Bullet {
        pos: Vec2::new(origin.x, origin.y + 8.0),
        vel: Vec2::new(aim_x * speed * ENEMY_BULLET_AIM, speed),
    });
}

/// Burst of `amount` particles flying out from `pos`
pub fn create_explosion(state: &mut SimulationState, pos: Vec2, color: Rgb, amount: usize) {
    if state.max_particles == 0 {
        return;
    }

    for _ in 0..amount {
        let speed = state.random_between(30.0, 200.0);
        let angle = state.random_between(0.0, TAU);
        let life = state.random_between(0.35, 0.8);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            ttl: life,
            color,
        });
    }

    // Drop the oldest debris past the cap
    if state.particles.len() > state.max_particles {
        let excess = state.particles.len() - state.max_particles;
        state.particles.drain(..excess);
    }
}

/// Advance both bullet lists and cull anything off the playfield
pub fn update_bullets(state: &mut SimulationState, dt: f32) {
    state.player_bullets.retain_mut(|b| {
        b.pos += b.vel * dt;
        b.pos.y >= -16.0
    });

    state.enemy_bullets.retain_mut(|b| {
        b.pos += b.vel * dt;
        b.pos.y <= FIELD_HEIGHT + 16.0 && b.pos.x >= -20.0 && b.pos.x <= FIELD_WIDTH + 20.0
    });
}

/// Move, damp and age explosion debris
pub fn update_particles(state: &mut SimulationState, dt: f32) {
    state.particles.retain_mut(|p| {
        p.life -= dt;
        p.pos += p.vel * dt;
        p.vel *= PARTICLE_DAMPING;
        p.life > 0.0
    });
}

/// Scroll the starfield, recycling stars that fall off the bottom
pub fn update_stars(state: &mut SimulationState, dt: f32) {
    for i in 0..state.stars.len() {
        let star = &mut state.stars[i];
        star.pos.y += star.speed * STAR_SCROLL * dt;
        if star.pos.y > FIELD_HEIGHT + 2.0 {
            let x = state.random_between(0.0, FIELD_WIDTH);
            let star = &mut state.stars[i];
            star.pos = Vec2::new(x, -2.0);
        }
    }
}
