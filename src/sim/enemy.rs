//! Enemy behavior state machine
//!
//! Formation -> Diving -> Returning -> Formation. Enemies are independent
//! except for the shared `active_divers` gate, which caps how many can be
//! out of formation at once.
//!
//! All random triggers are per-tick Bernoulli trials with probability
//! `dt * rate`, so behavior is independent of frame rate.

use std::f32::consts::PI;

use glam::Vec2;

use super::projectile::spawn_enemy_bullet;
use super::state::{Enemy, EnemyState, GameEvent, SimulationState};
use crate::consts::*;
use crate::{clamp, ease_in_out, lerp};

/// Fraction of the dive spent on the opening swing
const SWING_END: f32 = 0.22;
/// Fraction of the dive at which the sweep ends and the exit drift begins
const SWEEP_END: f32 = 0.82;

/// Shared formation offset for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSway {
    pub x_wave: f32,
    pub y_wave: f32,
}

impl FormationSway {
    /// Sway at formation time `time`; amplitude grows with level
    pub fn at(time: f32, level: u32) -> Self {
        let amplitude = 54.0 + (level as f32 * 3.0).min(36.0);
        Self {
            x_wave: time.sin() * amplitude,
            y_wave: (time * 2.1).sin() * 7.0,
        }
    }

    /// Where the enemy's formation slot currently is (without the personal bob)
    pub fn slot(&self, enemy: &Enemy) -> Vec2 {
        Vec2::new(
            enemy.home.x + self.x_wave * enemy.lane_factor(),
            enemy.home.y + self.y_wave,
        )
    }
}

/// Concurrent attacker cap for a level
pub fn max_divers(level: u32) -> u32 {
    (1 + level / 2).min(4)
}

/// Seconds a full dive takes; harder levels dive faster
pub fn dive_duration(level: u32) -> f32 {
    2.9 - (level as f32 * 0.08).min(0.9)
}

/// Formation clock speed multiplier
pub fn formation_rate(level: u32) -> f32 {
    0.85 + level as f32 * 0.05
}

/// Per-second rate at which a formation enemy peels off
pub fn dive_rate(level: u32) -> f32 {
    0.11 + level as f32 * 0.017
}

/// Per-second rate at which a ready formation enemy fires
pub fn formation_fire_rate(level: u32) -> f32 {
    1.2 + level as f32 * 0.05
}

/// Per-second rate at which a ready diver fires
pub const DIVE_FIRE_RATE: f32 = 3.8;

/// Position along the dive path at progress `t`.
///
/// The final drift phase is incremental in x, so it needs the current
/// position and the tick's `dt`.
pub fn dive_position(entry: Vec2, curve: f32, t: f32, current: Vec2, dt: f32) -> Vec2 {
    if t < SWING_END {
        let u = t / SWING_END;
        Vec2::new(
            entry.x + curve * 150.0 * (u * PI * 0.5).sin(),
            entry.y + 130.0 * u + (u * PI).sin() * 16.0,
        )
    } else if t < SWEEP_END {
        let u = (t - SWING_END) / (SWEEP_END - SWING_END);
        Vec2::new(
            entry.x + curve * (170.0 * (u * PI * 1.25).cos() + 70.0 * (u * PI * 2.1).sin()),
            entry.y + 130.0 + (FIELD_HEIGHT - entry.y + 110.0) * u,
        )
    } else {
        let u = (t - SWEEP_END) / (1.0 - SWEEP_END);
        Vec2::new(
            current.x + curve * 30.0 * (1.0 - u) * dt * 5.5,
            lerp(FIELD_HEIGHT + 10.0, FIELD_HEIGHT + 75.0, clamp(u, 0.0, 1.0)),
        )
    }
}

/// Send a formation enemy on an attack run
pub fn start_dive(state: &mut SimulationState, index: usize) {
    let duration = dive_duration(state.level);
    let enemy = &mut state.enemies[index];
    enemy.state = EnemyState::Diving {
        t: 0.0,
        duration,
        entry: enemy.pos,
    };
    // Swing toward the middle of the field
    enemy.curve = if enemy.pos.x < FIELD_WIDTH / 2.0 { 1.0 } else { -1.0 };
    let id = enemy.id;

    state.active_divers += 1;
    log::debug!("{} dives ({} active)", id, state.active_divers);
    state.events.push(GameEvent::DiveStarted { id });
}

/// End a dive: head home from wherever the enemy is now.
/// Still counts as an active diver until it's back in formation.
pub fn force_return(enemy: &mut Enemy) {
    enemy.state = EnemyState::Returning {
        t: 0.0,
        from: enemy.pos,
    };
}

/// Advance every enemy by one tick
pub fn update_enemies(state: &mut SimulationState, dt: f32) {
    let level = state.level;
    state.formation_time += dt * formation_rate(level);
    let sway = FormationSway::at(state.formation_time, level);
    let cap = max_divers(level);

    for i in 0..state.enemies.len() {
        state.enemies[i].fire_cooldown -= dt;

        match state.enemies[i].state {
            EnemyState::Formation => update_formation(state, i, &sway, cap, dt),
            EnemyState::Diving { .. } => update_diving(state, i, dt),
            EnemyState::Returning { .. } => update_returning(state, i, &sway, dt),
        }
    }
}

fn update_formation(
    state: &mut SimulationState,
    i: usize,
    sway: &FormationSway,
    cap: u32,
    dt: f32,
) {
    let level = state.level;
    let time = state.formation_time;
    let enemy = &mut state.enemies[i];
    let bob = (time * 3.0 + enemy.home.x * 0.03).sin() * 2.0;
    enemy.pos = sway.slot(enemy) + Vec2::new(0.0, bob);

    if state.active_divers < cap && state.chance(dt * dive_rate(level)) {
        start_dive(state, i);
    }

    let enemy = &state.enemies[i];
    let pos = enemy.pos;
    let ready = enemy.fire_cooldown <= 0.0
        && (state.player.pos.x - pos.x).abs() < FORMATION_FIRE_RANGE;
    if ready && state.chance(dt * formation_fire_rate(level)) {
        spawn_enemy_bullet(state, pos);
        let cooldown = state.random_between(1.1, 2.6);
        state.enemies[i].fire_cooldown = cooldown;
    }
}

fn update_diving(state: &mut SimulationState, i: usize, dt: f32) {
    let enemy = &mut state.enemies[i];
    let EnemyState::Diving { t, duration, entry } = enemy.state else {
        return;
    };
    let t = t + dt / duration;
    enemy.pos = dive_position(entry, enemy.curve, t, enemy.pos, dt);
    enemy.state = EnemyState::Diving { t, duration, entry };

    let pos = enemy.pos;
    if enemy.fire_cooldown <= 0.0 && state.chance(dt * DIVE_FIRE_RATE) {
        spawn_enemy_bullet(state, pos);
        let cooldown = state.random_between(0.35, 0.8);
        state.enemies[i].fire_cooldown = cooldown;
    }

    if t >= 1.0 {
        force_return(&mut state.enemies[i]);
    }
}

fn update_returning(state: &mut SimulationState, i: usize, sway: &FormationSway, dt: f32) {
    let enemy = &mut state.enemies[i];
    let EnemyState::Returning { t, from } = enemy.state else {
        return;
    };
    let t = t + dt / RETURN_DURATION;
    let u = clamp(t, 0.0, 1.0);

    // Chase the live slot so the merge is seamless while the formation sways
    let target = sway.slot(enemy);
    enemy.pos = from.lerp(target, ease_in_out(u));

    if u >= 1.0 {
        enemy.state = EnemyState::Formation;
        state.active_divers = state.active_divers.saturating_sub(1);
    } else {
        enemy.state = EnemyState::Returning { t, from };
    }
}
