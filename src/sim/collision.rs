//! Collision detection and response
//!
//! Everything collides as circles. Resolution runs in a fixed order each
//! tick: player shots vs enemies, enemy shots vs player, enemy hulls vs
//! player.

use glam::Vec2;

use super::projectile::create_explosion;
use super::state::{GameEvent, GameMode, SimulationState, palette};
use crate::consts::*;

/// Two circles touch or overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let r = a_radius + b_radius;
    a.distance_squared(b) <= r * r
}

/// Run all collision passes for one tick
pub fn resolve_collisions(state: &mut SimulationState) {
    player_bullets_vs_enemies(state);
    enemy_bullets_vs_player(state);
    enemy_hulls_vs_player(state);
}

/// Newest shots resolve first; each shot hits at most one enemy
fn player_bullets_vs_enemies(state: &mut SimulationState) {
    let mut spent = vec![false; state.player_bullets.len()];

    for bi in (0..state.player_bullets.len()).rev() {
        let shot = state.player_bullets[bi].pos;
        let target = state
            .enemies
            .iter()
            .rposition(|e| circles_overlap(shot, BULLET_RADIUS, e.pos, e.radius()));

        if let Some(ei) = target {
            spent[bi] = true;
            hit_enemy(state, ei);
        }
    }

    let mut spent = spent.into_iter();
    state
        .player_bullets
        .retain(|_| !spent.next().unwrap_or(false));
}

/// Apply one point of damage to enemy `index`
fn hit_enemy(state: &mut SimulationState, index: usize) {
    let enemy = &mut state.enemies[index];
    enemy.hp = enemy.hp.saturating_sub(1);

    if enemy.hp == 0 {
        let enemy = state.enemies.remove(index);
        let spec = enemy.kind.spec();
        create_explosion(state, enemy.pos, spec.color, spec.death_particles);
        state.score += spec.score;
        if enemy.state.is_attacking() {
            state.active_divers = state.active_divers.saturating_sub(1);
        }
        state.events.push(GameEvent::EnemyDestroyed {
            id: enemy.id,
            points: spec.score,
        });
    } else {
        let (id, pos) = (enemy.id, enemy.pos);
        create_explosion(state, pos, palette::HIT_SPARK, 4);
        state.score += HIT_BONUS;
        state.events.push(GameEvent::EnemyDamaged {
            id,
            points: HIT_BONUS,
        });
    }
}

/// At most one enemy shot connects per tick
fn enemy_bullets_vs_player(state: &mut SimulationState) {
    let player = state.player.pos;
    let hit = state
        .enemy_bullets
        .iter()
        .rposition(|b| circles_overlap(b.pos, BULLET_RADIUS, player, PLAYER_RADIUS));

    if let Some(bi) = hit {
        state.enemy_bullets.remove(bi);
        damage_player(state);
    }
}

/// Ramming hurts the player only; the enemy flies on untouched
fn enemy_hulls_vs_player(state: &mut SimulationState) {
    let player = state.player.pos;
    let rammer = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .find(|&pos| circles_overlap(pos, ENEMY_BODY_RADIUS, player, PLAYER_RADIUS));

    if let Some(pos) = rammer {
        create_explosion(state, pos, palette::RAM, 10);
        damage_player(state);
    }
}

/// Cost the player a life, unless shielded by invulnerability or not playing
pub fn damage_player(state: &mut SimulationState) {
    if state.player.is_invulnerable() || state.mode != GameMode::Playing {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    let pos = state.player.pos;
    create_explosion(state, pos, palette::PLAYER, 18);
    state.enemy_bullets.clear();
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives == 0 {
        state.mode = GameMode::GameOver;
        state.hi_score = state.hi_score.max(state.score);
        log::info!("Game over: score {} on level {}", state.score, state.level);
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        return;
    }

    state.player.reset();
}
