//! Read-only render view of the simulation
//!
//! Everything a presentation layer needs to draw one frame. Building a
//! snapshot never mutates the state.

use glam::Vec2;
use serde::Serialize;

use super::state::{EnemyKind, GameMode, Rgb, SimulationState};

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub stars: Vec<StarView>,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<Vec2>,
    pub enemy_bullets: Vec<Vec2>,
    pub particles: Vec<ParticleView>,
    pub hud: HudView,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StarView {
    pub pos: Vec2,
    pub size: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    /// False on the off-beat of the invulnerability blink
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub kind: EnemyKind,
    /// More than one hit left; drawn with a shield ring
    pub armored: bool,
    pub attacking: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: Rgb,
    /// Fades out with remaining life
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudView {
    pub score: u64,
    pub hi_score: u64,
    pub level: u32,
    pub lives: u8,
    pub mode: GameMode,
}

impl HudView {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            score: state.score,
            hi_score: state.hi_score,
            level: state.level,
            lives: state.lives,
            mode: state.mode,
        }
    }
}

/// Build a snapshot of the current frame
pub fn build_snapshot(state: &SimulationState) -> RenderSnapshot {
    RenderSnapshot {
        stars: state
            .stars
            .iter()
            .map(|s| StarView {
                pos: s.pos,
                size: s.size,
            })
            .collect(),
        player: PlayerView {
            pos: state.player.pos,
            size: state.player.size,
            visible: state.player.is_visible(),
        },
        enemies: state
            .enemies
            .iter()
            .map(|e| EnemyView {
                pos: e.pos,
                kind: e.kind,
                armored: e.hp > 1,
                attacking: e.state.is_attacking(),
            })
            .collect(),
        player_bullets: state.player_bullets.iter().map(|b| b.pos).collect(),
        enemy_bullets: state.enemy_bullets.iter().map(|b| b.pos).collect(),
        particles: state
            .particles
            .iter()
            .map(|p| ParticleView {
                pos: p.pos,
                color: p.color,
                alpha: p.normalized_life(),
            })
            .collect(),
        hud: HudView::from_state(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Particle, palette};
    use crate::sim::wave::{WAVE_SIZE, create_wave};

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = SimulationState::new(3);
        state.mode = GameMode::Playing;
        create_wave(&mut state, 4);
        state.score = 1234;
        state.hi_score = 5000;
        state.level = 4;

        let snap = build_snapshot(&state);
        assert_eq!(snap.enemies.len(), WAVE_SIZE);
        assert_eq!(snap.stars.len(), state.stars.len());
        assert_eq!(
            snap.hud,
            HudView {
                score: 1234,
                hi_score: 5000,
                level: 4,
                lives: state.lives,
                mode: GameMode::Playing,
            }
        );

        // Bosses at level 4 and the mothership carry extra hit points
        let armored = snap.enemies.iter().filter(|e| e.armored).count();
        assert_eq!(armored, 5);
    }

    #[test]
    fn test_particle_alpha_follows_life() {
        let mut state = SimulationState::new(3);
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.25,
            ttl: 1.0,
            color: palette::HIT_SPARK,
        });
        let snap = build_snapshot(&state);
        assert!((snap.particles[0].alpha - 0.25).abs() < 1e-6);
        assert_eq!(snap.particles[0].color, palette::HIT_SPARK);
    }

    #[test]
    fn test_player_blinks_while_invulnerable() {
        let mut state = SimulationState::new(3);
        state.mode = GameMode::Playing;
        // floor(0.05 * 12) = 0: off-beat
        state.player.invuln = 0.05;
        assert!(!build_snapshot(&state).player.visible);
        // floor(0.1 * 12) = 1: on-beat
        state.player.invuln = 0.1;
        assert!(build_snapshot(&state).player.visible);

        // Only the blink hides the ship; it stays drawn after the run ends
        state.player.invuln = 0.0;
        state.mode = GameMode::GameOver;
        assert!(build_snapshot(&state).player.visible);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = SimulationState::new(8);
        let json = serde_json::to_value(build_snapshot(&state)).unwrap();
        assert_eq!(json["hud"]["mode"], "Title");
        assert_eq!(json["hud"]["level"], 1);
    }
}
