//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`SimulationState`]; there are
//! no globals. Entity records are plain data, behavior lives in the sibling
//! modules.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Top-level mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the first start trigger
    Title,
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Simple RGB color; alpha is derived by the renderer from particle life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }
}

/// Explosion palette
pub mod palette {
    use super::Rgb;

    pub const GRUNT: Rgb = Rgb::hex(0x7efcff);
    pub const ESCORT: Rgb = Rgb::hex(0xff6f85);
    pub const BOSS: Rgb = Rgb::hex(0xffd76b);
    pub const MOTHERSHIP: Rgb = Rgb::hex(0xff38a1);
    /// Non-lethal hit
    pub const HIT_SPARK: Rgb = Rgb::hex(0xfffa9a);
    /// Enemy rammed the player
    pub const RAM: Rgb = Rgb::hex(0xff8ba5);
    /// Player ship destroyed
    pub const PLAYER: Rgb = Rgb::hex(0x8fe7ff);
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    Escort,
    Boss,
    Mothership,
}

/// Static per-archetype capabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub base_hp: u8,
    pub score: u64,
    /// Radius used for player-bullet hits
    pub radius: f32,
    /// Particle count on destruction
    pub death_particles: usize,
    pub color: Rgb,
}

const GRUNT_SPEC: KindSpec = KindSpec {
    base_hp: 1,
    score: 80,
    radius: 12.0,
    death_particles: 12,
    color: palette::GRUNT,
};

const ESCORT_SPEC: KindSpec = KindSpec {
    base_hp: 1,
    score: 150,
    radius: 12.0,
    death_particles: 12,
    color: palette::ESCORT,
};

const BOSS_SPEC: KindSpec = KindSpec {
    base_hp: 2,
    score: 300,
    radius: 14.0,
    death_particles: 12,
    color: palette::BOSS,
};

const MOTHERSHIP_SPEC: KindSpec = KindSpec {
    base_hp: 4,
    score: 500,
    radius: 18.0,
    death_particles: 20,
    color: palette::MOTHERSHIP,
};

impl EnemyKind {
    pub fn spec(self) -> &'static KindSpec {
        match self {
            EnemyKind::Grunt => &GRUNT_SPEC,
            EnemyKind::Escort => &ESCORT_SPEC,
            EnemyKind::Boss => &BOSS_SPEC,
            EnemyKind::Mothership => &MOTHERSHIP_SPEC,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Grunt => "grunt",
            EnemyKind::Escort => "escort",
            EnemyKind::Boss => "boss",
            EnemyKind::Mothership => "mothership",
        }
    }

    /// Hit points at spawn for the given level (bosses toughen from level 4)
    pub fn hp_for_level(self, level: u32) -> u8 {
        let bonus = u8::from(self == EnemyKind::Boss && level >= 4);
        self.spec().base_hp + bonus
    }
}

/// Stable enemy identity within a wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId {
    pub kind: EnemyKind,
    pub row: u8,
    pub index: u8,
    pub level: u32,
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.kind.as_str(),
            self.row,
            self.index,
            self.level
        )
    }
}

/// Enemy behavior state with its state-local progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Holding position in the swaying formation
    Formation,
    /// Scripted attack run; `t` in [0, 1] over `duration` seconds
    Diving { t: f32, duration: f32, entry: Vec2 },
    /// Eased flight from `from` back to the live formation slot
    Returning { t: f32, from: Vec2 },
}

impl EnemyState {
    /// Diving or returning enemies count against the concurrent attacker cap
    pub fn is_attacking(&self) -> bool {
        !matches!(self, EnemyState::Formation)
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub hp: u8,
    pub pos: Vec2,
    /// Formation anchor
    pub home: Vec2,
    pub row: u8,
    pub state: EnemyState,
    /// Lateral bias of the dive, always ±1
    pub curve: f32,
    pub fire_cooldown: f32,
}

impl Enemy {
    pub fn radius(&self) -> f32 {
        self.kind.spec().radius
    }

    /// Formation sway is damped for deeper rows
    pub fn lane_factor(&self) -> f32 {
        1.0 - self.row as f32 * 0.07
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Sprite width and height
    pub size: Vec2,
    pub speed: f32,
    pub cooldown: f32,
    pub invuln: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Player::start_pos(),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            cooldown: 0.0,
            invuln: 0.0,
        }
    }
}

impl Player {
    pub fn start_pos() -> Vec2 {
        Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_START_Y_OFFSET)
    }

    /// Back to the launch point with a fresh invulnerability window
    pub fn reset(&mut self) {
        self.pos = Player::start_pos();
        self.cooldown = 0.0;
        self.invuln = RESPAWN_INVULN;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0.0
    }

    /// Blinks at 12 Hz while invulnerable
    pub fn is_visible(&self) -> bool {
        !(self.invuln > 0.0 && ((self.invuln * 12.0).floor() as i64) % 2 == 0)
    }
}

/// A projectile from either side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Explosion debris (cosmetic, never collides)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    /// Seconds at spawn
    pub ttl: f32,
    pub color: Rgb,
}

impl Particle {
    /// Remaining life in [0, 1]
    pub fn normalized_life(&self) -> f32 {
        if self.ttl <= 0.0 {
            return 0.0;
        }
        crate::clamp(self.life / self.ttl, 0.0, 1.0)
    }
}

/// Background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub size: u8,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { level: u32 },
    DiveStarted { id: EnemyId },
    EnemyDamaged { id: EnemyId, points: u64 },
    EnemyDestroyed { id: EnemyId, points: u64 },
    PlayerHit { lives_left: u8 },
    GameOver { score: u64, level: u32 },
    HighScoreRaised { score: u64 },
}

/// Complete simulation state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub mode: GameMode,
    pub score: u64,
    pub hi_score: u64,
    pub level: u32,
    pub lives: u8,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// Enemies currently diving or returning
    pub active_divers: u32,
    /// Drives the formation sway
    pub formation_time: f32,
    /// Particle cap (0 disables explosions)
    pub max_particles: usize,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl SimulationState {
    /// Fresh title-screen state with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            mode: GameMode::Title,
            score: 0,
            hi_score: 0,
            level: 1,
            lives: STARTING_LIVES,
            player: Player::default(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            active_divers: 0,
            formation_time: 0.0,
            max_particles: settings.max_particles(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.seed_stars(settings.star_count());
        state
    }

    fn seed_stars(&mut self, count: usize) {
        let rng = &mut self.rng;
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * FIELD_WIDTH,
                    rng.random::<f32>() * FIELD_HEIGHT,
                ),
                speed: 0.2 + rng.random::<f32>() * 1.4,
                size: if rng.random::<f32>() < 0.85 { 1 } else { 2 },
            })
            .collect();
        self.stars = stars;
    }

    /// Bernoulli trial with probability `p` (values above 1 always succeed)
    pub fn chance(&mut self, p: f32) -> bool {
        self.rng.random::<f32>() < p
    }

    /// Uniform sample in [min, max)
    pub fn random_between(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.random::<f32>() * (max - min)
    }

    /// Recount attackers by walking the roster (the counter is authoritative
    /// during play; this is for checks)
    pub fn count_attackers(&self) -> u32 {
        self.enemies.iter().filter(|e| e.state.is_attacking()).count() as u32
    }

    /// Take all events recorded since the previous drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table() {
        assert_eq!(EnemyKind::Grunt.spec().score, 80);
        assert_eq!(EnemyKind::Escort.spec().score, 150);
        assert_eq!(EnemyKind::Boss.spec().score, 300);
        assert_eq!(EnemyKind::Mothership.spec().score, 500);
        assert_eq!(EnemyKind::Mothership.spec().death_particles, 20);
        assert_eq!(EnemyKind::Boss.spec().radius, 14.0);
    }

    #[test]
    fn test_boss_hp_scales_at_level_four() {
        assert_eq!(EnemyKind::Boss.hp_for_level(3), 2);
        assert_eq!(EnemyKind::Boss.hp_for_level(4), 3);
        assert_eq!(EnemyKind::Mothership.hp_for_level(9), 4);
        assert_eq!(EnemyKind::Grunt.hp_for_level(9), 1);
    }

    #[test]
    fn test_enemy_id_display() {
        let id = EnemyId {
            kind: EnemyKind::Escort,
            row: 2,
            index: 5,
            level: 7,
        };
        assert_eq!(id.to_string(), "escort-2-5-7");
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::hex(0x8fe7ff), Rgb { r: 0x8f, g: 0xe7, b: 0xff });
    }

    #[test]
    fn test_player_size_is_full_sprite() {
        let player = Player::default();
        assert_eq!(player.size, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT));
    }

    #[test]
    fn test_player_blink() {
        let mut player = Player::default();
        assert!(player.is_visible());
        // floor(0.05 * 12) = 0 -> hidden
        player.invuln = 0.05;
        assert!(!player.is_visible());
        // floor(0.1 * 12) = 1 -> shown
        player.invuln = 0.1;
        assert!(player.is_visible());
    }

    #[test]
    fn test_new_state_is_title() {
        let state = SimulationState::new(7);
        assert_eq!(state.mode, GameMode::Title);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.enemies.is_empty());
        assert!(state.stars.iter().all(|s| s.size == 1 || s.size == 2));
    }

    #[test]
    fn test_particle_normalized_life() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.2,
            ttl: 0.4,
            color: palette::PLAYER,
        };
        assert!((p.normalized_life() - 0.5).abs() < 1e-6);
    }
}
