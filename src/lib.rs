//! Star Strike - formation-and-dive arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemy AI, projectiles, collisions, game state)
//! - `session`: Frame driver tying the simulation to high score storage
//! - `persistence`: High score storage backends
//! - `settings`: Cosmetic preferences (particle and starfield density)
//! - `autopilot`: Attract-mode input generator

pub mod autopilot;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::PersistenceError;
pub use highscores::HighScore;
pub use session::Session;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Largest delta the frame driver will feed a single tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Player ship
    pub const PLAYER_START_Y_OFFSET: f32 = 56.0;
    pub const PLAYER_WIDTH: f32 = 26.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    pub const PLAYER_SPEED: f32 = 290.0;
    pub const PLAYER_MARGIN: f32 = 20.0;
    pub const PLAYER_RADIUS: f32 = 11.0;
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.15;
    /// Invulnerability after respawn or new game
    pub const RESPAWN_INVULN: f32 = 2.0;
    /// Invulnerability granted when a new wave rolls in
    pub const WAVE_CLEAR_INVULN: f32 = 1.25;
    pub const STARTING_LIVES: u8 = 3;

    /// Projectiles
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const PLAYER_BULLET_SPEED: f32 = 510.0;
    pub const ENEMY_BULLET_BASE_SPEED: f32 = 170.0;
    pub const ENEMY_BULLET_SPEED_PER_LEVEL: f32 = 14.0;
    /// Fraction of bullet speed spent on horizontal aim
    pub const ENEMY_BULLET_AIM: f32 = 0.35;

    /// Body-contact radius used for enemy vs player ramming
    pub const ENEMY_BODY_RADIUS: f32 = 13.0;

    /// Points for a hit that doesn't destroy
    pub const HIT_BONUS: u64 = 35;

    /// Wave layout
    pub const LANE_SPACING: f32 = 44.0;
    pub const ROW_PITCH: f32 = 48.0;
    pub const FORMATION_TOP: f32 = 86.0;
    pub const ROW_SHIFT: f32 = 12.0;

    /// Dive/return timing
    pub const RETURN_DURATION: f32 = 1.15;
    pub const FORMATION_FIRE_RANGE: f32 = 150.0;

    /// Starfield
    pub const STAR_COUNT: usize = 120;
    pub const STAR_SCROLL: f32 = 46.0;

    /// Particle damping applied once per tick
    pub const PARTICLE_DAMPING: f32 = 0.97;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothstep easing: t²(3 - 2t)
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Clamp `v` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics; `min` wins when the bounds cross.
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert!((lerp(10.0, 20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out_shape() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        // Slow start
        assert!(ease_in_out(0.1) < 0.1);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.3, 0.0, 1.0), 0.3);
        // Crossed bounds don't panic
        assert_eq!(clamp(0.5, 2.0, 1.0), 2.0);
    }
}
