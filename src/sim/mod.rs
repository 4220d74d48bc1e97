//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable roster order (formation order, removals preserve it)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod enemy;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{circles_overlap, damage_player, resolve_collisions};
pub use enemy::{FormationSway, max_divers};
pub use snapshot::{HudView, RenderSnapshot, build_snapshot};
pub use state::{
    Bullet, Enemy, EnemyId, EnemyKind, EnemyState, GameEvent, GameMode, KindSpec, Particle,
    Player, Rgb, SimulationState, Star, palette,
};
pub use tick::{TickInput, start_game, tick};
pub use wave::{WAVE_SIZE, create_wave};
