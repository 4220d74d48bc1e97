//! Wave generation
//!
//! Every level uses the same five-row roster; only boss toughness and the
//! ids change with the level number.

use glam::Vec2;

use super::state::{Enemy, EnemyId, EnemyKind, EnemyState, GameEvent, SimulationState};
use crate::consts::*;

/// One formation row: archetype, ship count, horizontal shift in lanes
struct RowLayout {
    kind: EnemyKind,
    count: u8,
    shift: f32,
}

const ROWS: [RowLayout; 5] = [
    RowLayout { kind: EnemyKind::Boss, count: 4, shift: 0.0 },
    RowLayout { kind: EnemyKind::Escort, count: 6, shift: 0.0 },
    RowLayout { kind: EnemyKind::Escort, count: 6, shift: 1.0 },
    RowLayout { kind: EnemyKind::Grunt, count: 8, shift: 0.0 },
    RowLayout { kind: EnemyKind::Mothership, count: 1, shift: 0.0 },
];

/// Number of ships in every wave
pub const WAVE_SIZE: usize = 25;

/// Replace the roster with a fresh formation for `level`
pub fn create_wave(state: &mut SimulationState, level: u32) {
    state.enemies.clear();
    state.active_divers = 0;

    let mut y = FORMATION_TOP;
    for (row_index, row) in ROWS.iter().enumerate() {
        let total_width = (row.count - 1) as f32 * LANE_SPACING;
        let start_x = FIELD_WIDTH / 2.0 - total_width / 2.0;

        for i in 0..row.count {
            let home = Vec2::new(start_x + i as f32 * LANE_SPACING + row.shift * ROW_SHIFT, y);
            let fire_cooldown = state.random_between(0.0, 0.8);

            state.enemies.push(Enemy {
                id: EnemyId {
                    kind: row.kind,
                    row: row_index as u8,
                    index: i,
                    level,
                },
                kind: row.kind,
                hp: row.kind.hp_for_level(level),
                pos: home,
                home,
                row: row_index as u8,
                state: EnemyState::Formation,
                curve: if i % 2 == 0 { -1.0 } else { 1.0 },
                fire_cooldown,
            });
        }

        y += ROW_PITCH;
    }

    log::info!("Wave {} generated: {} ships", level, state.enemies.len());
    state.events.push(GameEvent::WaveStarted { level });
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_wave_roster_shape() {
        let mut state = SimulationState::new(1);
        create_wave(&mut state, 1);

        assert_eq!(state.enemies.len(), WAVE_SIZE);
        assert_eq!(state.active_divers, 0);
        assert!(state.enemies.iter().all(|e| e.state == EnemyState::Formation));

        let count = |kind| state.enemies.iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(EnemyKind::Boss), 4);
        assert_eq!(count(EnemyKind::Escort), 12);
        assert_eq!(count(EnemyKind::Grunt), 8);
        assert_eq!(count(EnemyKind::Mothership), 1);
    }

    #[test]
    fn test_ids_unique() {
        let mut state = SimulationState::new(2);
        create_wave(&mut state, 5);
        let ids: HashSet<_> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), WAVE_SIZE);
        let names: HashSet<_> = state.enemies.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(names.len(), WAVE_SIZE);
    }

    #[test]
    fn test_rows_centered_and_stacked() {
        let mut state = SimulationState::new(3);
        create_wave(&mut state, 1);

        // Unshifted boss row is centered on the field
        let bosses: Vec<_> = state.enemies.iter().filter(|e| e.row == 0).collect();
        let mean_x = bosses.iter().map(|e| e.home.x).sum::<f32>() / bosses.len() as f32;
        assert!((mean_x - FIELD_WIDTH / 2.0).abs() < 1e-3);
        assert!(bosses.iter().all(|e| e.home.y == FORMATION_TOP));

        // Second escort row sits one shift to the right of the first
        let first = state.enemies.iter().find(|e| e.row == 1).unwrap();
        let second = state.enemies.iter().find(|e| e.row == 2).unwrap();
        assert!((second.home.x - first.home.x - ROW_SHIFT).abs() < 1e-3);
        assert!((second.home.y - first.home.y - ROW_PITCH).abs() < 1e-3);

        let mothership = state
            .enemies
            .iter()
            .find(|e| e.kind == EnemyKind::Mothership)
            .unwrap();
        assert_eq!(mothership.home, Vec2::new(FIELD_WIDTH / 2.0, FORMATION_TOP + 4.0 * ROW_PITCH));
        assert_eq!(mothership.hp, 4);
    }

    #[test]
    fn test_boss_toughens_at_level_four() {
        let mut state = SimulationState::new(4);
        create_wave(&mut state, 3);
        assert!(state.enemies.iter().filter(|e| e.kind == EnemyKind::Boss).all(|e| e.hp == 2));
        create_wave(&mut state, 4);
        assert!(state.enemies.iter().filter(|e| e.kind == EnemyKind::Boss).all(|e| e.hp == 3));
    }

    #[test]
    fn test_initial_fire_cooldown_range() {
        let mut state = SimulationState::new(5);
        create_wave(&mut state, 1);
        assert!(state
            .enemies
            .iter()
            .all(|e| (0.0..0.8).contains(&e.fire_cooldown)));
    }

    #[test]
    fn test_new_wave_resets_divers() {
        let mut state = SimulationState::new(6);
        create_wave(&mut state, 1);
        state.active_divers = 3;
        create_wave(&mut state, 2);
        assert_eq!(state.active_divers, 0);
        assert!(state.enemies.iter().all(|e| e.id.level == 2));
    }

    proptest! {
        #[test]
        fn prop_every_level_has_full_roster(seed in any::<u64>(), level in 1u32..200) {
            let mut state = SimulationState::new(seed);
            create_wave(&mut state, level);
            prop_assert_eq!(state.enemies.len(), WAVE_SIZE);
            let ids: HashSet<_> = state.enemies.iter().map(|e| e.id).collect();
            prop_assert_eq!(ids.len(), WAVE_SIZE);
            prop_assert!(state.enemies.iter().all(|e| e.state == EnemyState::Formation && e.hp >= 1));
        }
    }
}
