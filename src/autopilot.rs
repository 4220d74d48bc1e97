//! Attract-mode pilot
//!
//! Produces the same `TickInput` a human would, from nothing but the current
//! state. Used by the headless runner and for soak tests.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameMode, SimulationState, TickInput};

/// How far above the ship an incoming shot is worth dodging
const THREAT_LOOKAHEAD: f32 = 120.0;
/// Horizontal distance at which an incoming shot or diver is a threat
const THREAT_WIDTH: f32 = 28.0;
/// Close enough to the target to stop steering
const TRACK_DEADZONE: f32 = 6.0;
/// Close enough to the target to start shooting
const FIRE_WINDOW: f32 = 14.0;

/// Pick an input for this tick
pub fn autopilot_input(state: &SimulationState) -> TickInput {
    let mut input = TickInput::default();

    if state.mode != GameMode::Playing {
        input.start = true;
        return input;
    }

    let ship = state.player.pos;

    if let Some(threat) = nearest_threat(state, ship) {
        // Step away from it, unless the wall is in the way
        let mut go_left = threat.x >= ship.x;
        if go_left && ship.x <= PLAYER_MARGIN + 1.0 {
            go_left = false;
        } else if !go_left && ship.x >= FIELD_WIDTH - PLAYER_MARGIN - 1.0 {
            go_left = true;
        }
        input.move_left = go_left;
        input.move_right = !go_left;
        input.fire = true;
        return input;
    }

    let target = state
        .enemies
        .iter()
        .min_by(|a, b| {
            (a.pos.x - ship.x)
                .abs()
                .partial_cmp(&(b.pos.x - ship.x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos.x);

    if let Some(x) = target {
        let dx = x - ship.x;
        input.move_left = dx < -TRACK_DEADZONE;
        input.move_right = dx > TRACK_DEADZONE;
        input.fire = dx.abs() < FIRE_WINDOW;
    }

    input
}

/// Closest incoming shot or diving hull about to reach the ship
fn nearest_threat(state: &SimulationState, ship: Vec2) -> Option<Vec2> {
    let in_lane = |pos: Vec2| {
        (pos.x - ship.x).abs() < THREAT_WIDTH
            && pos.y > ship.y - THREAT_LOOKAHEAD
            && pos.y < ship.y + 10.0
    };

    let shots = state.enemy_bullets.iter().map(|b| b.pos);
    let divers = state
        .enemies
        .iter()
        .filter(|e| e.state.is_attacking())
        .map(|e| e.pos);

    shots
        .chain(divers)
        .filter(|&pos| in_lane(pos))
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
}
