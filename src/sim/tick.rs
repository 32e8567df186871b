//! Per-tick session update and edge-triggered input handling
//!
//! The driver feeds key transitions into `key_down`/`key_up` as they arrive
//! and calls `tick` once per fixed timestep. Mode transitions happen in
//! exactly three places: confirm (Menu), collision (Playing), restart
//! (GameOver).

use super::collision::first_hit;
use super::state::{GameEvent, GameMode, GameState};
use crate::consts::*;

/// Logical input keys, already mapped from physical key codes by the
/// platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Confirm,
    Restart,
}

/// Handle a key press. Steering only applies while Playing; confirm and
/// restart only fire on their respective screens.
pub fn key_down(state: &mut GameState, key: Key) {
    match state.mode {
        GameMode::Menu => {
            if key == Key::Confirm {
                state.events.push(GameEvent::MenuClick);
                state.start_run();
                state.events.push(GameEvent::RunStarted);
            }
        }
        GameMode::Playing => match key {
            Key::Left => state.player.vel_x = -PLAYER_SPEED,
            Key::Right => state.player.vel_x = PLAYER_SPEED,
            Key::Confirm | Key::Restart => {}
        },
        GameMode::GameOver => {
            if key == Key::Restart {
                state.events.push(GameEvent::MenuClick);
                state.start_run();
                state.events.push(GameEvent::RunStarted);
            }
        }
    }
}

/// Handle a key release. Releasing either steering key zeroes the player's
/// horizontal velocity even if the other steering key is still held - the
/// original behaves this way and intent is ambiguous, so it is kept as-is.
pub fn key_up(state: &mut GameState, key: Key) {
    if matches!(key, Key::Left | Key::Right) {
        state.player.vel_x = 0.0;
    }
}

/// Advance the session by one fixed timestep. No-op unless Playing.
pub fn tick(state: &mut GameState, dt: f32) {
    match state.mode {
        GameMode::Menu | GameMode::GameOver => return,
        GameMode::Playing => {}
    }

    state.time_ticks += 1;

    // Scroll the road
    state.road.advance(state.obstacle_speed);

    // Steer and clamp the player to the drivable band
    state.player.pos.x = (state.player.pos.x + state.player.vel_x)
        .clamp(PLAYER_MARGIN, VIEW_WIDTH - PLAYER_MARGIN);

    // Spawn and advance traffic; score the cars that got away. A burst of
    // simultaneous passes still produces a single audio cue.
    let passed = state
        .traffic
        .advance(dt, state.obstacle_speed, &mut state.rng);
    if passed > 0 {
        state.score += passed;
        state.events.push(GameEvent::ObstaclesPassed);
    }

    // Collision ends the run. Obstacles and player are left exactly where
    // they are: the frozen frame is the crash scene.
    if first_hit(&state.player.aabb(), &state.traffic.obstacles).is_some() {
        state.events.push(GameEvent::Crashed);
        state.mode = GameMode::GameOver;
    }
}
