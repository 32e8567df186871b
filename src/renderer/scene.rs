//! Frame assembly: build the vertex list for the current game state
//!
//! Rendering is a pure function of state. The menu draws no world geometry
//! (title and prompt text live in DOM overlays); Playing and GameOver both
//! draw the frozen or live road, traffic, and player.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{OBSTACLE_SCALE, PLAYER_SCALE};
use crate::sim::{GameMode, GameState};

/// Build the full vertex list for one frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    match state.mode {
        GameMode::Menu => {}
        GameMode::Playing | GameMode::GameOver => {
            for segment_y in state.road.segment_y {
                vertices.extend(shapes::road_segment(segment_y));
            }
            for obstacle in &state.traffic.obstacles {
                vertices.extend(shapes::car(
                    obstacle.pos,
                    OBSTACLE_SCALE,
                    colors::ENEMY_BODY,
                    colors::ENEMY_GLASS,
                ));
            }
            // Player last so it draws on top of anything it crashed into
            vertices.extend(shapes::car(
                state.player.pos,
                PLAYER_SCALE,
                colors::PLAYER_BODY,
                colors::PLAYER_GLASS,
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Key, key_down, tick};

    #[test]
    fn menu_renders_no_world_geometry() {
        let state = GameState::new(1);
        assert!(build_scene(&state).is_empty());
    }

    #[test]
    fn playing_renders_road_and_player() {
        let mut state = GameState::new(1);
        key_down(&mut state, Key::Confirm);
        assert!(!build_scene(&state).is_empty());
    }

    #[test]
    fn game_over_keeps_drawing_the_crash_frame() {
        let mut state = GameState::new(1);
        key_down(&mut state, Key::Confirm);
        state.traffic.obstacles.push(crate::sim::Obstacle::new(
            1,
            state.player.pos,
            -crate::consts::BASE_OBSTACLE_SPEED,
        ));
        tick(&mut state, 0.0);
        assert_eq!(state.mode, GameMode::GameOver);

        let frame = build_scene(&state);
        // Road (2 segments) + one obstacle + player
        assert!(!frame.is_empty());
        let with_cars = frame.len();
        state.traffic.obstacles.clear();
        assert!(build_scene(&state).len() < with_cars);
    }
}
