//! Lane Rush - a vertical-scrolling lane-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound effects and the ambient engine loop
//! - `settings`: User preferences
//! - `highscores`: Best-runs leaderboard

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the original arcade feel)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions (y-up, origin at bottom-left)
    pub const VIEW_WIDTH: f32 = 600.0;
    pub const VIEW_HEIGHT: f32 = 800.0;

    /// Fixed lane center x-positions
    pub const LANES: [f32; 4] = [150.0, 250.0, 350.0, 450.0];

    /// Player defaults
    pub const PLAYER_SCALE: f32 = 0.5;
    pub const PLAYER_START_Y: f32 = 100.0;
    /// Horizontal speed in pixels per tick
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Horizontal clamp inset from each screen edge
    pub const PLAYER_MARGIN: f32 = 120.0;

    /// Obstacle defaults
    pub const OBSTACLE_SCALE: f32 = 0.5;
    /// Base fall speed in pixels per tick
    pub const BASE_OBSTACLE_SPEED: f32 = 5.0;
    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 1.2;
    /// Obstacles spawn this far above the top edge of the viewport
    pub const SPAWN_MARGIN: f32 = 150.0;

    /// Unscaled car sprite extents (player and obstacles share the same art size)
    pub const CAR_BASE_WIDTH: f32 = 120.0;
    pub const CAR_BASE_HEIGHT: f32 = 200.0;
}

/// Half-extents of a car's bounding box at the given sprite scale
#[inline]
pub fn car_half_extents(scale: f32) -> Vec2 {
    Vec2::new(
        consts::CAR_BASE_WIDTH * scale / 2.0,
        consts::CAR_BASE_HEIGHT * scale / 2.0,
    )
}
