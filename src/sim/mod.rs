//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod road;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit, hits, overlaps};
pub use road::RoadScroll;
pub use spawner::TrafficSpawner;
pub use state::{GameEvent, GameMode, GameState, Obstacle, Player};
pub use tick::{Key, key_down, key_up, tick};
