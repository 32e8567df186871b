//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::road::RoadScroll;
use super::spawner::TrafficSpawner;
use crate::car_half_extents;
use crate::consts::*;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Title screen, waiting for the confirm key
    Menu,
    /// Active run
    Playing,
    /// Run ended on a collision; the crash frame stays on screen
    GameOver,
}

/// One-shot events emitted by the simulation for the platform layer
/// (audio cues, HUD updates). Drained by the driver every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Confirm/restart key accepted on a menu screen
    MenuClick,
    /// A fresh run started; the ambient engine loop should start
    RunStarted,
    /// One or more obstacles left the viewport this tick (single cue
    /// regardless of how many passed at once)
    ObstaclesPassed,
    /// Player collided with an obstacle; the run is over
    Crashed,
}

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Horizontal velocity in pixels per tick
    pub vel_x: f32,
}

impl Player {
    /// Fresh player at the start position, standing still
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(VIEW_WIDTH / 2.0, PLAYER_START_Y),
            vel_x: 0.0,
        }
    }

    /// Bounding box for collision
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, car_half_extents(PLAYER_SCALE))
    }
}

/// An oncoming obstacle car
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (negative = toward the player)
    pub vel_y: f32,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, vel_y: f32) -> Self {
        Self { id, pos, vel_y }
    }

    /// Bounding box for collision
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, car_half_extents(OBSTACLE_SCALE))
    }

    /// Top edge y-coordinate; once this drops below 0 the obstacle has
    /// fully left the viewport
    #[inline]
    pub fn top(&self) -> f32 {
        self.aabb().top()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed (drives lane choice)
    pub seed: u64,
    /// Session RNG
    pub rng: Pcg32,
    /// Current mode
    pub mode: GameMode,
    /// Obstacles dodged this run
    pub score: u32,
    /// Current obstacle fall speed (constant in this design, held as state
    /// so it can vary)
    pub obstacle_speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player car
    pub player: Player,
    /// Scrolling road background
    pub road: RoadScroll,
    /// Obstacle spawner and its live collection
    pub traffic: TrafficSpawner,
    /// Events produced since the driver last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu, with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Menu,
            score: 0,
            obstacle_speed: BASE_OBSTACLE_SPEED,
            time_ticks: 0,
            player: Player::spawn(),
            road: RoadScroll::new(),
            traffic: TrafficSpawner::new(),
            events: Vec::new(),
        }
    }

    /// (Re)start a run: full reset of everything except the RNG and the
    /// tick counter. Used for both Menu->Playing and GameOver->Playing.
    pub fn start_run(&mut self) {
        self.score = 0;
        self.obstacle_speed = BASE_OBSTACLE_SPEED;
        self.player = Player::spawn();
        self.road = RoadScroll::new();
        self.traffic.clear();
        self.mode = GameMode::Playing;
    }

    /// Drain pending events for the platform layer
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_in_menu() {
        let state = GameState::new(7);
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.score, 0);
        assert!(state.traffic.obstacles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn start_run_resets_session_state() {
        let mut state = GameState::new(7);
        state.score = 42;
        state.player.pos.x = 130.0;
        state.player.vel_x = -PLAYER_SPEED;
        state
            .traffic
            .obstacles
            .push(Obstacle::new(1, Vec2::new(150.0, 400.0), -5.0));
        state.road.advance(250.0);

        state.start_run();

        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::spawn());
        assert!(state.traffic.obstacles.is_empty());
        assert_eq!(state.road, RoadScroll::new());
    }

    #[test]
    fn take_events_drains() {
        let mut state = GameState::new(7);
        state.events.push(GameEvent::MenuClick);
        state.events.push(GameEvent::RunStarted);

        let events = state.take_events();
        assert_eq!(events, vec![GameEvent::MenuClick, GameEvent::RunStarted]);
        assert!(state.events.is_empty());
    }
}
