//! Obstacle spawning and lifetime
//!
//! The spawner owns the live obstacle collection. Spawning is driven by
//! wall-clock time (not frame count), so the cadence is frame-rate
//! independent. Obstacles that have fully left the viewport are removed
//! the same tick and reported to the caller for scoring.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::consts::*;

/// Spawns, advances, and retires obstacle cars
#[derive(Debug, Clone)]
pub struct TrafficSpawner {
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Seconds accumulated since the last spawn
    pub spawn_timer: f32,
    /// Next obstacle ID
    next_id: u32,
}

impl Default for TrafficSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficSpawner {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            next_id: 1,
        }
    }

    /// Remove all obstacles and reset the spawn cadence. IDs keep counting
    /// up so no ID is ever reused within a session.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
    }

    /// Create one obstacle at a uniformly random lane, just above the
    /// visible area, falling at `speed`.
    fn spawn(&mut self, speed: f32, rng: &mut Pcg32) {
        let lane = LANES[rng.random_range(0..LANES.len())];
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(
            id,
            Vec2::new(lane, VIEW_HEIGHT + SPAWN_MARGIN),
            -speed,
        ));
    }

    /// Advance the spawner by one tick.
    ///
    /// Accumulates `dt` toward the spawn cadence, moves every obstacle by
    /// its velocity, and removes obstacles whose top edge has crossed below
    /// y=0. Returns how many were removed this tick.
    pub fn advance(&mut self, dt: f32, speed: f32, rng: &mut Pcg32) -> u32 {
        self.spawn_timer += dt;
        if self.spawn_timer >= SPAWN_INTERVAL {
            self.spawn(speed, rng);
            self.spawn_timer = 0.0;
        }

        for obstacle in &mut self.obstacles {
            obstacle.pos.y += obstacle.vel_y;
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.top() >= 0.0);
        (before - self.obstacles.len()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn spawns_on_first_tick_at_or_past_interval() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();

        // 0.5 is exact in binary, so the accumulated timer is too
        let dt = 0.5;
        assert_eq!(spawner.advance(dt, BASE_OBSTACLE_SPEED, &mut rng), 0);
        assert!(spawner.obstacles.is_empty(), "0.5s: below cadence");
        spawner.advance(dt, BASE_OBSTACLE_SPEED, &mut rng);
        assert!(spawner.obstacles.is_empty(), "1.0s: still below cadence");
        spawner.advance(dt, BASE_OBSTACLE_SPEED, &mut rng);
        assert_eq!(spawner.obstacles.len(), 1, "1.5s: past cadence");

        // Timer resets after the spawn
        assert!(spawner.spawn_timer < SPAWN_INTERVAL);
        assert_eq!(spawner.spawn_timer, 0.0);
    }

    #[test]
    fn spawned_obstacles_start_above_viewport_falling_down() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();
        spawner.advance(2.0, BASE_OBSTACLE_SPEED, &mut rng);

        let o = &spawner.obstacles[0];
        // One tick of movement is applied in the spawn tick itself
        assert_eq!(o.pos.y, VIEW_HEIGHT + SPAWN_MARGIN - BASE_OBSTACLE_SPEED);
        assert_eq!(o.vel_y, -BASE_OBSTACLE_SPEED);
    }

    #[test]
    fn spawned_lanes_are_members_of_the_lane_set() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();
        for _ in 0..200 {
            spawner.advance(2.0, 0.0, &mut rng);
        }
        assert_eq!(spawner.obstacles.len(), 200);
        for o in &spawner.obstacles {
            assert!(LANES.contains(&o.pos.x), "off-lane spawn at x={}", o.pos.x);
        }
    }

    #[test]
    fn exited_obstacle_is_counted_once_and_removed() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();

        // Top edge at 4.0: one tick at speed 5 pushes it below zero
        spawner
            .obstacles
            .push(Obstacle::new(99, Vec2::new(150.0, -46.0), -BASE_OBSTACLE_SPEED));

        // dt=0 keeps the cadence from spawning replacements
        assert_eq!(spawner.advance(0.0, BASE_OBSTACLE_SPEED, &mut rng), 1);
        assert!(spawner.obstacles.is_empty());

        // Never re-enters or double-counts
        assert_eq!(spawner.advance(0.0, BASE_OBSTACLE_SPEED, &mut rng), 0);
        assert!(spawner.obstacles.is_empty());
    }

    #[test]
    fn obstacle_with_top_edge_exactly_at_zero_survives() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();

        let half_height = crate::car_half_extents(OBSTACLE_SCALE).y;
        // After one tick of movement the top edge lands exactly on y=0
        spawner.obstacles.push(Obstacle::new(
            7,
            Vec2::new(250.0, -half_height + BASE_OBSTACLE_SPEED),
            -BASE_OBSTACLE_SPEED,
        ));

        assert_eq!(spawner.advance(0.0, BASE_OBSTACLE_SPEED, &mut rng), 0);
        assert_eq!(spawner.obstacles.len(), 1);
        assert_eq!(spawner.obstacles[0].top(), 0.0);
    }

    #[test]
    fn live_obstacles_stay_within_vertical_bounds() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();
        for _ in 0..2_000 {
            spawner.advance(SIM_DT, BASE_OBSTACLE_SPEED, &mut rng);
            for o in &spawner.obstacles {
                assert!(o.top() >= 0.0);
                assert!(o.pos.y <= VIEW_HEIGHT + SPAWN_MARGIN);
            }
        }
    }

    #[test]
    fn clear_resets_collection_and_cadence_but_not_ids() {
        let mut spawner = TrafficSpawner::new();
        let mut rng = rng();
        spawner.advance(2.0, BASE_OBSTACLE_SPEED, &mut rng);
        let first_id = spawner.obstacles[0].id;

        spawner.clear();
        assert!(spawner.obstacles.is_empty());
        assert_eq!(spawner.spawn_timer, 0.0);

        spawner.advance(2.0, BASE_OBSTACLE_SPEED, &mut rng);
        assert!(spawner.obstacles[0].id > first_id);
    }

    proptest! {
        #[test]
        fn lane_membership_holds_for_any_seed(seed: u64) {
            let mut spawner = TrafficSpawner::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..50 {
                spawner.advance(2.0, 0.0, &mut rng);
            }
            for o in &spawner.obstacles {
                prop_assert!(LANES.contains(&o.pos.x));
            }
        }
    }
}
