//! Axis-aligned bounding-box collision queries
//!
//! All sprites in the game are upright rectangles, so collision detection
//! reduces to center/half-extent AABB overlap tests: one box against a
//! collection, returning the intersecting subset.

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned bounding box, center-based
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Top edge y-coordinate (y-up)
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Bottom edge y-coordinate (y-up)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }
}

/// Whether two boxes overlap (touching edges do not count)
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    (a.center.x - b.center.x).abs() < a.half.x + b.half.x
        && (a.center.y - b.center.y).abs() < a.half.y + b.half.y
}

/// Indices of all obstacles whose bounding box overlaps `probe`
pub fn hits(probe: &Aabb, obstacles: &[Obstacle]) -> Vec<usize> {
    obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| overlaps(probe, &o.aabb()))
        .map(|(i, _)| i)
        .collect()
}

/// First obstacle overlapping `probe`, if any
pub fn first_hit(probe: &Aabb, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| overlaps(probe, &o.aabb()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle::new(0, Vec2::new(x, y), -5.0)
    }

    #[test]
    fn overlapping_boxes_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(15.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(25.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!overlaps(&a, &b));

        // Separated on y only
        let c = Aabb::new(Vec2::new(0.0, 30.0), Vec2::new(10.0, 10.0));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn hits_returns_intersecting_subset() {
        let probe = Aabb::new(Vec2::new(300.0, 100.0), Vec2::new(30.0, 50.0));
        let obstacles = vec![
            obstacle_at(300.0, 100.0), // dead center
            obstacle_at(150.0, 700.0), // far away
            obstacle_at(320.0, 140.0), // overlapping
        ];

        assert_eq!(hits(&probe, &obstacles), vec![0, 2]);
        assert_eq!(first_hit(&probe, &obstacles), Some(0));
    }

    #[test]
    fn no_hit_on_empty_collection() {
        let probe = Aabb::new(Vec2::new(300.0, 100.0), Vec2::new(30.0, 50.0));
        assert!(hits(&probe, &[]).is_empty());
        assert_eq!(first_hit(&probe, &[]), None);
    }
}
