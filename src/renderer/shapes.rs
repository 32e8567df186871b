//! Shape generation for 2D primitives
//!
//! Everything on screen is built from colored quads in viewport coordinates
//! (600x800, y-up); the pipeline maps them to NDC.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::car_half_extents;
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Half-width of the asphalt band
const ROAD_HALF_WIDTH: f32 = 220.0;
/// Lane boundary x-positions (between the four lane centers)
const LANE_BOUNDARIES: [f32; 3] = [200.0, 300.0, 400.0];
/// Dash geometry for lane markings
const DASH_PERIOD: f32 = 80.0;
const DASH_HALF: Vec2 = Vec2::new(4.0, 20.0);

fn push_rect(vertices: &mut Vec<Vertex>, center: Vec2, half: Vec2, color: [f32; 4]) {
    let (l, r) = (center.x - half.x, center.x + half.x);
    let (b, t) = (center.y - half.y, center.y + half.y);

    vertices.push(Vertex::new(l, b, color));
    vertices.push(Vertex::new(r, b, color));
    vertices.push(Vertex::new(r, t, color));

    vertices.push(Vertex::new(r, t, color));
    vertices.push(Vertex::new(l, t, color));
    vertices.push(Vertex::new(l, b, color));
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(center: Vec2, half: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_rect(&mut vertices, center, half, color);
    vertices
}

/// Generate vertices for one road segment centered at `center_y`: asphalt,
/// edge lines, and the dashed lane markings that scroll with the segment.
pub fn road_segment(center_y: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let center_x = VIEW_WIDTH / 2.0;
    let half_h = VIEW_HEIGHT / 2.0;

    push_rect(
        &mut vertices,
        Vec2::new(center_x, center_y),
        Vec2::new(ROAD_HALF_WIDTH, half_h),
        colors::ROAD,
    );

    // Solid edge lines
    for edge_x in [
        center_x - ROAD_HALF_WIDTH + 4.0,
        center_x + ROAD_HALF_WIDTH - 4.0,
    ] {
        push_rect(
            &mut vertices,
            Vec2::new(edge_x, center_y),
            Vec2::new(4.0, half_h),
            colors::ROAD_EDGE,
        );
    }

    // Dashed boundaries between lanes
    let dashes = (VIEW_HEIGHT / DASH_PERIOD) as u32;
    let bottom = center_y - half_h;
    for boundary_x in LANE_BOUNDARIES {
        for i in 0..dashes {
            let dash_y = bottom + DASH_PERIOD / 2.0 + i as f32 * DASH_PERIOD;
            push_rect(
                &mut vertices,
                Vec2::new(boundary_x, dash_y),
                DASH_HALF,
                colors::LANE_MARKING,
            );
        }
    }

    vertices
}

/// Generate vertices for a car: body plus windshield and rear window
pub fn car(center: Vec2, scale: f32, body: [f32; 4], glass: [f32; 4]) -> Vec<Vertex> {
    let half = car_half_extents(scale);
    let mut vertices = Vec::with_capacity(18);

    push_rect(&mut vertices, center, half, body);
    push_rect(
        &mut vertices,
        center + Vec2::new(0.0, half.y * 0.35),
        Vec2::new(half.x * 0.7, half.y * 0.2),
        glass,
    );
    push_rect(
        &mut vertices,
        center - Vec2::new(0.0, half.y * 0.55),
        Vec2::new(half.x * 0.7, half.y * 0.12),
        glass,
    );

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_two_triangles_with_the_right_extents() {
        let vertices = rect(Vec2::new(10.0, 20.0), Vec2::new(3.0, 4.0), colors::ROAD);
        assert_eq!(vertices.len(), 6);

        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 7.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 13.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 16.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 24.0);
    }

    #[test]
    fn car_stays_inside_its_bounding_box() {
        let center = Vec2::new(300.0, 100.0);
        let half = car_half_extents(0.5);
        for v in car(center, 0.5, colors::PLAYER_BODY, colors::PLAYER_GLASS) {
            assert!((v.position[0] - center.x).abs() <= half.x);
            assert!((v.position[1] - center.y).abs() <= half.y);
        }
    }

    #[test]
    fn road_segment_covers_the_full_segment_height() {
        let vertices = road_segment(VIEW_HEIGHT / 2.0);
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), VIEW_HEIGHT);
    }
}
