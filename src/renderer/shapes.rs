//! Shape generation and scene assembly for 2D primitives
//!
//! All vertices are produced in screen-space pixels; the pipeline converts
//! to NDC at upload time. Keeping this on the CPU makes the whole scene
//! testable without a GPU.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{
    CIRCLE_SEGMENTS, DOT_RADIUS, GRID_SPACING, POINTER_RING_RADIUS, POINTER_RING_WIDTH,
};
use crate::sim::{Pointer, WorldState};
use crate::tuning::Tuning;
use crate::world_to_screen;

/// Generate vertices for a line segment of the given pixel width
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    vec![
        Vertex::at(a + perp, color),
        Vertex::at(a - perp, color),
        Vertex::at(b + perp, color),
        Vertex::at(b + perp, color),
        Vertex::at(a - perp, color),
        Vertex::at(b - perp, color),
    ]
}

fn unit(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Fan triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + unit(theta1) * radius, color));
        vertices.push(Vertex::at(center + unit(theta2) * radius, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + unit(theta1) * inner_radius;
        let outer1 = center + unit(theta1) * outer_radius;
        let inner2 = center + unit(theta2) * inner_radius;
        let outer2 = center + unit(theta2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

/// Grid lines covering the viewport, aligned to world units and offset by
/// the follow camera so the grid scrolls under the fixed dot.
fn grid(camera: Vec2, world_scale: f32, viewport: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let half = viewport / (2.0 * world_scale);

    let x0 = ((camera.x - half.x) / GRID_SPACING).floor() as i32;
    let x1 = ((camera.x + half.x) / GRID_SPACING).ceil() as i32;
    for i in x0..=x1 {
        let sx = world_to_screen(
            Vec2::new(i as f32 * GRID_SPACING, 0.0),
            camera,
            world_scale,
            viewport,
        )
        .x;
        vertices.extend(line(
            Vec2::new(sx, 0.0),
            Vec2::new(sx, viewport.y),
            1.0,
            colors::GRID,
        ));
    }

    let y0 = ((camera.y - half.y) / GRID_SPACING).floor() as i32;
    let y1 = ((camera.y + half.y) / GRID_SPACING).ceil() as i32;
    for i in y0..=y1 {
        let sy = world_to_screen(
            Vec2::new(0.0, i as f32 * GRID_SPACING),
            camera,
            world_scale,
            viewport,
        )
        .y;
        vertices.extend(line(
            Vec2::new(0.0, sy),
            Vec2::new(viewport.x, sy),
            1.0,
            colors::GRID,
        ));
    }

    vertices
}

/// Assemble the full frame: grid, ground line, player dot, pointer overlay.
///
/// World geometry goes through the camera transform; the pointer overlay is
/// drawn at the raw contact coordinates, which are already screen pixels.
pub fn scene(world: &WorldState, tuning: &Tuning, viewport: Vec2) -> Vec<Vertex> {
    let camera = world.camera();
    let scale = tuning.world_scale;
    let mut vertices = Vec::new();

    if tuning.show_grid {
        vertices.extend(grid(camera, scale, viewport));
    }

    // Ground line at world y = 0
    let ground_y = world_to_screen(Vec2::ZERO, camera, scale, viewport).y;
    vertices.extend(line(
        Vec2::new(0.0, ground_y),
        Vec2::new(viewport.x, ground_y),
        2.0,
        colors::GROUND,
    ));

    // Player dot (the camera follows it, so this is the viewport center)
    let dot = world_to_screen(world.body.pos, camera, scale, viewport);
    vertices.extend(circle(dot, DOT_RADIUS, colors::DOT, CIRCLE_SEGMENTS));

    match world.pointer.active() {
        Some(&Pointer::Down { position, .. }) => {
            vertices.extend(ring(
                position,
                POINTER_RING_RADIUS - POINTER_RING_WIDTH,
                POINTER_RING_RADIUS,
                colors::POINTER_RING,
                CIRCLE_SEGMENTS,
            ));
        }
        Some(&Pointer::Drag {
            origin, position, ..
        }) => {
            vertices.extend(line(origin, position, 2.0, colors::RUBBER_BAND));
            vertices.extend(ring(
                position,
                POINTER_RING_RADIUS - POINTER_RING_WIDTH,
                POINTER_RING_RADIUS,
                colors::POINTER_RING,
                CIRCLE_SEGMENTS,
            ));
        }
        None => {}
    }

    vertices
}
