//! Sling Dot - a pointer-driven slingshot physics toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pointer tracking, gravity integration)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven physics and presentation tunables

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{GroundMode, Tuning};

use glam::Vec2;

/// Toy configuration constants
pub mod consts {
    /// Upper bound on a single frame's elapsed time (milliseconds).
    /// A stalled tab must not produce one giant integration step.
    pub const MAX_STEP_MS: f32 = 1000.0 / 30.0;

    /// Player dot radius in pixels
    pub const DOT_RADIUS: f32 = 12.0;
    /// Pointer ring radius in pixels
    pub const POINTER_RING_RADIUS: f32 = 50.0;
    /// Pointer ring stroke width in pixels
    pub const POINTER_RING_WIDTH: f32 = 4.0;
    /// Grid line spacing in world units
    pub const GRID_SPACING: f32 = 1.0;
    /// Circle tessellation segments
    pub const CIRCLE_SEGMENTS: u32 = 48;
}

/// Convert a world-space position to screen pixels given the follow camera
/// and viewport size. The camera sits at the viewport center.
#[inline]
pub fn world_to_screen(world: Vec2, camera: Vec2, world_scale: f32, viewport: Vec2) -> Vec2 {
    (world - camera) * world_scale + viewport / 2.0
}

/// Inverse of [`world_to_screen`].
#[inline]
pub fn screen_to_world(screen: Vec2, camera: Vec2, world_scale: f32, viewport: Vec2) -> Vec2 {
    (screen - viewport / 2.0) / world_scale + camera
}
