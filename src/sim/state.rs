//! World state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pointer::PointerTracker;

/// The player point mass. Created once at startup, mutated every frame,
/// never destroyed during a session. Position is in world units with the
/// ground line at `y == 0` and +y pointing down-screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }
}

/// Complete toy state: one body, one pointer tracker, nothing else.
///
/// Both values are owned here and passed by reference into the input
/// handlers and the per-frame step, keeping a single writer for each.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub body: Body,
    pub pointer: PointerTracker,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow camera: always the body's current position. Derived on read,
    /// never stored, so it cannot drift from the body.
    pub fn camera(&self) -> Vec2 {
        self.body.pos
    }
}
