//! Single-contact pointer state machine
//!
//! Tracks at most one active contact at a time and classifies it as `Down`
//! (touched, not yet moved) or `Drag` (moved at least once). Multi-touch
//! beyond the first contact is rejected. The tracked id must match the
//! hardware-assigned contact identifier for the contact's whole lifetime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// State of the one active contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pointer {
    /// Contact touched down and has not moved yet
    Down { id: i32, position: Vec2 },
    /// Contact has moved; `origin` is frozen at the down position
    Drag {
        id: i32,
        origin: Vec2,
        position: Vec2,
    },
}

impl Pointer {
    pub fn id(&self) -> i32 {
        match *self {
            Pointer::Down { id, .. } | Pointer::Drag { id, .. } => id,
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            Pointer::Down { position, .. } | Pointer::Drag { position, .. } => position,
        }
    }
}

/// Tracks the lifecycle of a single contact: `None -> Down -> Drag -> None`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointerTracker {
    active: Option<Pointer>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently tracked contact, if any
    pub fn active(&self) -> Option<&Pointer> {
        self.active.as_ref()
    }

    /// Handle a down event. Returns `false` when a contact is already
    /// tracked; the new contact is ignored and the tracked one unaffected.
    pub fn on_down(&mut self, id: i32, position: Vec2) -> bool {
        debug_assert!(position.is_finite());
        if let Some(active) = &self.active {
            debug_assert!(active.id() != id, "contact id reused before release");
            return false;
        }
        self.active = Some(Pointer::Down { id, position });
        true
    }

    /// Handle a move event. The first matching move promotes `Down` to
    /// `Drag` with `origin` set to the down position; there is no movement
    /// threshold, a zero-length move still promotes. Later matching moves
    /// update `position` only. Moves for other ids are filtered out.
    pub fn on_move(&mut self, id: i32, position: Vec2) {
        debug_assert!(position.is_finite());
        let Some(active) = &mut self.active else {
            // Listeners are only attached while a contact is tracked, so a
            // move with no active contact means the boundary wiring is wrong.
            debug_assert!(false, "move event with no tracked contact");
            return;
        };
        if active.id() != id {
            return;
        }
        *active = match *active {
            Pointer::Down { id, position: prev } => Pointer::Drag {
                id,
                origin: prev,
                position,
            },
            Pointer::Drag { id, origin, .. } => Pointer::Drag {
                id,
                origin,
                position,
            },
        };
    }

    /// Handle an up/cancel/leave event. Clears the tracked contact and
    /// returns its final state so the caller can read `origin`/`position`
    /// before it is gone. Releases for other ids are filtered out.
    pub fn on_release(&mut self, id: i32) -> Option<Pointer> {
        let Some(active) = &self.active else {
            debug_assert!(false, "release event with no tracked contact");
            return None;
        };
        if active.id() != id {
            return None;
        }
        self.active.take()
    }
}
