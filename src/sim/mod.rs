//! Deterministic simulation module
//!
//! All toy logic lives here. This module must be pure and deterministic:
//! - Clamped variable timestep, no wall-clock reads
//! - Single-writer state owned by the frame loop
//! - No rendering or platform dependencies

pub mod pointer;
pub mod state;
pub mod step;

pub use pointer::{Pointer, PointerTracker};
pub use state::{Body, WorldState};
pub use step::{apply_release, step, time_dilation};
