//! Per-frame physics integration
//!
//! Semi-implicit Euler for a single point mass under piecewise gravity,
//! with drag-driven time dilation and a release impulse. `dt` arrives in
//! wall-clock milliseconds and is clamped so a stalled tab cannot produce
//! one giant step.

use glam::Vec2;

use super::pointer::Pointer;
use super::state::{Body, WorldState};
use crate::consts::MAX_STEP_MS;
use crate::tuning::{GroundMode, Tuning};

/// Simulation-time scale for the current pointer state.
///
/// While dragging, the further the pointer is pulled from its origin the
/// slower simulation time runs, giving the player an aiming window. Exactly
/// 1 when no drag is active or the drag is within one world unit.
pub fn time_dilation(pointer: Option<&Pointer>, tuning: &Tuning) -> f32 {
    let Some(Pointer::Drag {
        origin, position, ..
    }) = pointer
    else {
        return 1.0;
    };
    let d = (*position - *origin) / tuning.world_scale;
    let len = d.length();
    if len <= 1.0 {
        1.0
    } else {
        len.powf(-tuning.time_dilation_exponent)
    }
}

/// Piecewise gravity toward the ground line at `y == 0`.
///
/// Rising away from the line decelerates with one constant, falling back
/// re-accelerates with another, so hang time is tunable on each side.
fn gravity(body: &Body, tuning: &Tuning) -> Vec2 {
    let toward_ground = if body.pos.y < 0.0 {
        1.0
    } else if body.pos.y > 0.0 {
        -1.0
    } else {
        return Vec2::ZERO;
    };

    // Moving away from the ground line uses the ascending constant.
    let ascending = body.vel.y * toward_ground < 0.0;
    let magnitude = if ascending {
        tuning.ascending_gravity
    } else {
        tuning.descending_gravity
    };
    Vec2::new(0.0, toward_ground * magnitude)
}

/// Advance the body by one frame.
///
/// Velocity integrates first, position second (symplectic order). A
/// non-finite or negative `dt` is a contract violation at the boundary.
pub fn step(world: &mut WorldState, dt_ms: f32, tuning: &Tuning) {
    debug_assert!(dt_ms.is_finite() && dt_ms >= 0.0, "bad dt: {dt_ms}");
    debug_assert!(world.body.pos.is_finite() && world.body.vel.is_finite());

    let dt = dt_ms.min(MAX_STEP_MS) / 1000.0;
    let scale = time_dilation(world.pointer.active(), tuning);
    let accel = gravity(&world.body, tuning);

    let body = &mut world.body;
    body.vel += accel * dt * scale;
    if body.vel != Vec2::ZERO {
        body.pos += body.vel * dt * scale;
    }

    if tuning.ground == GroundMode::HardFloor && body.pos.y > 0.0 {
        body.pos.y = 0.0;
        body.vel.y = body.vel.y.min(0.0);
    }
}

/// Apply the slingshot impulse for a released contact.
///
/// Additive: a body already moving keeps its prior momentum. A release
/// straight from `Down` (tap without movement) imparts nothing.
pub fn apply_release(body: &mut Body, released: &Pointer, tuning: &Tuning) {
    let Pointer::Drag {
        origin, position, ..
    } = released
    else {
        return;
    };
    let mut d = *position - *origin;
    d.x *= tuning.horizontal_damping;
    body.vel += -(d / tuning.world_scale) * tuning.drag_velocity_scale;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PointerTracker;

    fn test_tuning() -> Tuning {
        Tuning {
            world_scale: 50.0,
            ascending_gravity: 30.0,
            descending_gravity: 60.0,
            drag_velocity_scale: 8.0,
            horizontal_damping: 1.0,
            time_dilation_exponent: 0.8,
            ground: GroundMode::Restoring,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let tuning = test_tuning();
        let mut world = WorldState::new();
        world.body.pos = Vec2::new(3.0, -7.0);
        world.body.vel = Vec2::new(1.0, 2.0);
        let before = world.body;

        step(&mut world, 0.0, &tuning);
        assert_eq!(world.body, before);
    }

    #[test]
    fn test_ascending_gravity_arithmetic() {
        let tuning = test_tuning();
        let mut world = WorldState::new();
        world.body.pos = Vec2::new(0.0, -5.0);
        world.body.vel = Vec2::new(0.0, -2.0);

        step(&mut world, 16.6, &tuning);

        // Velocity first: decelerated by the ascending constant.
        let expected_vel = -2.0 + tuning.ascending_gravity * 16.6 / 1000.0;
        assert!((world.body.vel.y - expected_vel).abs() < 1e-5);
        // Position second, from the already-updated velocity.
        let expected_pos = -5.0 + expected_vel * 16.6 / 1000.0;
        assert!((world.body.pos.y - expected_pos).abs() < 1e-5);
    }

    #[test]
    fn test_falling_uses_descending_constant() {
        let tuning = test_tuning();
        let mut world = WorldState::new();
        world.body.pos = Vec2::new(0.0, -5.0);
        world.body.vel = Vec2::new(0.0, 3.0);

        step(&mut world, 10.0, &tuning);
        let expected_vel = 3.0 + tuning.descending_gravity * 10.0 / 1000.0;
        assert!((world.body.vel.y - expected_vel).abs() < 1e-5);
    }

    #[test]
    fn test_below_ground_gravity_is_mirrored() {
        let tuning = test_tuning();
        let mut world = WorldState::new();

        // Sinking deeper: decelerated upward with the ascending constant
        world.body.pos = Vec2::new(0.0, 4.0);
        world.body.vel = Vec2::new(0.0, 1.0);
        step(&mut world, 10.0, &tuning);
        let expected = 1.0 - tuning.ascending_gravity * 10.0 / 1000.0;
        assert!((world.body.vel.y - expected).abs() < 1e-5);

        // Returning up: re-accelerated with the descending constant
        world.body.pos = Vec2::new(0.0, 4.0);
        world.body.vel = Vec2::new(0.0, -1.0);
        step(&mut world, 10.0, &tuning);
        let expected = -1.0 - tuning.descending_gravity * 10.0 / 1000.0;
        assert!((world.body.vel.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_on_ground_line_no_acceleration() {
        let tuning = test_tuning();
        let mut world = WorldState::new();
        world.body.vel = Vec2::new(2.0, 0.0);

        step(&mut world, 16.0, &tuning);
        assert_eq!(world.body.vel, Vec2::new(2.0, 0.0));
        assert!((world.body.pos.x - 2.0 * 16.0 / 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_dt_clamped_on_stall() {
        let tuning = test_tuning();
        let mut stalled = WorldState::new();
        stalled.body.pos = Vec2::new(0.0, -5.0);
        stalled.body.vel = Vec2::new(0.0, -2.0);
        let mut clamped = stalled.clone();

        step(&mut stalled, 5000.0, &tuning);
        step(&mut clamped, MAX_STEP_MS, &tuning);

        assert_eq!(stalled.body, clamped.body);
    }

    #[test]
    fn test_release_impulse_opposes_drag() {
        let tuning = test_tuning();
        let mut body = Body::default();
        let released = Pointer::Drag {
            id: 0,
            origin: Vec2::ZERO,
            position: Vec2::new(100.0, 0.0),
        };

        apply_release(&mut body, &released, &tuning);

        // Rightward drag of two world units -> leftward impulse of 2k.
        let expected = -2.0 * tuning.drag_velocity_scale;
        assert!((body.vel.x - expected).abs() < 1e-5);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_release_impulse_is_additive() {
        let tuning = test_tuning();
        let mut body = Body::default();
        body.vel = Vec2::new(5.0, -3.0);
        let released = Pointer::Drag {
            id: 0,
            origin: Vec2::ZERO,
            position: Vec2::new(0.0, 100.0),
        };

        apply_release(&mut body, &released, &tuning);
        assert_eq!(body.vel.x, 5.0);
        assert!((body.vel.y - (-3.0 - 2.0 * tuning.drag_velocity_scale)).abs() < 1e-5);
    }

    #[test]
    fn test_release_from_down_imparts_nothing() {
        let tuning = test_tuning();
        let mut body = Body::default();
        let released = Pointer::Down {
            id: 0,
            position: Vec2::new(100.0, 100.0),
        };

        apply_release(&mut body, &released, &tuning);
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_horizontal_damping_reduces_x_only() {
        let mut tuning = test_tuning();
        tuning.horizontal_damping = 0.5;
        let mut body = Body::default();
        let released = Pointer::Drag {
            id: 0,
            origin: Vec2::ZERO,
            position: Vec2::new(100.0, 100.0),
        };

        apply_release(&mut body, &released, &tuning);
        assert!((body.vel.x - -1.0 * tuning.drag_velocity_scale).abs() < 1e-5);
        assert!((body.vel.y - -2.0 * tuning.drag_velocity_scale).abs() < 1e-5);
    }

    #[test]
    fn test_time_dilation_without_drag_is_one() {
        let tuning = test_tuning();
        assert_eq!(time_dilation(None, &tuning), 1.0);

        let down = Pointer::Down {
            id: 1,
            position: Vec2::new(300.0, 300.0),
        };
        assert_eq!(time_dilation(Some(&down), &tuning), 1.0);
    }

    #[test]
    fn test_time_dilation_slows_long_drags() {
        let tuning = test_tuning();

        // Within one world unit: no dilation
        let short = Pointer::Drag {
            id: 1,
            origin: Vec2::ZERO,
            position: Vec2::new(40.0, 0.0),
        };
        assert_eq!(time_dilation(Some(&short), &tuning), 1.0);

        // Beyond one world unit: strictly slower, monotonically so
        let long = Pointer::Drag {
            id: 1,
            origin: Vec2::ZERO,
            position: Vec2::new(150.0, 0.0),
        };
        let scale = time_dilation(Some(&long), &tuning);
        assert!(scale < 1.0);
        assert!((scale - 3.0f32.powf(-0.8)).abs() < 1e-5);

        let longer = Pointer::Drag {
            id: 1,
            origin: Vec2::ZERO,
            position: Vec2::new(400.0, 0.0),
        };
        assert!(time_dilation(Some(&longer), &tuning) < scale);
    }

    #[test]
    fn test_dilation_slows_integration() {
        let tuning = test_tuning();
        let mut dragged = WorldState::new();
        dragged.body.pos = Vec2::new(0.0, -5.0);
        dragged.body.vel = Vec2::new(0.0, -2.0);
        let mut free = dragged.clone();

        dragged.pointer.on_down(1, Vec2::ZERO);
        dragged.pointer.on_move(1, Vec2::new(200.0, 0.0));

        step(&mut dragged, 16.0, &tuning);
        step(&mut free, 16.0, &tuning);

        // Dilated world moved less than the free-running one
        assert!(dragged.body.vel.y < free.body.vel.y + 1e-6);
        assert!((dragged.body.pos.y - -5.0).abs() < (free.body.pos.y - -5.0).abs());
    }

    #[test]
    fn test_hard_floor_clamps_overshoot() {
        let mut tuning = test_tuning();
        tuning.ground = GroundMode::HardFloor;
        let mut world = WorldState::new();
        world.body.pos = Vec2::new(0.0, -0.001);
        world.body.vel = Vec2::new(0.0, 10.0);

        step(&mut world, 16.0, &tuning);
        assert_eq!(world.body.pos.y, 0.0);
        assert!(world.body.vel.y <= 0.0);
    }

    #[test]
    fn test_restoring_ground_allows_overshoot() {
        let tuning = test_tuning();
        let mut world = WorldState::new();
        world.body.pos = Vec2::new(0.0, -0.001);
        world.body.vel = Vec2::new(0.0, 10.0);

        step(&mut world, 16.0, &tuning);
        assert!(world.body.pos.y > 0.0);
    }

    #[test]
    fn test_full_sling_episode() {
        let tuning = test_tuning();
        let mut world = WorldState::new();
        let mut tracker = PointerTracker::new();

        tracker.on_down(9, Vec2::new(400.0, 300.0));
        tracker.on_move(9, Vec2::new(400.0, 450.0));
        let released = tracker.on_release(9).expect("release signal");
        apply_release(&mut world.body, &released, &tuning);

        // Downward drag slings the body upward
        assert!(world.body.vel.y < 0.0);

        // It rises above the ground line, then gravity brings it back
        let mut peak = 0.0f32;
        let mut returned = false;
        for _ in 0..500 {
            step(&mut world, 16.0, &tuning);
            peak = peak.min(world.body.pos.y);
            if peak < 0.0 && world.body.pos.y >= 0.0 {
                returned = true;
            }
        }
        assert!(peak < 0.0);
        assert!(returned);
    }
}
