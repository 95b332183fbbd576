//! Physics and presentation tunables
//!
//! Persisted separately from sim state in LocalStorage.

use serde::{Deserialize, Serialize};

/// How the ground line at `y == 0` behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GroundMode {
    /// The body may cross the line; mirrored gravity pulls it back
    #[default]
    Restoring,
    /// The line is a hard floor; overshoot is clamped away
    HardFloor,
}

/// Toy tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Physics ===
    /// Pixels per world unit
    pub world_scale: f32,
    /// Deceleration while moving away from the ground line (world units/s²)
    pub ascending_gravity: f32,
    /// Re-acceleration while falling back (world units/s²)
    pub descending_gravity: f32,
    /// Impulse per world unit of drag displacement
    pub drag_velocity_scale: f32,
    /// Horizontal component of the release impulse is scaled by this,
    /// reducing X disproportionately vs Y
    pub horizontal_damping: f32,
    /// Exponent in the drag time-dilation curve
    pub time_dilation_exponent: f32,
    /// Ground line behavior
    pub ground: GroundMode,

    // === Presentation ===
    /// Draw the scrolling grid
    pub show_grid: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_scale: 50.0,
            ascending_gravity: 30.0,
            descending_gravity: 60.0,
            drag_velocity_scale: 8.0,
            horizontal_damping: 0.6,
            time_dilation_exponent: 0.8,
            ground: GroundMode::Restoring,

            show_grid: true,
            show_fps: true,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sling_dot_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning from LocalStorage");
                    return tuning;
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_json_round_trip() {
        let tuning = Tuning {
            ground: GroundMode::HardFloor,
            horizontal_damping: 0.25,
            ..Tuning::default()
        };

        let json = serde_json::to_string(&tuning).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuning);
    }

    #[test]
    fn test_ground_mode_names_stable_in_json() {
        // These names are what a hand-edited LocalStorage value must use
        let json = serde_json::to_string(&GroundMode::HardFloor).unwrap();
        assert_eq!(json, "\"HardFloor\"");
        let back: GroundMode = serde_json::from_str("\"Restoring\"").unwrap();
        assert_eq!(back, GroundMode::Restoring);
    }
}
