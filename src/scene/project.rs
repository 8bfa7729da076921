//! Project-level editing settings.

use serde::{Deserialize, Serialize};

/// Settings that affect how pointer input is quantized.
///
/// Owned by the scene store alongside the elements; the interaction engine
/// reads them on every drag and toggles `snap_to_grid` from the keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Grid cell size in world units
    pub grid_size: f32,
    /// Whether drag deltas and new elements snap to the grid
    pub snap_to_grid: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            snap_to_grid: true,
        }
    }
}

/// Partial settings update; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    pub grid_size: Option<f32>,
    pub snap_to_grid: Option<bool>,
}

impl SettingsPatch {
    /// Patch that only flips the snap flag.
    pub fn snap(snap_to_grid: bool) -> Self {
        Self {
            snap_to_grid: Some(snap_to_grid),
            ..Self::default()
        }
    }
}
