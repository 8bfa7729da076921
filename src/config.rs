//! Configuration file support for the editor interaction engine.
//!
//! This module handles loading and validating tuning values from the
//! configuration file located at `~/.config/planwright/config.toml`.
//! Settings cover pointer thresholds, grid defaults for new projects, and
//! wall dimensions used by the drawing tools.
//!
//! If no config file exists, sensible defaults are used automatically.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all tuning values.
///
/// All fields have defaults and will use those if not specified in the
/// config file.
///
/// # Example TOML
/// ```toml
/// [interaction]
/// drag_threshold_px = 5.0
/// double_click_ms = 300
///
/// [grid]
/// size = 1.0
/// snap = true
///
/// [walls]
/// thickness = 0.2
/// height = 3.0
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Pointer thresholds and picking tolerances
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Grid defaults applied to new projects
    #[serde(default)]
    pub grid: GridConfig,

    /// Dimensions for walls created by the wall tool
    #[serde(default)]
    pub walls: WallConfig,
}

/// Pointer interaction tuning.
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// On-screen movement in pixels before a press becomes a drag
    /// (valid range: 1.0 - 32.0)
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f32,

    /// Double-click window in milliseconds (valid range: 100 - 1000)
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,

    /// Smallest pick radius applied to thin elements in world units
    /// (valid range: 0.1 - 5.0)
    #[serde(default = "default_min_pick_radius")]
    pub min_pick_radius: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: default_drag_threshold(),
            double_click_ms: default_double_click_ms(),
            min_pick_radius: default_min_pick_radius(),
        }
    }
}

/// Grid defaults for new projects.
#[derive(Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid cell size in world units (valid range: 0.01 - 64.0)
    #[serde(default = "default_grid_size")]
    pub size: f32,

    /// Whether snapping starts enabled
    #[serde(default = "default_snap")]
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_grid_size(),
            snap: default_snap(),
        }
    }
}

/// Wall dimensions used by the wall drawing tool.
#[derive(Debug, Serialize, Deserialize)]
pub struct WallConfig {
    /// Wall thickness in world units (valid range: 0.01 - 5.0)
    #[serde(default = "default_wall_thickness")]
    pub thickness: f32,

    /// Wall height in world units (valid range: 0.1 - 20.0)
    #[serde(default = "default_wall_height")]
    pub height: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            thickness: default_wall_thickness(),
            height: default_wall_height(),
        }
    }
}

fn default_drag_threshold() -> f32 {
    5.0
}

fn default_double_click_ms() -> u64 {
    300
}

fn default_min_pick_radius() -> f32 {
    0.5
}

fn default_grid_size() -> f32 {
    1.0
}

fn default_snap() -> bool {
    true
}

fn default_wall_thickness() -> f32 {
    0.2
}

fn default_wall_height() -> f32 {
    3.0
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged, so a typo in the config file degrades instead of breaking
    /// interaction.
    fn validate_and_clamp(&mut self) {
        if !(1.0..=32.0).contains(&self.interaction.drag_threshold_px) {
            log::warn!(
                "Invalid drag_threshold_px {:.1}, clamping to 1.0-32.0 range",
                self.interaction.drag_threshold_px
            );
            self.interaction.drag_threshold_px =
                self.interaction.drag_threshold_px.clamp(1.0, 32.0);
        }

        if !(100..=1000).contains(&self.interaction.double_click_ms) {
            log::warn!(
                "Invalid double_click_ms {}, clamping to 100-1000 range",
                self.interaction.double_click_ms
            );
            self.interaction.double_click_ms = self.interaction.double_click_ms.clamp(100, 1000);
        }

        if !(0.1..=5.0).contains(&self.interaction.min_pick_radius) {
            log::warn!(
                "Invalid min_pick_radius {:.2}, clamping to 0.1-5.0 range",
                self.interaction.min_pick_radius
            );
            self.interaction.min_pick_radius = self.interaction.min_pick_radius.clamp(0.1, 5.0);
        }

        if !(0.01..=64.0).contains(&self.grid.size) {
            log::warn!(
                "Invalid grid size {:.2}, clamping to 0.01-64.0 range",
                self.grid.size
            );
            self.grid.size = self.grid.size.clamp(0.01, 64.0);
        }

        if !(0.01..=5.0).contains(&self.walls.thickness) {
            log::warn!(
                "Invalid wall thickness {:.2}, clamping to 0.01-5.0 range",
                self.walls.thickness
            );
            self.walls.thickness = self.walls.thickness.clamp(0.01, 5.0);
        }

        if !(0.1..=20.0).contains(&self.walls.height) {
            log::warn!(
                "Invalid wall height {:.2}, clamping to 0.1-20.0 range",
                self.walls.height
            );
            self.walls.height = self.walls.height.clamp(0.1, 20.0);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("planwright");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults
    /// if no file exists.
    ///
    /// # Errors
    /// Returns an error if the config directory path cannot be determined,
    /// or the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, with the same
    /// defaults-if-missing behavior as [`Config::load`].
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {config:?}");

        Ok(config)
    }

    /// Saves the current configuration to the default location.
    ///
    /// Creates the parent directory if it doesn't exist. Kept for hosts
    /// that expose runtime config editing.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.interaction.drag_threshold_px, 5.0);
        assert_eq!(config.interaction.double_click_ms, 300);
        assert_eq!(config.grid.size, 1.0);
        assert!(config.grid.snap);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid]\nsize = 0.5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.grid.size, 0.5);
        assert!(config.grid.snap);
        assert_eq!(config.interaction.drag_threshold_px, 5.0);
        assert_eq!(config.walls.height, 3.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[interaction]\ndrag_threshold_px = 500.0\ndouble_click_ms = 5\n\n[walls]\nheight = -2.0\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.interaction.drag_threshold_px, 32.0);
        assert_eq!(config.interaction.double_click_ms, 100);
        assert_eq!(config.walls.height, 0.1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not toml [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
