//! Launcher configuration, loaded from TOML.
//!
//! Every field has a default matching the reference phone UI, so an empty
//! file (or no file at all) yields a working launcher.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LauncherError, Result};

/// Drag gesture thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Squared pointer travel (px²) before a drag may propose a move.
    #[serde(default = "default_threshold_sq")]
    pub threshold_sq: f32,
    /// Horizontal travel (px) beyond which a one-slot step is proposed.
    #[serde(default = "default_step_px")]
    pub step_px: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold_sq: default_threshold_sq(),
            step_px: default_step_px(),
        }
    }
}

/// Top-level launcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Intended display capacity of the dock.
    #[serde(default = "default_dock_capacity")]
    pub dock_capacity: usize,
    /// Maximum number of apps placed on the home grid at partition time.
    #[serde(default = "default_home_capacity")]
    pub home_capacity: usize,
    /// Icons per home page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Apps shown per library category before "See All".
    #[serde(default = "default_category_display_cap")]
    pub category_display_cap: usize,
    /// The launcher's own package, excluded from the catalog.
    #[serde(default = "default_self_package")]
    pub self_package: String,
    /// Upward swipe distance (px) that opens the library.
    #[serde(default = "default_library_swipe_px")]
    pub library_swipe_px: f32,
    /// Where the saved layout lives (None = do not persist).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_path: Option<PathBuf>,
    #[serde(default)]
    pub drag: DragConfig,
}

fn default_dock_capacity() -> usize {
    4
}
fn default_home_capacity() -> usize {
    20
}
fn default_page_size() -> usize {
    20
}
fn default_category_display_cap() -> usize {
    8
}
fn default_self_package() -> String {
    "com.example.launcherapple".to_string()
}
fn default_library_swipe_px() -> f32 {
    100.0
}
fn default_threshold_sq() -> f32 {
    5000.0
}
fn default_step_px() -> f32 {
    100.0
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            dock_capacity: default_dock_capacity(),
            home_capacity: default_home_capacity(),
            page_size: default_page_size(),
            category_display_cap: default_category_display_cap(),
            self_package: default_self_package(),
            library_swipe_px: default_library_swipe_px(),
            layout_path: None,
            drag: DragConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: LauncherConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded launcher config from {}", path.display());
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.dock_capacity == 0 {
            return Err(LauncherError::Config("dock_capacity must be > 0".into()));
        }
        if self.page_size == 0 {
            return Err(LauncherError::Config("page_size must be > 0".into()));
        }
        if self.category_display_cap == 0 {
            return Err(LauncherError::Config(
                "category_display_cap must be > 0".into(),
            ));
        }
        if !(self.drag.threshold_sq >= 0.0 && self.drag.step_px >= 0.0) {
            return Err(LauncherError::Config(
                "drag thresholds must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let cfg = LauncherConfig::default();
        assert_eq!(cfg.dock_capacity, 4);
        assert_eq!(cfg.home_capacity, 20);
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.category_display_cap, 8);
        assert_eq!(cfg.self_package, "com.example.launcherapple");
        assert!((cfg.library_swipe_px - 100.0).abs() < f32::EPSILON);
        assert!((cfg.drag.threshold_sq - 5000.0).abs() < f32::EPSILON);
        assert!((cfg.drag.step_px - 100.0).abs() < f32::EPSILON);
        assert!(cfg.layout_path.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = LauncherConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, LauncherConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = LauncherConfig::from_toml_str(
            "dock_capacity = 5\nlayout_path = \"/tmp/layout.toml\"\n[drag]\nstep_px = 60.0\n",
        )
        .unwrap();
        assert_eq!(cfg.dock_capacity, 5);
        assert_eq!(cfg.home_capacity, 20);
        assert_eq!(cfg.layout_path, Some(PathBuf::from("/tmp/layout.toml")));
        assert!((cfg.drag.step_px - 60.0).abs() < f32::EPSILON);
        assert!((cfg.drag.threshold_sq - 5000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = LauncherConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, LauncherError::Config(_)));
    }

    #[test]
    fn zero_dock_capacity_rejected() {
        let err = LauncherConfig::from_toml_str("dock_capacity = 0").unwrap_err();
        assert!(matches!(err, LauncherError::Config(_)));
    }

    #[test]
    fn negative_step_rejected() {
        let err = LauncherConfig::from_toml_str("[drag]\nstep_px = -1.0").unwrap_err();
        assert!(matches!(err, LauncherError::Config(_)));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = LauncherConfig::from_toml_str("dock_capacity = \"four\"").unwrap_err();
        assert!(matches!(err, LauncherError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher.toml");
        std::fs::write(&path, "category_display_cap = 6\n").unwrap();
        let cfg = LauncherConfig::load(&path).unwrap();
        assert_eq!(cfg.category_display_cap, 6);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LauncherConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, LauncherError::Io(_)));
    }

    #[test]
    fn serialize_roundtrip() {
        let cfg = LauncherConfig::default();
        let text = toml::to_string(&cfg).unwrap();
        assert_eq!(LauncherConfig::from_toml_str(&text).unwrap(), cfg);
    }
}
