//! Viewer settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ViewerResult;

/// Explosion factor smoothing parameters (tuned for a 60 Hz tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingSettings {
    /// Fraction of the remaining distance covered per tick
    pub coefficient: f32,
    /// Largest factor change allowed in one tick
    pub max_step: f32,
    /// Snap / change-detection threshold
    pub epsilon: f32,
    /// Tick rate the values above are tuned for
    pub reference_hz: f32,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            coefficient: 0.08,
            max_step: 0.05,
            epsilon: 0.001,
            reference_hz: 60.0,
        }
    }
}

/// Explosion geometry and state thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionSettings {
    /// Distance multiplier on the whole-assembly path
    pub global_distance_scale: f32,
    /// Distance multiplier on the sub-assembly path
    pub part_distance_scale: f32,
    /// Radians of tilt at full explosion, along the explode direction
    pub rotation_amount: f32,
    /// Below this factor the rest rotation is used verbatim
    pub rotation_threshold: f32,
    /// Global target above this leaves Assembled
    pub explode_threshold: f32,
    /// Global target below this returns to Assembled
    pub assemble_threshold: f32,
    /// Global factor needed before parts can be selected
    pub select_threshold: f32,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            global_distance_scale: 2.0,
            part_distance_scale: 1.5,
            rotation_amount: 0.3,
            rotation_threshold: 0.01,
            explode_threshold: 0.1,
            assemble_threshold: 0.05,
            select_threshold: 0.1,
        }
    }
}

/// Ring layout used while a part is focused
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSettings {
    /// Where the focused part sits
    pub primary_center: [f32; 3],
    /// Center of the circle of background slots
    pub secondary_center: [f32; 3],
    pub secondary_radius: f32,
    pub focused_scale: f32,
    pub background_scale: f32,
    /// Fraction of the remaining distance covered per tick
    pub lerp_factor: f32,
    pub position_epsilon: f32,
    pub scale_epsilon: f32,
}

impl Default for RingSettings {
    fn default() -> Self {
        Self {
            primary_center: [0.0, 0.0, 0.0],
            secondary_center: [0.0, 0.0, -1.5],
            secondary_radius: 4.0,
            focused_scale: 1.0,
            background_scale: 0.7,
            lerp_factor: 0.08,
            position_epsilon: 0.01,
            scale_epsilon: 0.01,
        }
    }
}

/// Input adapter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Explosion nudge per key press
    pub adjust_step: f32,
    /// Hover time before a gesture pointer auto-selects
    pub dwell_seconds: f32,
    /// Inactivity before the view resets to assembled
    pub idle_reset_seconds: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            adjust_step: 0.1,
            dwell_seconds: 2.0,
            idle_reset_seconds: 60.0,
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub smoothing: SmoothingSettings,
    #[serde(default)]
    pub explosion: ExplosionSettings,
    #[serde(default)]
    pub ring: RingSettings,
    #[serde(default)]
    pub input: InputSettings,
}

impl ViewerSettings {
    /// Load settings from the platform config dir, or return defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring settings at {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "mech", "mech-viewer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from an explicit JSON file
    pub fn load_from(path: &Path) -> ViewerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse settings from JSON; missing sections keep their defaults
    pub fn from_json(json: &str) -> ViewerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save settings to the platform config dir
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    /// Save settings to an explicit JSON file
    pub fn save_to(&self, path: &Path) -> ViewerResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Number of reference ticks represented by a frame of `dt` seconds
    ///
    /// A non-finite `dt` counts as an empty frame.
    pub fn frame_scale(&self, dt: f32) -> f32 {
        let scale = dt * self.smoothing.reference_hz;
        if !scale.is_finite() {
            return 0.0;
        }
        scale.clamp(0.0, 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuning() {
        let s = ViewerSettings::default();
        assert_eq!(s.smoothing.max_step, 0.05);
        assert_eq!(s.explosion.global_distance_scale, 2.0);
        assert_eq!(s.ring.background_scale, 0.7);
        assert_eq!(s.input.dwell_seconds, 2.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = ViewerSettings::from_json(r#"{"ring": {
            "primary_center": [0, 1, 0], "secondary_center": [0, 0, 0],
            "secondary_radius": 6.0, "focused_scale": 1.0, "background_scale": 0.5,
            "lerp_factor": 0.1, "position_epsilon": 0.01, "scale_epsilon": 0.01
        }}"#)
        .unwrap();
        assert_eq!(s.ring.secondary_radius, 6.0);
        assert_eq!(s.smoothing, SmoothingSettings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut s = ViewerSettings::default();
        s.input.adjust_step = 0.25;
        s.save_to(&path).unwrap();
        assert_eq!(ViewerSettings::load_from(&path).unwrap(), s);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerSettings::load_from(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::error::ViewerError::Io(_)));
    }

    #[test]
    fn test_frame_scale() {
        let s = ViewerSettings::default();
        assert!((s.frame_scale(1.0 / 60.0) - 1.0).abs() < 1e-5);
        assert!((s.frame_scale(1.0 / 30.0) - 2.0).abs() < 1e-5);
        assert_eq!(s.frame_scale(10.0), 4.0);
        assert_eq!(s.frame_scale(-1.0), 0.0);
    }

    #[test]
    fn test_frame_scale_non_finite_is_empty_frame() {
        let s = ViewerSettings::default();
        assert_eq!(s.frame_scale(f32::NAN), 0.0);
        assert_eq!(s.frame_scale(f32::INFINITY), 0.0);
        assert_eq!(s.frame_scale(f32::NEG_INFINITY), 0.0);
    }
}
