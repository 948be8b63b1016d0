//! Per-session configuration for the navigation engine.

use crate::error::{NavigationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How aggressively repeated instructions are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownMode {
    /// Per-key and repeated-text cooldown only.
    #[default]
    Standard,
    /// Additionally drops instructions below the override priority while speech is playing.
    Strict,
}

/// Confidence floors and geometric ratios used by the classifier and the rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub obstacle_min_confidence: f32,
    pub crosswalk_min_confidence: f32,
    pub traffic_light_min_confidence: f32,
    /// An obstacle must be strictly above this to drive an instruction.
    pub danger_min_confidence: f32,
    /// Fraction of the frame area above which an object counts as close.
    pub close_area_ratio: f32,
    /// Lower fraction of the frame height treated as near-field.
    pub danger_zone_ratio: f32,
    /// Half-width of the center band, as a fraction of the frame width.
    pub center_band_ratio: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            obstacle_min_confidence: 0.5,
            crosswalk_min_confidence: 0.3,
            traffic_light_min_confidence: 0.4,
            danger_min_confidence: 0.6,
            close_area_ratio: 0.05,
            danger_zone_ratio: 0.3,
            center_band_ratio: 0.15,
        }
    }
}

/// Shape of the walkable corridor trapezoid, as fractions of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeZoneConfig {
    pub bottom_width_ratio: f32,
    pub top_width_ratio: f32,
    pub height_ratio: f32,
    pub bottom_margin_ratio: f32,
    /// Shift the corridor toward a detected crosswalk.
    pub adjust_to_path: bool,
    /// Maximum corridor shift from the frame center, as a fraction of the frame width.
    pub max_shift_ratio: f32,
    /// Interpolation factor applied per frame when the corridor center moves.
    pub smoothing: f32,
}

impl Default for SafeZoneConfig {
    fn default() -> Self {
        Self {
            bottom_width_ratio: 0.25,
            top_width_ratio: 0.12,
            height_ratio: 0.45,
            bottom_margin_ratio: 0.08,
            adjust_to_path: false,
            max_shift_ratio: 0.15,
            smoothing: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Minimum time between two emissions of the same instruction key.
    pub cooldown_ms: u64,
    pub mode: CooldownMode,
    /// Instructions at or above this priority bypass every cooldown.
    pub override_priority: u8,
    pub thresholds: Thresholds,
    pub safe_zone: SafeZoneConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 2000,
            mode: CooldownMode::Standard,
            override_priority: 9,
            thresholds: Thresholds::default(),
            safe_zone: SafeZoneConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Preset for voice-heavy clients: longer window and speech-in-progress suppression.
    pub fn strict() -> Self {
        Self {
            cooldown_ms: 5000,
            mode: CooldownMode::Strict,
            ..Self::default()
        }
    }

    /// Loads a JSON configuration file. Missing fields take their default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cooldown_ms == 0 {
            return Err(NavigationError::Config(
                "cooldown_ms must be positive".to_string(),
            ));
        }
        if self.override_priority > 10 {
            return Err(NavigationError::Config(
                "override_priority must be between 0 and 10".to_string(),
            ));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("obstacle_min_confidence", t.obstacle_min_confidence),
            ("crosswalk_min_confidence", t.crosswalk_min_confidence),
            ("traffic_light_min_confidence", t.traffic_light_min_confidence),
            ("danger_min_confidence", t.danger_min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(NavigationError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let z = &self.safe_zone;
        for (name, value) in [
            ("close_area_ratio", t.close_area_ratio),
            ("danger_zone_ratio", t.danger_zone_ratio),
            ("center_band_ratio", t.center_band_ratio),
            ("bottom_width_ratio", z.bottom_width_ratio),
            ("top_width_ratio", z.top_width_ratio),
            ("height_ratio", z.height_ratio),
            ("max_shift_ratio", z.max_shift_ratio),
            ("smoothing", z.smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(NavigationError::Config(format!(
                    "{name} must be within (0, 1], got {value}"
                )));
            }
        }

        if !(0.0..1.0).contains(&z.bottom_margin_ratio) {
            return Err(NavigationError::Config(
                "bottom_margin_ratio must be within [0, 1)".to_string(),
            ));
        }
        if z.top_width_ratio > z.bottom_width_ratio {
            return Err(NavigationError::Config(
                "safe zone must be narrower at the top than at the bottom".to_string(),
            ));
        }
        if z.bottom_margin_ratio + z.height_ratio > 1.0 {
            return Err(NavigationError::Config(
                "safe zone does not fit in the frame".to_string(),
            ));
        }

        Ok(())
    }
}
