use crate::detect::property::bbox::BoundingBox;
use crate::detect::property::category::DetectionType;
use crate::detect::property::direction::Band;
use crate::detect::property::traffic_light::TrafficLightState;
use crate::detect::COLOR_HEURISTIC_CONFIDENCE;
use serde::{Deserialize, Serialize};

/// How the upstream detector produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Learned model output; its confidence is meaningful.
    #[default]
    Model,
    /// Traffic light found by pixel-color voting; carries a fixed confidence.
    ColorHeuristic,
}

/// Detection as handed over by the object detector, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub bbox: BoundingBox,
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f32,
    #[serde(default)]
    pub state: Option<TrafficLightState>,
    #[serde(default)]
    pub source: DetectionSource,
}

impl RawDetection {
    pub fn new(class_name: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            bbox,
            class_name: class_name.into(),
            confidence,
            state: None,
            source: DetectionSource::Model,
        }
    }

    pub fn with_state(mut self, state: TrafficLightState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_source(mut self, source: DetectionSource) -> Self {
        self.source = source;
        self
    }

    /// Traffic light located without a model, its state voted from the RGB pixels
    /// inside `bbox`. An inconclusive vote leaves the state unknown.
    pub fn traffic_light_from_pixels(bbox: BoundingBox, pixels: &[[u8; 3]]) -> Self {
        Self {
            bbox,
            class_name: "traffic light".to_string(),
            confidence: COLOR_HEURISTIC_CONFIDENCE,
            state: TrafficLightState::from_pixels(pixels),
            source: DetectionSource::ColorHeuristic,
        }
    }
}

/// Categorized, distance-annotated detection ready for arbitration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    #[serde(rename = "class")]
    pub class_name: String,
    pub class_es: String,
    pub confidence: f32,
    #[serde(rename = "type")]
    pub kind: DetectionType,
    #[serde(default)]
    pub state: Option<TrafficLightState>,
    pub relative_size: f32,
    pub distance_meters: f32,
    pub is_close: bool,
    /// Bottom edge reaches into the near-field strip at the bottom of the frame.
    pub in_danger_zone: bool,
    #[serde(default)]
    pub in_safe_zone: bool,
}

impl Detection {
    /// Obstacles only drive instructions when close or underfoot, and confidently seen.
    pub fn is_dangerous(&self, danger_min_confidence: f32) -> bool {
        self.kind == DetectionType::Obstacle
            && (self.is_close || self.in_danger_zone)
            && self.confidence > danger_min_confidence
    }

    pub fn band(&self, image_width: u32, center_band_ratio: f32) -> Band {
        Band::of(self.bbox.center_x(), image_width, center_band_ratio)
    }
}
