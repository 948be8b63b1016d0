use crate::detect::property::bbox::BoundingBox;
use crate::detect::{FrameSize, AREA_EPSILON, CLOSE_DISTANCE_METERS};
use log::error;
use serde::{Deserialize, Serialize};

/// Closeness heuristic derived from apparent size. Not a physical depth measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    /// Box area over frame area.
    pub relative_size: f32,
    /// `1 / (relative_size + epsilon)`: larger objects yield smaller values.
    pub proxy: f32,
    pub meters: f32,
}

impl DistanceEstimate {
    /// Estimates distance from the box area relative to the frame.
    ///
    /// Meters are calibrated from the proxy so that an object covering exactly
    /// `close_area_ratio` of the frame sits at `CLOSE_DISTANCE_METERS`. The estimate is
    /// strictly decreasing in box area.
    pub fn from_bbox(bbox: &BoundingBox, frame: FrameSize, close_area_ratio: f32) -> Option<Self> {
        if frame.is_empty() {
            error!("Frame dimensions cannot be zero for distance estimation.");
            return None;
        }

        let relative_size = bbox.area() / frame.area();
        let proxy = 1.0 / (relative_size + AREA_EPSILON);
        let meters = CLOSE_DISTANCE_METERS * (close_area_ratio * proxy).sqrt();

        Some(Self {
            relative_size,
            proxy,
            meters,
        })
    }

    /// Area ratio is the canonical closeness rule; `meters` crosses
    /// `CLOSE_DISTANCE_METERS` at the same ratio.
    pub fn is_close(&self, close_area_ratio: f32) -> bool {
        self.relative_size > close_area_ratio
    }
}
