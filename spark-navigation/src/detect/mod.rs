pub mod classifier;
pub mod property;
pub mod safe_zone;

use crate::detect::property::detection::RawDetection;

/// Added to the relative area before inverting it, so empty boxes never divide by zero.
pub(crate) const AREA_EPSILON: f32 = 1e-6;
/// Distance reported for an object covering exactly the close-area ratio of the frame.
/// Calibrates the inverse-area proxy into meters.
pub(crate) const CLOSE_DISTANCE_METERS: f32 = 2.0;

// --- Traffic light color voting ---
/// Confidence assigned to traffic-light states derived from pixel voting rather than a model.
pub(crate) const COLOR_HEURISTIC_CONFIDENCE: f32 = 0.7;
/// A color must cover more than this fraction of the light's pixels to win the vote.
pub(crate) const COLOR_VOTE_MIN_FRACTION: f32 = 0.05;
pub(crate) const HSV_MIN_SATURATION: u8 = 100;
pub(crate) const HSV_MIN_VALUE: u8 = 100;

/// Fraction of a box that must fall inside the corridor to count as blocking it.
pub(crate) const SAFE_ZONE_OVERLAP_FRACTION: f32 = 0.25;
/// Corridor shifts smaller than this (pixels) are not reported as path adjustments.
pub(crate) const PATH_ADJUST_MIN_SHIFT: f32 = 0.5;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> f32 {
        self.width as f32 * self.height as f32
    }

    pub fn center_x(&self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// Source of per-frame detections, typically a model session owned by the capture loop.
pub trait ObjectDetector {
    type Image;

    fn detect(&self, image: &Self::Image) -> anyhow::Result<Vec<RawDetection>>;
}
