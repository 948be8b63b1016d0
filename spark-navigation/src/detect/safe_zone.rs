use crate::config::SafeZoneConfig;
use crate::detect::property::bbox::BoundingBox;
use crate::detect::property::category::DetectionType;
use crate::detect::property::detection::Detection;
use crate::detect::{FrameSize, PATH_ADJUST_MIN_SHIFT, SAFE_ZONE_OVERLAP_FRACTION};
use log::debug;
use serde::{Deserialize, Serialize};

/// Pixel coordinate, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

fn default_clear() -> bool {
    true
}

/// Walkable corridor directly ahead of the user: a trapezoid, wide at the bottom
/// (near) and narrow at the top (far).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub top_left: Point,
    pub top_right: Point,
    #[serde(default = "default_clear")]
    pub is_clear: bool,
    #[serde(default)]
    pub obstacle_count: usize,
    #[serde(default)]
    pub path_adjusted: bool,
    #[serde(default)]
    pub path_confidence: f32,
}

impl SafeZone {
    /// Corridor of the configured shape with its axis at `center_x`.
    pub fn around(center_x: f32, frame: FrameSize, config: &SafeZoneConfig) -> Self {
        let width = frame.width as f32;
        let height = frame.height as f32;

        let bottom_half = width * config.bottom_width_ratio / 2.0;
        let top_half = width * config.top_width_ratio / 2.0;
        let bottom_y = height * (1.0 - config.bottom_margin_ratio);
        let top_y = bottom_y - height * config.height_ratio;

        Self {
            bottom_left: Point::new(center_x - bottom_half, bottom_y),
            bottom_right: Point::new(center_x + bottom_half, bottom_y),
            top_left: Point::new(center_x - top_half, top_y),
            top_right: Point::new(center_x + top_half, top_y),
            is_clear: true,
            obstacle_count: 0,
            path_adjusted: false,
            path_confidence: 0.0,
        }
    }

    /// Fixed corridor centered in the frame.
    pub fn centered(frame: FrameSize, config: &SafeZoneConfig) -> Self {
        Self::around(frame.center_x(), frame, config)
    }

    pub fn top_y(&self) -> f32 {
        (self.top_left.y + self.top_right.y) / 2.0
    }

    pub fn bottom_y(&self) -> f32 {
        (self.bottom_left.y + self.bottom_right.y) / 2.0
    }

    pub fn center_x(&self) -> f32 {
        (self.bottom_left.x + self.bottom_right.x + self.top_left.x + self.top_right.x) / 4.0
    }

    pub fn is_well_formed(&self) -> bool {
        let corners = [
            self.bottom_left,
            self.bottom_right,
            self.top_left,
            self.top_right,
        ];
        corners.iter().all(|p| p.x.is_finite() && p.y.is_finite())
            && self.bottom_y() > self.top_y()
            && self.bottom_left.x < self.bottom_right.x
            && self.top_left.x <= self.top_right.x
    }

    /// Left and right corridor edges at height `y`, interpolated along the slanted sides.
    /// Heights outside the corridor are clamped to its top or bottom edge.
    pub fn bounds_at(&self, y: f32) -> (f32, f32) {
        let (top, bottom) = (self.top_y(), self.bottom_y());
        let t = ((y - top) / (bottom - top)).clamp(0.0, 1.0);

        let left = self.top_left.x + (self.bottom_left.x - self.top_left.x) * t;
        let right = self.top_right.x + (self.bottom_right.x - self.top_right.x) * t;
        (left, right)
    }

    /// A box blocks the corridor when its center lies inside the trapezoid, or when
    /// more than `SAFE_ZONE_OVERLAP_FRACTION` of its area falls within the corridor.
    pub fn contains(&self, bbox: &BoundingBox) -> bool {
        if !self.is_well_formed() {
            return false;
        }
        let (top, bottom) = (self.top_y(), self.bottom_y());

        let center_y = bbox.center_y();
        let center_in_zone = (top..=bottom).contains(&center_y) && {
            let (left, right) = self.bounds_at(center_y);
            (left..=right).contains(&bbox.center_x())
        };

        if bbox.bottom() < top || bbox.y > bottom {
            return false;
        }

        // Narrowest horizontal extent of the corridor over the box's vertical span
        let (left_at_top, right_at_top) = self.bounds_at(bbox.y);
        let (left_at_bottom, right_at_bottom) = self.bounds_at(bbox.bottom());
        let overlap_left = left_at_top.max(left_at_bottom).max(bbox.x);
        let overlap_right = right_at_top.min(right_at_bottom).min(bbox.right());

        if overlap_left < overlap_right {
            let overlap_height = bbox.bottom().min(bottom) - bbox.y.max(top);
            let overlap_area = (overlap_right - overlap_left) * overlap_height;
            let significant = overlap_area > bbox.area() * SAFE_ZONE_OVERLAP_FRACTION;
            return center_in_zone || significant;
        }

        center_in_zone
    }

    /// Marks every detection inside the corridor and recounts the obstacles blocking it.
    pub fn apply(&mut self, detections: &mut [Detection]) {
        let mut obstacle_count = 0;
        for detection in detections.iter_mut() {
            detection.in_safe_zone = self.contains(&detection.bbox);
            if detection.in_safe_zone && detection.kind == DetectionType::Obstacle {
                obstacle_count += 1;
            }
        }
        self.obstacle_count = obstacle_count;
        self.is_clear = obstacle_count == 0;
    }
}

/// Builds the corridor each frame. The smoothed corridor center is the only state
/// carried across frames.
#[derive(Debug, Clone)]
pub struct SafeZoneBuilder {
    config: SafeZoneConfig,
    smoothed: Option<(u32, f32)>,
}

impl SafeZoneBuilder {
    pub fn new(config: SafeZoneConfig) -> Self {
        Self {
            config,
            smoothed: None,
        }
    }

    /// Builds this frame's corridor from already classified detections.
    ///
    /// With path adjustment enabled, the corridor drifts toward the most confident
    /// crosswalk, never further than `max_shift_ratio` of the width from the frame
    /// center, and relaxes back to the center when no crosswalk is visible.
    /// `path_adjusted` is only reported for frames where a crosswalk pulls the corridor.
    pub fn build(&mut self, frame: FrameSize, detections: &[Detection]) -> SafeZone {
        let frame_center = frame.center_x();
        if !self.config.adjust_to_path {
            return SafeZone::centered(frame, &self.config);
        }

        let crosswalk = detections
            .iter()
            .filter(|d| d.kind == DetectionType::Crosswalk)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence));

        let max_shift = frame.width as f32 * self.config.max_shift_ratio;
        let target = crosswalk.map_or(frame_center, |c| {
            c.bbox
                .center_x()
                .clamp(frame_center - max_shift, frame_center + max_shift)
        });

        // A resolution change invalidates the previous center
        let previous = match self.smoothed {
            Some((width, center)) if width == frame.width => center,
            _ => frame_center,
        };
        let center = previous + (target - previous) * self.config.smoothing;
        self.smoothed = Some((frame.width, center));

        let mut zone = SafeZone::around(center, frame, &self.config);
        // Relaxing back toward the center is not a path adjustment
        zone.path_adjusted =
            crosswalk.is_some() && (center - frame_center).abs() > PATH_ADJUST_MIN_SHIFT;
        zone.path_confidence = crosswalk.map_or(0.0, |c| c.confidence);
        if zone.path_adjusted {
            debug!(
                "Corridor shifted {:.1}px from the frame center",
                center - frame_center
            );
        }
        zone
    }

    pub fn reset(&mut self) {
        self.smoothed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::detect::classifier::Classifier;
    use crate::detect::property::detection::RawDetection;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    fn classify(raw: &[RawDetection]) -> Vec<Detection> {
        Classifier::new(Thresholds::default()).classify(raw, FRAME)
    }

    #[test]
    fn centered_geometry() {
        let zone = SafeZone::centered(FRAME, &SafeZoneConfig::default());
        // bottom width 160, top width 76.8, bottom at 441.6, top at 225.6
        assert!((zone.bottom_left.x - 240.0).abs() < 1e-3);
        assert!((zone.bottom_right.x - 400.0).abs() < 1e-3);
        assert!((zone.top_left.x - 281.6).abs() < 1e-3);
        assert!((zone.bottom_y() - 441.6).abs() < 1e-3);
        assert!((zone.top_y() - 225.6).abs() < 1e-3);
        assert!((zone.center_x() - 320.0).abs() < 1e-3);
        assert!(zone.is_well_formed());
        assert!(zone.is_clear);
    }

    #[test]
    fn trapezoid_narrows_with_distance() {
        let zone = SafeZone::centered(FRAME, &SafeZoneConfig::default());
        let (near_left, near_right) = zone.bounds_at(zone.bottom_y());
        let (far_left, far_right) = zone.bounds_at(zone.top_y());
        assert!(far_right - far_left < near_right - near_left);
    }

    #[test]
    fn contains_boxes_in_the_corridor() {
        let zone = SafeZone::centered(FRAME, &SafeZoneConfig::default());

        assert!(zone.contains(&BoundingBox::new(300.0, 330.0, 40.0, 60.0)));
        // Far left of the frame
        assert!(!zone.contains(&BoundingBox::new(10.0, 330.0, 60.0, 60.0)));
        // Above the corridor
        assert!(!zone.contains(&BoundingBox::new(300.0, 10.0, 40.0, 60.0)));
    }

    #[test]
    fn significant_overlap_counts_even_off_center() {
        let zone = SafeZone::centered(FRAME, &SafeZoneConfig::default());
        // Center at x=245 sits just left of the corridor edge, most of its right half is inside
        let bbox = BoundingBox::new(195.0, 380.0, 100.0, 50.0);
        let (left, _) = zone.bounds_at(bbox.center_y());
        assert!(bbox.center_x() < left);
        assert!(zone.contains(&bbox));
    }

    #[test]
    fn apply_counts_obstacles_only() {
        let mut detections = classify(&[
            RawDetection::new("person", BoundingBox::new(300.0, 330.0, 40.0, 60.0), 0.9),
            RawDetection::new("crosswalk", BoundingBox::new(250.0, 400.0, 140.0, 30.0), 0.6),
            RawDetection::new("car", BoundingBox::new(10.0, 100.0, 60.0, 40.0), 0.9),
        ]);
        let mut zone = SafeZone::centered(FRAME, &SafeZoneConfig::default());
        zone.apply(&mut detections);

        assert!(detections[0].in_safe_zone);
        assert!(detections[1].in_safe_zone);
        assert!(!detections[2].in_safe_zone);
        assert_eq!(zone.obstacle_count, 1);
        assert!(!zone.is_clear);
    }

    #[test]
    fn malformed_zone_contains_nothing() {
        let mut zone = SafeZone::centered(FRAME, &SafeZoneConfig::default());
        zone.top_left.y = 470.0;
        zone.top_right.y = 470.0;
        assert!(!zone.is_well_formed());
        assert!(!zone.contains(&BoundingBox::new(300.0, 330.0, 40.0, 60.0)));
    }

    #[test]
    fn fixed_builder_ignores_crosswalks() {
        let mut builder = SafeZoneBuilder::new(SafeZoneConfig::default());
        let detections = classify(&[RawDetection::new(
            "crosswalk",
            BoundingBox::new(500.0, 400.0, 100.0, 30.0),
            0.6,
        )]);
        let zone = builder.build(FRAME, &detections);
        assert!(!zone.path_adjusted);
        assert!((zone.center_x() - 320.0).abs() < 1e-3);
    }

    #[test]
    fn adjusted_builder_drifts_toward_crosswalk_within_bounds() {
        let config = SafeZoneConfig {
            adjust_to_path: true,
            ..SafeZoneConfig::default()
        };
        let mut builder = SafeZoneBuilder::new(config);
        let detections = classify(&[RawDetection::new(
            "crosswalk",
            BoundingBox::new(560.0, 400.0, 80.0, 30.0),
            0.6,
        )]);

        let first = builder.build(FRAME, &detections);
        assert!(first.path_adjusted);
        assert!((first.path_confidence - 0.6).abs() < 1e-6);
        // Target clamps at 320 + 96 = 416; first step moves 30% of the way
        assert!((first.center_x() - 348.8).abs() < 1e-3);

        let mut center = first.center_x();
        for _ in 0..50 {
            center = builder.build(FRAME, &detections).center_x();
        }
        assert!(center <= 416.0 + 1e-3);
        assert!(center > 410.0);

        for _ in 0..50 {
            center = builder.build(FRAME, &[]).center_x();
        }
        assert!((center - 320.0).abs() < 1.0);
    }

    #[test]
    fn relaxing_corridor_is_not_path_adjusted() {
        let config = SafeZoneConfig {
            adjust_to_path: true,
            ..SafeZoneConfig::default()
        };
        let mut builder = SafeZoneBuilder::new(config);
        let detections = classify(&[RawDetection::new(
            "crosswalk",
            BoundingBox::new(560.0, 400.0, 80.0, 30.0),
            0.6,
        )]);
        for _ in 0..5 {
            assert!(builder.build(FRAME, &detections).path_adjusted);
        }

        let relaxing = builder.build(FRAME, &[]);
        assert!(relaxing.center_x() > 330.0);
        assert!(!relaxing.path_adjusted);
        assert_eq!(relaxing.path_confidence, 0.0);
    }

    #[test]
    fn reset_recenters() {
        let config = SafeZoneConfig {
            adjust_to_path: true,
            ..SafeZoneConfig::default()
        };
        let mut builder = SafeZoneBuilder::new(config);
        let detections = classify(&[RawDetection::new(
            "crosswalk",
            BoundingBox::new(0.0, 400.0, 80.0, 30.0),
            0.6,
        )]);
        builder.build(FRAME, &detections);
        builder.reset();

        let zone = builder.build(FRAME, &[]);
        assert!(!zone.path_adjusted);
        assert!((zone.center_x() - 320.0).abs() < 1e-3);
    }
}
