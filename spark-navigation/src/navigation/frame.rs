use crate::config::Thresholds;
use crate::detect::property::category::DetectionType;
use crate::detect::property::detection::Detection;
use crate::detect::property::direction::Band;
use crate::detect::safe_zone::SafeZone;
use crate::detect::FrameSize;

/// Read-only view of one classified frame, shared by every rule.
#[derive(Debug)]
pub struct FrameContext<'a> {
    pub detections: &'a [Detection],
    pub frame: FrameSize,
    pub safe_zone: Option<&'a SafeZone>,
    pub thresholds: Thresholds,
    /// Dangerous obstacles, each in exactly one band.
    pub left: Vec<&'a Detection>,
    pub center: Vec<&'a Detection>,
    pub right: Vec<&'a Detection>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        detections: &'a [Detection],
        frame: FrameSize,
        safe_zone: Option<&'a SafeZone>,
        thresholds: Thresholds,
    ) -> Self {
        let mut left = Vec::new();
        let mut center = Vec::new();
        let mut right = Vec::new();

        for detection in detections
            .iter()
            .filter(|d| d.is_dangerous(thresholds.danger_min_confidence))
        {
            match detection.band(frame.width, thresholds.center_band_ratio) {
                Band::Left => left.push(detection),
                Band::Center => center.push(detection),
                Band::Right => right.push(detection),
            }
        }

        Self {
            detections,
            frame,
            safe_zone,
            thresholds,
            left,
            center,
            right,
        }
    }

    pub fn of_kind(&self, kind: DetectionType) -> impl Iterator<Item = &'a Detection> + '_ {
        self.detections.iter().filter(move |d| d.kind == kind)
    }

    /// Obstacles physically blocking the corridor, closest first.
    pub fn corridor_obstacles(&self) -> Vec<&'a Detection> {
        let mut blocking: Vec<_> = self
            .of_kind(DetectionType::Obstacle)
            .filter(|d| {
                d.in_safe_zone
                    && (d.is_close || d.in_danger_zone)
                    && d.confidence >= self.thresholds.obstacle_min_confidence
            })
            .collect();
        blocking.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        blocking
    }
}

/// Closest detection of a bucket; ties keep the first.
pub fn closest<'a>(bucket: &[&'a Detection]) -> Option<&'a Detection> {
    bucket
        .iter()
        .copied()
        .reduce(|best, d| if d.distance_meters < best.distance_meters { d } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::classifier::Classifier;
    use crate::detect::property::bbox::BoundingBox;
    use crate::detect::property::detection::RawDetection;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    #[test]
    fn each_dangerous_obstacle_lands_in_one_band() {
        let thresholds = Thresholds::default();
        let detections = Classifier::new(thresholds).classify(
            &[
                RawDetection::new("person", BoundingBox::new(0.0, 300.0, 80.0, 100.0), 0.9),
                RawDetection::new("car", BoundingBox::new(280.0, 300.0, 100.0, 80.0), 0.8),
                RawDetection::new("bench", BoundingBox::new(540.0, 300.0, 100.0, 100.0), 0.9),
                // Far and small: tracked but never dangerous
                RawDetection::new("person", BoundingBox::new(300.0, 50.0, 10.0, 20.0), 0.9),
            ],
            FRAME,
        );
        let ctx = FrameContext::new(&detections, FRAME, None, thresholds);

        assert_eq!(detections.len(), 4);
        assert_eq!(ctx.left.len() + ctx.center.len() + ctx.right.len(), 3);
        assert_eq!(ctx.center[0].class_name, "car");
        assert_eq!(ctx.left[0].class_name, "person");
        assert_eq!(ctx.right[0].class_name, "bench");
    }

    #[test]
    fn closest_prefers_larger_boxes() {
        let thresholds = Thresholds::default();
        let detections = Classifier::new(thresholds).classify(
            &[
                RawDetection::new("chair", BoundingBox::new(10.0, 300.0, 50.0, 100.0), 0.9),
                RawDetection::new("bench", BoundingBox::new(10.0, 250.0, 150.0, 200.0), 0.9),
            ],
            FRAME,
        );
        let ctx = FrameContext::new(&detections, FRAME, None, thresholds);
        assert_eq!(closest(&ctx.left).map(|d| d.class_name.as_str()), Some("bench"));
        assert!(closest(&[]).is_none());
    }
}
