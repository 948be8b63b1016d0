use crate::config::Thresholds;
use crate::detect::property::category::{ClassInfo, DetectionType};
use crate::detect::property::detection::{Detection, DetectionSource, RawDetection};
use crate::detect::property::distance::DistanceEstimate;
use crate::detect::{FrameSize, COLOR_HEURISTIC_CONFIDENCE};
use log::{debug, error};

/// Turns raw detector output into categorized, distance-annotated detections.
///
/// Best effort: anything malformed, irrelevant or below its confidence floor is
/// dropped here so the arbiter only ever sees usable signals.
#[derive(Debug, Clone)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, raw: &[RawDetection], frame: FrameSize) -> Vec<Detection> {
        if frame.is_empty() {
            error!("Frame dimensions are zero. Cannot classify detections.");
            return Vec::new();
        }

        raw.iter()
            .filter_map(|detection| self.classify_one(detection, frame))
            .collect()
    }

    pub fn classify_one(&self, raw: &RawDetection, frame: FrameSize) -> Option<Detection> {
        if !raw.bbox.is_well_formed() {
            debug!("Dropping {}: malformed box {:?}", raw.class_name, raw.bbox);
            return None;
        }
        let Some(bbox) = raw.bbox.clip_to(frame) else {
            debug!("Dropping {}: box outside the frame", raw.class_name);
            return None;
        };

        let Some(info) = ClassInfo::lookup(&raw.class_name) else {
            debug!("Dropping {}: not relevant for navigation", raw.class_name);
            return None;
        };

        // Pixel voting only means something for traffic lights
        let confidence = match (raw.source, info.kind) {
            (DetectionSource::ColorHeuristic, DetectionType::TrafficLight) => {
                COLOR_HEURISTIC_CONFIDENCE
            }
            (DetectionSource::ColorHeuristic, _) => {
                debug!("Dropping {}: color heuristic on a non-light class", raw.class_name);
                return None;
            }
            (DetectionSource::Model, _) => raw.confidence,
        };
        if !(0.0..=1.0).contains(&confidence) {
            debug!("Dropping {}: confidence {} out of range", raw.class_name, confidence);
            return None;
        }
        let floor = self.confidence_floor(info.kind);
        if confidence < floor {
            debug!(
                "Dropping {}: confidence {:.2} below floor {:.2}",
                raw.class_name, confidence, floor
            );
            return None;
        }

        let distance = DistanceEstimate::from_bbox(&bbox, frame, self.thresholds.close_area_ratio)?;
        let danger_line = frame.height as f32 * (1.0 - self.thresholds.danger_zone_ratio);

        Some(Detection {
            bbox,
            class_name: raw.class_name.clone(),
            class_es: info.label_es.to_string(),
            confidence,
            kind: info.kind,
            state: match info.kind {
                DetectionType::TrafficLight => raw.state,
                _ => None,
            },
            relative_size: distance.relative_size,
            distance_meters: distance.meters,
            is_close: distance.is_close(self.thresholds.close_area_ratio),
            in_danger_zone: bbox.bottom() > danger_line,
            in_safe_zone: false,
        })
    }

    fn confidence_floor(&self, kind: DetectionType) -> f32 {
        match kind {
            DetectionType::Obstacle | DetectionType::Other => {
                self.thresholds.obstacle_min_confidence
            }
            DetectionType::Crosswalk => self.thresholds.crosswalk_min_confidence,
            DetectionType::TrafficLight => self.thresholds.traffic_light_min_confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::property::bbox::BoundingBox;
    use crate::detect::property::traffic_light::TrafficLightState;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    fn classifier() -> Classifier {
        Classifier::new(Thresholds::default())
    }

    #[test]
    fn annotates_end_to_end_car() {
        let raw = RawDetection::new("car", BoundingBox::new(280.0, 300.0, 100.0, 80.0), 0.8);
        let detection = classifier().classify_one(&raw, FRAME).unwrap();

        assert_eq!(detection.kind, DetectionType::Obstacle);
        assert_eq!(detection.class_es, "auto");
        assert!(!detection.is_close);
        assert!(detection.in_danger_zone);
        assert!(detection.is_dangerous(0.6));
    }

    #[test]
    fn applies_per_type_floors() {
        let c = classifier();
        let bbox = BoundingBox::new(10.0, 10.0, 50.0, 50.0);

        assert!(c.classify_one(&RawDetection::new("person", bbox, 0.45), FRAME).is_none());
        assert!(c.classify_one(&RawDetection::new("person", bbox, 0.5), FRAME).is_some());
        assert!(c.classify_one(&RawDetection::new("crosswalk", bbox, 0.35), FRAME).is_some());
        assert!(c.classify_one(&RawDetection::new("crosswalk", bbox, 0.25), FRAME).is_none());
        assert!(c.classify_one(&RawDetection::new("traffic light", bbox, 0.39), FRAME).is_none());
    }

    #[test]
    fn color_heuristic_uses_fixed_confidence() {
        let raw = RawDetection::new("traffic light", BoundingBox::new(10.0, 10.0, 20.0, 20.0), 0.0)
            .with_state(TrafficLightState::Red)
            .with_source(DetectionSource::ColorHeuristic);
        let detection = classifier().classify_one(&raw, FRAME).unwrap();

        assert_eq!(detection.confidence, COLOR_HEURISTIC_CONFIDENCE);
        assert_eq!(detection.state, Some(TrafficLightState::Red));
    }

    #[test]
    fn voted_light_passes_through_classifier() {
        let mut pixels = vec![[230, 20, 20]; 30];
        pixels.extend(std::iter::repeat([20, 20, 20]).take(70));
        let raw = RawDetection::traffic_light_from_pixels(BoundingBox::new(500.0, 10.0, 20.0, 50.0), &pixels);

        let detection = classifier().classify_one(&raw, FRAME).unwrap();
        assert_eq!(detection.kind, DetectionType::TrafficLight);
        assert_eq!(detection.state, Some(TrafficLightState::Red));
        assert_eq!(detection.confidence, COLOR_HEURISTIC_CONFIDENCE);

        let dark = RawDetection::traffic_light_from_pixels(
            BoundingBox::new(500.0, 10.0, 20.0, 50.0),
            &[[20, 20, 20]; 10],
        );
        assert_eq!(classifier().classify_one(&dark, FRAME).unwrap().state, None);
    }

    #[test]
    fn color_heuristic_on_other_classes_is_dropped() {
        let raw = RawDetection::new("car", BoundingBox::new(10.0, 10.0, 50.0, 50.0), 0.9)
            .with_source(DetectionSource::ColorHeuristic);
        assert!(classifier().classify_one(&raw, FRAME).is_none());
    }

    #[test]
    fn drops_malformed_and_irrelevant_input() {
        let raw = vec![
            RawDetection::new("car", BoundingBox::new(0.0, 0.0, -5.0, 10.0), 0.9),
            RawDetection::new("car", BoundingBox::new(f32::NAN, 0.0, 5.0, 10.0), 0.9),
            RawDetection::new("car", BoundingBox::new(700.0, 0.0, 5.0, 10.0), 0.9),
            RawDetection::new("car", BoundingBox::new(0.0, 0.0, 5.0, 10.0), 1.7),
            RawDetection::new("giraffe", BoundingBox::new(0.0, 0.0, 5.0, 10.0), 0.9),
            RawDetection::new("bench", BoundingBox::new(0.0, 0.0, 5.0, 10.0), 0.9),
        ];
        let detections = classifier().classify(&raw, FRAME);

        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class_es, "banco");
    }

    #[test]
    fn state_only_kept_for_traffic_lights() {
        let raw = RawDetection::new("person", BoundingBox::new(0.0, 0.0, 5.0, 10.0), 0.9)
            .with_state(TrafficLightState::Green);
        assert_eq!(classifier().classify_one(&raw, FRAME).unwrap().state, None);
    }

    #[test]
    fn empty_frame_yields_nothing() {
        let raw = vec![RawDetection::new("car", BoundingBox::new(0.0, 0.0, 5.0, 10.0), 0.9)];
        assert!(classifier().classify(&raw, FrameSize::new(0, 0)).is_empty());
    }
}
