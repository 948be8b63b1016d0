use crate::config::NavigatorConfig;
use crate::detect::classifier::Classifier;
use crate::detect::property::detection::{Detection, RawDetection};
use crate::detect::safe_zone::{SafeZone, SafeZoneBuilder};
use crate::detect::{FrameSize, ObjectDetector};
use crate::navigation::arbiter::{Arbiter, DetectorStatus};
use crate::navigation::instruction::Instruction;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One captured frame as it crosses the process boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp_ms: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub detections: Vec<RawDetection>,
    #[serde(default)]
    pub status: DetectorStatus,
    /// Corridor supplied by the caller; built from the configuration when absent.
    #[serde(default)]
    pub safe_zone: Option<SafeZone>,
}

impl Frame {
    pub fn new(timestamp_ms: u64, width: u32, height: u32, detections: Vec<RawDetection>) -> Self {
        Self {
            timestamp_ms,
            width,
            height,
            detections,
            status: DetectorStatus::Ok,
            safe_zone: None,
        }
    }

    /// A frame the detector could not analyse.
    pub fn failed(timestamp_ms: u64, width: u32, height: u32) -> Self {
        Self {
            status: DetectorStatus::Failed,
            ..Self::new(timestamp_ms, width, height, Vec::new())
        }
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }
}

/// Everything computed for a frame, for drawing overlays or logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub detections: Vec<Detection>,
    pub safe_zone: Option<SafeZone>,
    pub instruction: Option<Instruction>,
}

/// Classifier, corridor builder and arbiter wired together for one session.
#[derive(Debug, Clone)]
pub struct Navigator {
    config: NavigatorConfig,
    classifier: Classifier,
    zone_builder: SafeZoneBuilder,
    arbiter: Arbiter,
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            classifier: Classifier::new(config.thresholds),
            zone_builder: SafeZoneBuilder::new(config.safe_zone),
            arbiter: Arbiter::new(&config),
            config,
        }
    }

    /// Classifies the raw detections and decides what to tell the user.
    ///
    /// A caller-supplied `safe_zone` replaces the configured corridor for this frame.
    pub fn process(
        &mut self,
        detections: &[RawDetection],
        frame_width: u32,
        frame_height: u32,
        safe_zone: Option<SafeZone>,
        now_ms: u64,
    ) -> Option<Instruction> {
        let size = FrameSize::new(frame_width, frame_height);
        self.run(detections, size, safe_zone, DetectorStatus::Ok, now_ms)
            .instruction
    }

    pub fn process_frame(&mut self, frame: &Frame) -> FrameOutcome {
        self.run(
            &frame.detections,
            frame.size(),
            frame.safe_zone.clone(),
            frame.status,
            frame.timestamp_ms,
        )
    }

    /// Runs the detector on `image` and processes its output. Detector errors
    /// become a failed frame rather than an empty scene.
    pub fn observe<D: ObjectDetector>(
        &mut self,
        detector: &D,
        image: &D::Image,
        frame_width: u32,
        frame_height: u32,
        now_ms: u64,
    ) -> FrameOutcome {
        let frame = match detector.detect(image) {
            Ok(detections) => Frame::new(now_ms, frame_width, frame_height, detections),
            Err(e) => {
                warn!("Detector failed: {e:#}");
                Frame::failed(now_ms, frame_width, frame_height)
            }
        };
        self.process_frame(&frame)
    }

    fn run(
        &mut self,
        raw: &[RawDetection],
        size: FrameSize,
        safe_zone: Option<SafeZone>,
        status: DetectorStatus,
        now_ms: u64,
    ) -> FrameOutcome {
        if status == DetectorStatus::Failed || size.is_empty() {
            let instruction = self.arbiter.arbitrate(&[], size, None, status, now_ms);
            return FrameOutcome {
                detections: Vec::new(),
                safe_zone: None,
                instruction,
            };
        }

        let mut detections = self.classifier.classify(raw, size);
        let mut zone = match safe_zone {
            Some(zone) if zone.is_well_formed() => zone,
            Some(_) => {
                warn!("Ignoring malformed safe zone, using the configured corridor");
                self.zone_builder.build(size, &detections)
            }
            None => self.zone_builder.build(size, &detections),
        };
        zone.apply(&mut detections);

        let instruction = self
            .arbiter
            .arbitrate(&detections, size, Some(&zone), status, now_ms);

        FrameOutcome {
            detections,
            safe_zone: Some(zone),
            instruction,
        }
    }

    /// Starts a new navigation session: cooldowns, danger flag, speech flag and
    /// corridor smoothing are all forgotten.
    pub fn reset(&mut self) {
        self.arbiter.reset();
        self.zone_builder.reset();
        info!("Navigation session reset");
    }

    /// Renderer feedback used by the strict cooldown mode.
    pub fn set_speech_active(&mut self, active: bool) {
        self.arbiter.set_speech_active(active);
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}
