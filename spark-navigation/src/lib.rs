//! Navigation decision engine: turns per-frame object detections into at most one
//! prioritized, rate-limited instruction for a visually-impaired pedestrian.

pub mod config;
pub mod detect;
pub mod error;
pub mod navigation;
pub mod navigator;

pub use config::{CooldownMode, NavigatorConfig, SafeZoneConfig, Thresholds};
pub use detect::property::bbox::BoundingBox;
pub use detect::property::category::DetectionType;
pub use detect::property::detection::{Detection, DetectionSource, RawDetection};
pub use detect::property::direction::Direction;
pub use detect::property::traffic_light::TrafficLightState;
pub use detect::safe_zone::{Point, SafeZone};
pub use detect::{FrameSize, ObjectDetector};
pub use error::{NavigationError, Result};
pub use navigation::arbiter::{Arbiter, DetectorStatus};
pub use navigation::instruction::{Action, Instruction, InstructionType};
pub use navigator::{Frame, FrameOutcome, Navigator};
