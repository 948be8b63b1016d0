mod center_obstacle_rule;
mod clear_path_rule;
mod crosswalk_rule;
mod safe_zone_rule;
mod side_obstacle_rule;
mod traffic_light_rule;
#[macro_use]
mod dispatch_macro;

use crate::navigation::frame::FrameContext;
use crate::navigation::instruction::Instruction;
use crate::navigation::rules::center_obstacle_rule::CenterObstacleRule;
pub(crate) use crate::navigation::rules::clear_path_rule::ClearPathRule;
use crate::navigation::rules::crosswalk_rule::CrosswalkRule;
use crate::navigation::rules::safe_zone_rule::SafeZoneRule;
use crate::navigation::rules::side_obstacle_rule::SideObstacleRule;
use crate::navigation::rules::traffic_light_rule::TrafficLightRule;

/// One step of the priority chain.
pub trait Rule {
    /// Returns the candidate instruction for this frame if the rule applies.
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction>;
}

// Evaluation order is the priority order: the first rule that fires wins.
define_rules![
    TrafficLight => TrafficLightRule,
    CenterObstacle => CenterObstacleRule,
    SafeZone => SafeZoneRule,
    SideObstacle => SideObstacleRule,
    Crosswalk => CrosswalkRule,
    ClearPath => ClearPathRule,
];

/// Capitalizes the first letter of a spoken label.
fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}


#[cfg(test)]
pub(crate) mod fixtures {
    use crate::config::Thresholds;
    use crate::detect::classifier::Classifier;
    use crate::detect::property::detection::{Detection, RawDetection};
    use crate::detect::FrameSize;

    pub const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    pub fn scene(raw: &[RawDetection]) -> Vec<Detection> {
        Classifier::new(Thresholds::default()).classify(raw, FRAME)
    }
}
