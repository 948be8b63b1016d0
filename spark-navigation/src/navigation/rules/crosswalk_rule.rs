use crate::detect::property::category::DetectionType;
use crate::navigation::frame::FrameContext;
use crate::navigation::instruction::{Action, Instruction, InstructionType};
use crate::navigation::rules::Rule;
use crate::navigation::CROSSWALK_PRIORITY;

#[derive(Debug, Copy, Clone)]
pub struct CrosswalkRule;

impl Rule for CrosswalkRule {
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
        ctx.of_kind(DetectionType::Crosswalk)
            .any(|crosswalk| crosswalk.confidence >= ctx.thresholds.crosswalk_min_confidence)
            .then(|| {
                Instruction::new(
                    InstructionType::Crosswalk,
                    Action::Caution,
                    CROSSWALK_PRIORITY,
                    "Paso de peatones detectado. Verifica el tráfico antes de cruzar.",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::detect::property::bbox::BoundingBox;
    use crate::detect::property::detection::RawDetection;
    use crate::navigation::rules::fixtures::{scene, FRAME};

    #[test]
    fn announces_crosswalk() {
        let detections = scene(&[RawDetection::new(
            "crosswalk",
            BoundingBox::new(100.0, 380.0, 440.0, 60.0),
            0.35,
        )]);
        let ctx = FrameContext::new(&detections, FRAME, None, Thresholds::default());

        let instruction = CrosswalkRule.evaluate(&ctx).unwrap();
        assert_eq!(instruction.kind, InstructionType::Crosswalk);
        assert_eq!(instruction.priority, 5);
        assert_eq!(instruction.action, Action::Caution);
    }

    #[test]
    fn weak_crosswalk_is_dropped() {
        let detections = scene(&[RawDetection::new(
            "crosswalk",
            BoundingBox::new(100.0, 380.0, 440.0, 60.0),
            0.2,
        )]);
        let ctx = FrameContext::new(&detections, FRAME, None, Thresholds::default());
        assert!(CrosswalkRule.evaluate(&ctx).is_none());
    }
}
