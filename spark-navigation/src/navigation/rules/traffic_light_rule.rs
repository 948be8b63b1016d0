use crate::detect::property::category::DetectionType;
use crate::detect::property::traffic_light::TrafficLightState;
use crate::navigation::frame::FrameContext;
use crate::navigation::instruction::{Action, Instruction, InstructionType};
use crate::navigation::rules::Rule;

#[derive(Debug, Copy, Clone)]
pub struct TrafficLightRule;

impl TrafficLightRule {
    fn instruction_for(state: Option<TrafficLightState>) -> Instruction {
        let (action, priority, text) = match state {
            Some(TrafficLightState::Red) => (
                Action::Stop,
                10,
                "Semáforo en rojo. Espera antes de cruzar.",
            ),
            Some(TrafficLightState::Yellow) => {
                (Action::Caution, 9, "Semáforo en amarillo. Ten precaución.")
            }
            Some(TrafficLightState::Green) => (
                Action::Go,
                8,
                "Semáforo en verde. Puedes cruzar con precaución.",
            ),
            None => (
                Action::Check,
                7,
                "Semáforo detectado. Verifica el estado antes de cruzar.",
            ),
        };
        Instruction::new(InstructionType::TrafficLight, action, priority, text)
    }
}

impl Rule for TrafficLightRule {
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
        // With several lights in view the most restrictive one is announced
        ctx.of_kind(DetectionType::TrafficLight)
            .filter(|light| light.confidence >= ctx.thresholds.traffic_light_min_confidence)
            .map(|light| Self::instruction_for(light.state))
            .max_by_key(|instruction| instruction.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::detect::property::bbox::BoundingBox;
    use crate::detect::property::detection::RawDetection;
    use crate::navigation::rules::fixtures::{scene, FRAME};

    fn light(state: Option<TrafficLightState>, confidence: f32) -> RawDetection {
        let raw = RawDetection::new("traffic light", BoundingBox::new(300.0, 20.0, 20.0, 50.0), confidence);
        match state {
            Some(state) => raw.with_state(state),
            None => raw,
        }
    }

    fn evaluate(raw: &[RawDetection]) -> Option<Instruction> {
        let detections = scene(raw);
        TrafficLightRule.evaluate(&FrameContext::new(&detections, FRAME, None, Thresholds::default()))
    }

    #[test]
    fn maps_states_to_priorities() {
        let red = evaluate(&[light(Some(TrafficLightState::Red), 0.9)]).unwrap();
        assert_eq!((red.action, red.priority), (Action::Stop, 10));
        assert!(red.text.contains("rojo"));

        let yellow = evaluate(&[light(Some(TrafficLightState::Yellow), 0.9)]).unwrap();
        assert_eq!((yellow.action, yellow.priority), (Action::Caution, 9));

        let green = evaluate(&[light(Some(TrafficLightState::Green), 0.9)]).unwrap();
        assert_eq!((green.action, green.priority), (Action::Go, 8));

        let unknown = evaluate(&[light(None, 0.9)]).unwrap();
        assert_eq!((unknown.action, unknown.priority), (Action::Check, 7));
    }

    #[test]
    fn ignores_weak_lights() {
        assert!(evaluate(&[light(Some(TrafficLightState::Red), 0.3)]).is_none());
    }

    #[test]
    fn most_restrictive_light_wins() {
        let instruction = evaluate(&[
            light(Some(TrafficLightState::Green), 0.9),
            light(Some(TrafficLightState::Red), 0.5),
        ])
        .unwrap();
        assert_eq!(instruction.action, Action::Stop);
    }
}
