use crate::detect::property::direction::Direction;
use crate::navigation::frame::FrameContext;
use crate::navigation::instruction::{Action, Instruction, InstructionType};
use crate::navigation::rules::Rule;
use crate::navigation::CLEAR_PATH_PRIORITY;

/// Positive confirmation when something is in view but the corridor is free.
/// An empty frame stays silent.
#[derive(Debug, Copy, Clone)]
pub struct ClearPathRule;

impl ClearPathRule {
    pub fn instruction() -> Instruction {
        Instruction::new(
            InstructionType::SafeZone,
            Action::None,
            CLEAR_PATH_PRIORITY,
            "Zona segura libre. Sigue recto.",
        )
        .toward(Direction::Center)
    }
}

impl Rule for ClearPathRule {
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
        let zone = ctx.safe_zone?;
        (!ctx.detections.is_empty() && zone.is_clear).then(Self::instruction)
    }
}
