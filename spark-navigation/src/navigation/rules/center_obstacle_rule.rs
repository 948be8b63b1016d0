use crate::detect::property::direction::Direction;
use crate::navigation::frame::{closest, FrameContext};
use crate::navigation::instruction::{Action, Instruction, InstructionType};
use crate::navigation::rules::Rule;
use crate::navigation::BLOCKING_OBSTACLE_PRIORITY;

/// A dangerous obstacle straight ahead stops the walker.
#[derive(Debug, Copy, Clone)]
pub struct CenterObstacleRule;

impl Rule for CenterObstacleRule {
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
        let obstacle = closest(&ctx.center)?;
        Some(
            Instruction::new(
                InstructionType::Obstacle,
                Action::Stop,
                BLOCKING_OBSTACLE_PRIORITY,
                format!(
                    "Obstáculo {} directamente adelante. Detente o busca una ruta alternativa.",
                    obstacle.class_es
                ),
            )
            .toward(Direction::Center),
        )
    }
}
