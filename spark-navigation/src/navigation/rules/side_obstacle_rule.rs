use crate::detect::property::direction::Direction;
use crate::navigation::frame::{closest, FrameContext};
use crate::navigation::instruction::{Action, Instruction, InstructionType};
use crate::navigation::rules::Rule;
use crate::navigation::{BOTH_SIDES_PRIORITY, SIDE_OBSTACLE_PRIORITY};

#[derive(Debug, Copy, Clone)]
pub struct SideObstacleRule;

impl Rule for SideObstacleRule {
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
        match (closest(&ctx.left), closest(&ctx.right)) {
            (Some(_), Some(_)) => Some(
                Instruction::new(
                    InstructionType::Obstacle,
                    Action::Caution,
                    BOTH_SIDES_PRIORITY,
                    "Obstáculos a ambos lados. Continúa con precaución.",
                )
                .toward(Direction::Both),
            ),
            (Some(left), None) => Some(
                Instruction::new(
                    InstructionType::Obstacle,
                    Action::MoveRight,
                    SIDE_OBSTACLE_PRIORITY,
                    format!(
                        "Obstáculo {} a la izquierda. Muévete ligeramente a la derecha.",
                        left.class_es
                    ),
                )
                .toward(Direction::Left),
            ),
            (None, Some(right)) => Some(
                Instruction::new(
                    InstructionType::Obstacle,
                    Action::MoveLeft,
                    SIDE_OBSTACLE_PRIORITY,
                    format!(
                        "Obstáculo {} a la derecha. Muévete ligeramente a la izquierda.",
                        right.class_es
                    ),
                )
                .toward(Direction::Right),
            ),
            (None, None) => None,
        }
    }
}
