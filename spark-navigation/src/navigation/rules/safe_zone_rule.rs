use crate::detect::property::direction::Direction;
use crate::navigation::frame::FrameContext;
use crate::navigation::instruction::{Action, Instruction, InstructionType};
use crate::navigation::rules::{capitalize, Rule};
use crate::navigation::BLOCKING_OBSTACLE_PRIORITY;

/// Steers the walker around the closest obstacle inside the corridor.
///
/// Runs ahead of the side-obstacle rule: something blocking the literal walking
/// path outranks obstacles that are merely nearby.
#[derive(Debug, Copy, Clone)]
pub struct SafeZoneRule;

impl Rule for SafeZoneRule {
    fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
        let zone = ctx.safe_zone?;
        let blocking = ctx.corridor_obstacles();
        let obstacle = blocking.first()?;
        let label = capitalize(&obstacle.class_es);

        // Direction names the side the obstacle occupies, the action points away from it
        let (action, side, text) = if obstacle.bbox.center_x() < zone.center_x() {
            (
                Action::MoveRight,
                Direction::Left,
                format!("{label} bloqueando tu camino. Muévete a la derecha."),
            )
        } else {
            (
                Action::MoveLeft,
                Direction::Right,
                format!("{label} bloqueando tu camino. Muévete a la izquierda."),
            )
        };

        Some(
            Instruction::new(InstructionType::SafeZone, action, BLOCKING_OBSTACLE_PRIORITY, text)
                .toward(side)
                .with_obstacle_count(blocking.len()),
        )
    }
}
