use crate::detect::property::direction::Direction;
use crate::navigation::{MAX_PRIORITY, SAFE_TRANSITION_PRIORITY};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionType {
    TrafficLight,
    Crosswalk,
    Obstacle,
    SafeZone,
}

impl Display for InstructionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructionType::TrafficLight => write!(f, "traffic_light"),
            InstructionType::Crosswalk => write!(f, "crosswalk"),
            InstructionType::Obstacle => write!(f, "obstacle"),
            InstructionType::SafeZone => write!(f, "safe_zone"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Stop,
    Caution,
    Go,
    Check,
    MoveLeft,
    MoveRight,
    None,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Stop => write!(f, "stop"),
            Action::Caution => write!(f, "caution"),
            Action::Go => write!(f, "go"),
            Action::Check => write!(f, "check"),
            Action::MoveLeft => write!(f, "move_left"),
            Action::MoveRight => write!(f, "move_right"),
            Action::None => write!(f, "none"),
        }
    }
}

impl Action {
    /// Vibration pulses a haptic renderer plays for this action.
    pub fn haptic_pulses(self) -> u8 {
        match self {
            Action::MoveLeft => 1,
            Action::MoveRight => 2,
            Action::Stop => 3,
            Action::Caution => 4,
            Action::Go | Action::Check | Action::None => 0,
        }
    }
}

/// Cooldown key: repeated emissions are tracked per type and action.
pub type InstructionKey = (InstructionType, Action);

/// A single spoken/haptic instruction. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub text: String,
    pub priority: u8,
    #[serde(rename = "type")]
    pub kind: InstructionType,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacle_count: Option<usize>,
}

impl Instruction {
    /// Priorities above `MAX_PRIORITY` are clamped.
    pub fn new(kind: InstructionType, action: Action, priority: u8, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: priority.min(MAX_PRIORITY),
            kind,
            action,
            direction: None,
            obstacle_count: None,
        }
    }

    pub fn toward(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_obstacle_count(mut self, count: usize) -> Self {
        self.obstacle_count = Some(count);
        self
    }

    /// One-shot confirmation that the path ahead is free again.
    pub fn safe_transition() -> Self {
        Self::new(
            InstructionType::SafeZone,
            Action::Go,
            SAFE_TRANSITION_PRIORITY,
            "Zona segura, puedes avanzar.",
        )
        .toward(Direction::Center)
    }

    pub fn key(&self) -> InstructionKey {
        (self.kind, self.action)
    }

    /// Physical-blockage warnings put the arbiter into its danger state.
    pub fn is_danger(&self) -> bool {
        matches!(self.kind, InstructionType::Obstacle | InstructionType::SafeZone)
            && matches!(
                self.action,
                Action::Stop | Action::Caution | Action::MoveLeft | Action::MoveRight
            )
    }
}
