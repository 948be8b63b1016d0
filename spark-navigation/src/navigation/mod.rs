pub mod arbiter;
pub mod cooldown;
pub mod frame;
pub mod instruction;
pub(crate) mod rules;

/// Priority of the corridor-clear confirmation.
pub(crate) const CLEAR_PATH_PRIORITY: u8 = 3;
/// Priority of the one-shot message emitted when danger gives way to a safe scene.
pub(crate) const SAFE_TRANSITION_PRIORITY: u8 = 4;
pub(crate) const CROSSWALK_PRIORITY: u8 = 5;
pub(crate) const SIDE_OBSTACLE_PRIORITY: u8 = 6;
pub(crate) const BOTH_SIDES_PRIORITY: u8 = 7;
pub(crate) const BLOCKING_OBSTACLE_PRIORITY: u8 = 9;
pub(crate) const MAX_PRIORITY: u8 = 10;
