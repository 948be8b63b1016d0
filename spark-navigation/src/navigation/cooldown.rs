use crate::config::{CooldownMode, NavigatorConfig};
use crate::navigation::instruction::{Instruction, InstructionKey};
use std::collections::HashMap;

/// Anti-spam rules applied to every candidate instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub window_ms: u64,
    pub override_priority: u8,
    pub mode: CooldownMode,
}

impl From<&NavigatorConfig> for CooldownPolicy {
    fn from(config: &NavigatorConfig) -> Self {
        Self {
            window_ms: config.cooldown_ms,
            override_priority: config.override_priority,
            mode: config.mode,
        }
    }
}

impl CooldownPolicy {
    pub fn overrides(&self, instruction: &Instruction) -> bool {
        instruction.priority >= self.override_priority
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Same type and action fired within the window.
    KeyCooldown { remaining_ms: u64 },
    /// Same text spoken within the window, whatever its key.
    RepeatedText { remaining_ms: u64 },
    /// Strict mode: speech is still playing.
    SpeechInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Emit,
    Suppress(Suppression),
}

/// Everything the arbiter remembers between frames. Reset when a navigation
/// session restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArbiterState {
    last_text: Option<(String, u64)>,
    last_emitted: HashMap<InstructionKey, u64>,
    danger: bool,
    speech_active: bool,
}

impl ArbiterState {
    pub fn check(&self, candidate: &Instruction, now_ms: u64, policy: &CooldownPolicy) -> Verdict {
        if policy.overrides(candidate) {
            return Verdict::Emit;
        }

        if policy.mode == CooldownMode::Strict && self.speech_active {
            return Verdict::Suppress(Suppression::SpeechInProgress);
        }

        let remaining = |since: u64| policy.window_ms.checked_sub(now_ms.saturating_sub(since));

        if let Some(&since) = self.last_emitted.get(&candidate.key()) {
            if let Some(remaining_ms) = remaining(since).filter(|&ms| ms > 0) {
                return Verdict::Suppress(Suppression::KeyCooldown { remaining_ms });
            }
        }

        if let Some((text, since)) = &self.last_text {
            if *text == candidate.text {
                if let Some(remaining_ms) = remaining(*since).filter(|&ms| ms > 0) {
                    return Verdict::Suppress(Suppression::RepeatedText { remaining_ms });
                }
            }
        }

        Verdict::Emit
    }

    pub fn record(&mut self, instruction: &Instruction, now_ms: u64) {
        self.last_emitted.insert(instruction.key(), now_ms);
        self.last_text = Some((instruction.text.clone(), now_ms));
        if instruction.is_danger() {
            self.danger = true;
        }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn last_emission(&self, key: InstructionKey) -> Option<u64> {
        self.last_emitted.get(&key).copied()
    }

    /// Whether the last warning that reached the user was a physical blockage.
    pub fn in_danger(&self) -> bool {
        self.danger
    }

    pub(crate) fn clear_danger(&mut self) {
        self.danger = false;
    }

    pub fn speech_active(&self) -> bool {
        self.speech_active
    }

    pub fn set_speech_active(&mut self, active: bool) {
        self.speech_active = active;
    }
}
