use crate::config::{CooldownMode, NavigatorConfig, Thresholds};
use crate::detect::property::detection::Detection;
use crate::detect::safe_zone::SafeZone;
use crate::detect::FrameSize;
use crate::navigation::cooldown::{ArbiterState, CooldownPolicy, Verdict};
use crate::navigation::frame::FrameContext;
use crate::navigation::instruction::Instruction;
use crate::navigation::rules::{ClearPathRule, Rule, RuleDispatcher};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

/// Whether the detector actually looked at the frame. An empty detection list
/// from a failed detector must not be mistaken for an empty scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorStatus {
    #[default]
    Ok,
    Failed,
}

/// Picks at most one instruction per frame and rate-limits what reaches the user.
///
/// One arbiter per navigation session. All cross-frame memory lives in its
/// [`ArbiterState`], so cloning an arbiter forks the session.
#[derive(Debug, Clone)]
pub struct Arbiter {
    policy: CooldownPolicy,
    thresholds: Thresholds,
    rules: Vec<RuleDispatcher>,
    state: ArbiterState,
}

impl Arbiter {
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            policy: CooldownPolicy::from(config),
            thresholds: config.thresholds,
            rules: RuleDispatcher::all(),
            state: ArbiterState::default(),
        }
    }

    /// Runs the priority chain over one classified frame.
    ///
    /// Args:
    ///     detections (&[Detection]): Output of the classifier, with `in_safe_zone` already set.
    ///     frame (FrameSize): Dimensions of the frame the detections refer to.
    ///     safe_zone (Option<&SafeZone>): Corridor for this frame, if any.
    ///     status (DetectorStatus): Whether the detector produced this list.
    ///     now_ms (u64): Wall-clock time of the frame in milliseconds.
    ///
    /// Returns:
    ///     Option<Instruction>: The instruction to render, or None when nothing
    ///     applies or the candidate is still cooling down.
    pub fn arbitrate(
        &mut self,
        detections: &[Detection],
        frame: FrameSize,
        safe_zone: Option<&SafeZone>,
        status: DetectorStatus,
        now_ms: u64,
    ) -> Option<Instruction> {
        if status == DetectorStatus::Failed {
            debug!("Detector failed at {now_ms}ms, skipping frame");
            return None;
        }
        if frame.is_empty() {
            error!("Frame dimensions are zero. Cannot arbitrate.");
            return None;
        }

        let ctx = FrameContext::new(detections, frame, safe_zone, self.thresholds);
        let candidate = self.rules.evaluate(&ctx);

        if self.state.in_danger() && self.is_calm(candidate.as_ref()) {
            return self.announce_safe(now_ms);
        }

        let candidate = candidate?;
        match self.state.check(&candidate, now_ms, &self.policy) {
            Verdict::Emit => {
                self.state.record(&candidate, now_ms);
                info!(
                    "Instruction [{}:{}] p{}: {}",
                    candidate.kind, candidate.action, candidate.priority, candidate.text
                );
                Some(candidate)
            }
            Verdict::Suppress(reason) => {
                debug!(
                    "Suppressed [{}:{}]: {:?}",
                    candidate.kind, candidate.action, reason
                );
                None
            }
        }
    }

    fn is_calm(&self, candidate: Option<&Instruction>) -> bool {
        candidate.map_or(true, |c| c.key() == ClearPathRule::instruction().key())
    }

    fn announce_safe(&mut self, now_ms: u64) -> Option<Instruction> {
        // Keep the pending transition until the current speech ends
        if self.policy.mode == CooldownMode::Strict && self.state.speech_active() {
            debug!("Safe transition deferred: speech in progress");
            return None;
        }

        let instruction = Instruction::safe_transition();
        self.state.record(&instruction, now_ms);
        self.state.clear_danger();
        info!("Danger cleared: {}", instruction.text);
        Some(instruction)
    }

    pub fn state(&self) -> &ArbiterState {
        &self.state
    }

    pub fn set_speech_active(&mut self, active: bool) {
        self.state.set_speech_active(active);
    }

    /// Forgets cooldowns, last text and the danger flag.
    pub fn reset(&mut self) {
        self.state = ArbiterState::default();
    }
}
