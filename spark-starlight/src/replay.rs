use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use spark_navigation::{DetectorStatus, Frame, FrameOutcome, Navigator, RawDetection, SafeZone};
use std::path::Path;

/// One line of a recorded session.
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    timestamp_ms: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    detections: Vec<RawDetection>,
    #[serde(default)]
    detector_failed: bool,
    #[serde(default)]
    safe_zone: Option<SafeZone>,
    /// Whether the renderer was still speaking when this frame arrived.
    #[serde(default)]
    speech_active: Option<bool>,
}

/// A recorded frame plus the renderer feedback captured alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub frame: Frame,
    /// Absent when the recording did not capture speech state; the previous value is kept.
    pub speech_active: Option<bool>,
}

impl From<RecordedFrame> for ReplayFrame {
    fn from(recorded: RecordedFrame) -> Self {
        let frame = Frame {
            timestamp_ms: recorded.timestamp_ms,
            width: recorded.width,
            height: recorded.height,
            detections: recorded.detections,
            status: if recorded.detector_failed {
                DetectorStatus::Failed
            } else {
                DetectorStatus::Ok
            },
            safe_zone: recorded.safe_zone,
        };
        Self {
            frame,
            speech_active: recorded.speech_active,
        }
    }
}

/// Parses a JSON-lines recording. Blank lines are ignored and unparsable lines
/// are skipped with a warning.
pub fn parse_frames(content: &str) -> Vec<ReplayFrame> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str::<RecordedFrame>(line) {
            Ok(recorded) => Some(ReplayFrame::from(recorded)),
            Err(e) => {
                warn!("Skipping line {}: {e}", index + 1);
                None
            }
        })
        .collect()
}

/// Forwards recorded speech state to the navigator, then processes the frame.
pub fn apply(navigator: &mut Navigator, replay: &ReplayFrame) -> FrameOutcome {
    if let Some(active) = replay.speech_active {
        navigator.set_speech_active(active);
    }
    navigator.process_frame(&replay.frame)
}

pub fn load_frames(path: &Path) -> Result<Vec<ReplayFrame>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recording {}", path.display()))?;
    let frames = parse_frames(&content);
    info!("Loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}
