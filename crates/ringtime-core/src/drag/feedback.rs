use serde::{Deserialize, Serialize};
use tracing::debug;

/// Haptic/animation cue requested by the scheduling core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Coarse tick when a dragged boundary crosses into another hour.
    Tick,
    /// Stronger cue when a committed task snaps to a different position.
    Snap,
    /// Gentle completion cue at the end of a drag.
    Soft,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Tick => "tick",
            FeedbackKind::Snap => "snap",
            FeedbackKind::Soft => "soft",
        }
    }
}

/// Fire-and-forget feedback channel. Implementations must not block.
pub trait FeedbackSink {
    fn emit_feedback(&mut self, kind: FeedbackKind);
}

/// Discards every signal.
impl FeedbackSink for () {
    fn emit_feedback(&mut self, _kind: FeedbackKind) {}
}

/// Records signals in order.
impl FeedbackSink for Vec<FeedbackKind> {
    fn emit_feedback(&mut self, kind: FeedbackKind) {
        self.push(kind);
    }
}

/// Logs every signal at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn emit_feedback(&mut self, kind: FeedbackKind) {
        debug!(?kind, "feedback");
    }
}
