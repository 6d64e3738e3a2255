use serde::{Deserialize, Serialize};

/// A cumulative transcript delivered by the speech recognizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptUpdate {
    pub text: String,
    #[serde(default)]
    pub is_final: bool,
    /// Recognizer-assigned ordering. Updates without one are never
    /// considered stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

impl TranscriptUpdate {
    pub fn new(text: impl Into<String>, is_final: bool) -> Self {
        Self {
            text: text.into(),
            is_final,
            sequence: None,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// Everything that can happen to a session from the outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SessionEvent {
    Start,
    Pause,
    Resume,
    Stop,
    Tick,
    Transcript(TranscriptUpdate),
}
