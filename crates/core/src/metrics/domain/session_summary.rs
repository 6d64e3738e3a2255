use serde::Serialize;

use super::metrics_snapshot::MetricsSnapshot;

/// A reference word the reader never produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedWord {
    pub reference_index: usize,
    pub display_text: String,
}

/// Final result of a stopped session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub total_reference_words: usize,
    pub missed_words: Vec<MissedWord>,
    pub updates_applied: usize,
    pub final_updates: usize,
}
