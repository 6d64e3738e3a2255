use serde::Serialize;

/// Point-in-time reading metrics. Recomputed on demand, never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub words_read: usize,
    pub reading_speed_wpm: u32,
    pub miscues: usize,
    pub accuracy_percent: f64,
    pub elapsed_seconds: u64,
}
