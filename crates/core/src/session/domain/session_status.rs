use serde::Serialize;

use super::session_clock::ClockState;
use crate::metrics::domain::metrics_snapshot::MetricsSnapshot;

/// Wire shape of a session at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub cursor_position: usize,
    pub state: ClockState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat_camel_case() {
        let status = SessionStatus {
            metrics: MetricsSnapshot {
                words_read: 42,
                reading_speed_wpm: 87,
                miscues: 5,
                accuracy_percent: 91.0,
                elapsed_seconds: 29,
            },
            cursor_position: 42,
            state: ClockState::Recording,
        };
        let value = serde_json::to_value(&status).unwrap();
        let expected = serde_json::json!({
            "wordsRead": 42,
            "readingSpeedWpm": 87,
            "miscues": 5,
            "accuracyPercent": 91.0,
            "elapsedSeconds": 29,
            "cursorPosition": 42,
            "state": "Recording"
        });
        assert_eq!(value, expected);
    }
}
