use super::metrics_snapshot::MetricsSnapshot;
use super::session_summary::{MissedWord, SessionSummary};
use crate::alignment::domain::alignment_cursor::AlignmentCursor;
use crate::session::domain::session_clock::SessionClock;
use crate::shared::constants::SECONDS_PER_MINUTE;

pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Derives a snapshot from the live cursor and clock. Performs no mutation.
    pub fn snapshot(
        cursor: &AlignmentCursor,
        clock: &SessionClock,
        total_reference_words: usize,
    ) -> MetricsSnapshot {
        let words_read = cursor.matched_count;
        let elapsed_seconds = clock.elapsed_seconds();
        MetricsSnapshot {
            words_read,
            reading_speed_wpm: Self::reading_speed_wpm(words_read, elapsed_seconds),
            miscues: cursor.miscue_count,
            accuracy_percent: Self::accuracy_percent(total_reference_words, cursor.miscue_count),
            elapsed_seconds,
        }
    }

    /// Words per minute, rounded. Zero before any time has elapsed.
    pub fn reading_speed_wpm(words_read: usize, elapsed_seconds: u64) -> u32 {
        if elapsed_seconds == 0 {
            return 0;
        }
        let minutes = elapsed_seconds as f64 / SECONDS_PER_MINUTE;
        (words_read as f64 / minutes).round() as u32
    }

    /// Rounded share of reference words read without a miscue, in [0, 100].
    pub fn accuracy_percent(total_reference_words: usize, miscues: usize) -> f64 {
        if total_reference_words == 0 {
            return 0.0;
        }
        let correct = total_reference_words as f64 - miscues as f64;
        (correct / total_reference_words as f64 * 100.0)
            .round()
            .clamp(0.0, 100.0)
    }

    pub fn summarize(
        metrics: MetricsSnapshot,
        total_reference_words: usize,
        missed_words: Vec<MissedWord>,
        updates_applied: usize,
        final_updates: usize,
    ) -> SessionSummary {
        SessionSummary {
            metrics,
            total_reference_words,
            missed_words,
            updates_applied,
            final_updates,
        }
    }
}
