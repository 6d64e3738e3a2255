use serde::{Deserialize, Serialize};

use super::alignment_cursor::AlignmentCursor;
use super::transcript_snapshot::TranscriptSnapshot;
use crate::matching::domain::word_matcher::MatchPolicy;
use crate::shared::constants::DEFAULT_RESYNC_WINDOW;
use crate::text::domain::reference_token::ReferenceToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignmentConfig {
    pub policy: MatchPolicy,
    /// How many reference words past the expected one a spoken word may
    /// match to resynchronize. Zero never skips reference words.
    pub resync_window: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            resync_window: DEFAULT_RESYNC_WINDOW,
        }
    }
}

/// Result of one miscue pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MiscueReport {
    pub count: usize,
    /// Reference words the reader passed over or never reached, as indices
    /// into the matchable words, ascending.
    pub missed_positions: Vec<usize>,
}

/// Outcome of walking a transcript against the reference.
struct Walk {
    reached: usize,
    /// Spoken words up to and including the last one that moved `reached`.
    consumed: usize,
    /// Spoken words that matched no reference word.
    unmatched: usize,
    skipped: Vec<usize>,
}

/// Greedy two-pointer aligner over the matchable reference words.
///
/// The live cursor and the miscue count come from two independent passes
/// over the current transcript. They can disagree once the recognizer
/// revises earlier words: the cursor keeps the furthest position it has
/// ever reached while the miscue pass follows only the latest transcript.
#[derive(Clone, Debug)]
pub struct AlignmentEngine {
    reference_words: Vec<String>,
    config: AlignmentConfig,
}

impl AlignmentEngine {
    /// Builds the engine from the matchable subsequence of `tokens`.
    pub fn new(tokens: &[ReferenceToken], config: AlignmentConfig) -> Self {
        let reference_words = tokens
            .iter()
            .filter(|t| t.is_matchable)
            .map(|t| t.normalized_text.clone())
            .collect();
        Self {
            reference_words,
            config,
        }
    }

    pub fn reference_words(&self) -> &[String] {
        &self.reference_words
    }

    pub fn len(&self) -> usize {
        self.reference_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference_words.is_empty()
    }

    /// Live cursor pass. Returns whether `reference_pos` moved.
    ///
    /// The whole transcript is walked from the first reference word. When
    /// that walk does not get past the cursor, typically because a final
    /// result rewrote words the cursor already passed, the walk continues
    /// from the cursor and the spoken words it had consumed. An empty
    /// snapshot leaves the cursor untouched and applying the same snapshot
    /// again is a no-op.
    pub fn advance(&self, cursor: &mut AlignmentCursor, snapshot: &TranscriptSnapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        let words = snapshot.words();
        let mut walk = self.walk(words, 0, 0);
        if walk.reached <= cursor.reference_pos {
            walk = self.walk(words, cursor.reference_pos, cursor.transcript_pos);
        }
        if walk.reached <= cursor.reference_pos {
            return false;
        }
        cursor.reference_pos = walk.reached;
        cursor.transcript_pos = walk.consumed;
        cursor.matched_count = walk.reached;
        true
    }

    /// Miscue pass, recomputed from the first reference word.
    ///
    /// Every spoken word that matches neither the expected word nor a word
    /// within the resync window is a miscue. Reference words skipped by a
    /// resync are reported as missed without adding to the count. With
    /// `include_unreached`, reference words the pass never reached are added
    /// to both, which is how a stopped session is scored.
    pub fn count_miscues(
        &self,
        snapshot: &TranscriptSnapshot,
        include_unreached: bool,
    ) -> MiscueReport {
        let Walk {
            reached,
            unmatched,
            skipped: mut missed_positions,
            ..
        } = self.walk(snapshot.words(), 0, 0);
        let mut count = unmatched;
        if include_unreached {
            count += self.len() - reached;
            missed_positions.extend(reached..self.len());
        }
        MiscueReport {
            count,
            missed_positions,
        }
    }

    fn walk(&self, transcript: &[String], ref_start: usize, spoken_start: usize) -> Walk {
        let mut ref_idx = ref_start;
        let mut spoken_idx = spoken_start;
        let mut consumed = spoken_start;
        let mut unmatched = 0;
        let mut skipped = Vec::new();

        while ref_idx < self.len() && spoken_idx < transcript.len() {
            let spoken = &transcript[spoken_idx];
            spoken_idx += 1;
            if self.config.policy.matches(spoken, &self.reference_words[ref_idx]) {
                ref_idx += 1;
            } else if let Some(offset) = self.resync_offset(spoken, ref_idx) {
                skipped.extend(ref_idx..ref_idx + offset);
                ref_idx += offset + 1;
            } else {
                unmatched += 1;
                continue;
            }
            consumed = spoken_idx;
        }

        Walk {
            reached: ref_idx,
            consumed,
            unmatched,
            skipped,
        }
    }

    /// Nearest reference word after `ref_idx`, within the resync window,
    /// that `spoken` matches.
    fn resync_offset(&self, spoken: &str, ref_idx: usize) -> Option<usize> {
        (1..=self.config.resync_window)
            .take_while(|offset| ref_idx + offset < self.len())
            .find(|offset| {
                self.config
                    .policy
                    .matches(spoken, &self.reference_words[ref_idx + offset])
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::domain::normalizer::tokenize;

    fn engine(reference: &str) -> AlignmentEngine {
        AlignmentEngine::new(&tokenize(reference), AlignmentConfig::default())
    }

    fn strict_engine(reference: &str) -> AlignmentEngine {
        let config = AlignmentConfig {
            resync_window: 0,
            ..AlignmentConfig::default()
        };
        AlignmentEngine::new(&tokenize(reference), config)
    }

    fn snapshot(text: &str) -> TranscriptSnapshot {
        TranscriptSnapshot::from_text(text, false)
    }

    #[test]
    fn test_skips_unmatchable_tokens() {
        let e = engine("Wait -- what ?");
        assert_eq!(e.reference_words(), &["wait", "what"]);
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn test_perfect_reading_advances_to_end() {
        let e = engine("the quick brown fox");
        let mut cursor = AlignmentCursor::default();
        assert!(e.advance(&mut cursor, &snapshot("the quick brown fox")));
        assert_eq!(cursor.reference_pos, 4);
        assert_eq!(cursor.matched_count, 4);
        assert_eq!(cursor.transcript_pos, 4);
    }

    #[test]
    fn test_empty_snapshot_is_noop() {
        let e = engine("the quick brown fox");
        let mut cursor = AlignmentCursor {
            reference_pos: 2,
            transcript_pos: 2,
            matched_count: 2,
            miscue_count: 0,
        };
        let before = cursor;
        assert!(!e.advance(&mut cursor, &snapshot("")));
        assert_eq!(cursor, before);
    }

    #[test]
    fn test_short_transcript_stalls_cursor() {
        let e = engine("the quick brown fox");
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("the quick"));
        assert_eq!(cursor.reference_pos, 2);
    }

    #[test]
    fn test_mismatch_stalls_until_resync() {
        let e = engine("the quick brown fox");
        let mut cursor = AlignmentCursor::default();

        assert!(!e.advance(&mut cursor, &snapshot("da")));
        assert_eq!(cursor.reference_pos, 0);

        assert!(e.advance(&mut cursor, &snapshot("da quick")));
        assert_eq!(cursor.reference_pos, 2);

        e.advance(&mut cursor, &snapshot("da quick brown fox"));
        assert_eq!(cursor.reference_pos, 4);
    }

    #[test]
    fn test_strict_engine_never_skips_reference_words() {
        let e = strict_engine("the quick brown fox");
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("da quick brown fox"));
        assert_eq!(cursor.reference_pos, 0);
    }

    #[test]
    fn test_cursor_never_moves_backward_on_revision() {
        let e = engine("the quick brown fox");
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("the quick brown"));
        assert_eq!(cursor.reference_pos, 3);

        assert!(!e.advance(&mut cursor, &snapshot("the")));
        assert_eq!(cursor.reference_pos, 3);
    }

    #[test]
    fn test_reapplying_same_snapshot_is_idempotent() {
        let e = engine("a b a b");
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("a b"));
        let first = cursor;
        assert!(!e.advance(&mut cursor, &snapshot("a b")));
        assert_eq!(cursor, first);
    }

    #[test]
    fn test_revised_leading_words_do_not_freeze_cursor() {
        let e = engine("the quick brown fox jumps over the lazy dog");
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("the quick"));
        assert_eq!(cursor.reference_pos, 2);

        let revised = snapshot("a kwik brown fox jumps over the lazy dog");
        assert!(e.advance(&mut cursor, &revised));
        assert_eq!(cursor.reference_pos, 9);
        assert_eq!(cursor.transcript_pos, 9);

        assert!(!e.advance(&mut cursor, &revised));
        assert_eq!(cursor.reference_pos, 9);
    }

    #[test]
    fn test_transcript_pos_stops_at_last_match() {
        let e = engine("the quick brown fox");
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("the quick zzz"));
        assert_eq!(cursor.reference_pos, 2);
        assert_eq!(cursor.transcript_pos, 2);
    }

    #[test]
    fn test_inserted_word_is_a_miscue() {
        let e = engine("the quick brown fox");
        let report = e.count_miscues(&snapshot("the um quick brown fox"), true);
        assert_eq!(report.count, 1);
        assert!(report.missed_positions.is_empty());
    }

    #[test]
    fn test_substituted_word_counts_once() {
        let e = engine("the quick brown fox");
        let report = e.count_miscues(&snapshot("da quick brown fox"), true);
        assert_eq!(report.count, 1);
        assert_eq!(report.missed_positions, vec![0]);
    }

    #[test]
    fn test_strict_miscue_pass_counts_every_unmatched_word() {
        let e = strict_engine("the quick brown fox");
        let report = e.count_miscues(&snapshot("da quick brown fox"), true);
        // four unmatched spoken words plus four unreached reference words
        assert_eq!(report.count, 8);
        assert_eq!(report.missed_positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unreached_words_count_only_when_requested() {
        let e = engine("the quick brown fox");
        let live = e.count_miscues(&snapshot("the quick"), false);
        assert_eq!(live.count, 0);

        let final_report = e.count_miscues(&snapshot("the quick"), true);
        assert_eq!(final_report.count, 2);
        assert_eq!(final_report.missed_positions, vec![2, 3]);
    }

    #[test]
    fn test_empty_transcript_counts_whole_passage_when_final() {
        let e = engine("the quick brown fox");
        assert_eq!(e.count_miscues(&snapshot(""), false).count, 0);
        assert_eq!(e.count_miscues(&snapshot(""), true).count, 4);
    }

    #[test]
    fn test_wider_window_recovers_skipped_line() {
        let config = AlignmentConfig {
            resync_window: 3,
            ..AlignmentConfig::default()
        };
        let e = AlignmentEngine::new(&tokenize("one two three four five"), config);
        let mut cursor = AlignmentCursor::default();
        e.advance(&mut cursor, &snapshot("one five"));
        assert_eq!(cursor.reference_pos, 5);
        let report = e.count_miscues(&snapshot("one five"), true);
        assert_eq!(report.count, 0);
        assert_eq!(report.missed_positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_unmatched_words_can_exceed_reference_length() {
        let e = engine("the quick brown fox");
        let report = e.count_miscues(&snapshot("zzz yyy xxx www vvv uuu"), true);
        assert_eq!(report.count, 10);
        assert_eq!(report.missed_positions, vec![0, 1, 2, 3]);
    }
}
