use super::session_clock::{ClockState, SessionClock};
use super::session_error::{InvalidReferenceError, InvalidStateTransition};
use super::session_event::TranscriptUpdate;
use super::session_status::SessionStatus;
use crate::alignment::domain::alignment_cursor::AlignmentCursor;
use crate::alignment::domain::alignment_engine::{AlignmentConfig, AlignmentEngine};
use crate::alignment::domain::transcript_snapshot::TranscriptSnapshot;
use crate::metrics::domain::metrics_aggregator::MetricsAggregator;
use crate::metrics::domain::metrics_snapshot::MetricsSnapshot;
use crate::metrics::domain::session_summary::{MissedWord, SessionSummary};
use crate::text::domain::normalizer::tokenize;
use crate::text::domain::reference_token::ReferenceToken;

/// One reader working through one reference passage.
///
/// Owns every piece of mutable state: the alignment cursor, the clock and the
/// latest transcript. Events are applied one at a time through `&mut self`;
/// once stopped, nothing changes any more.
pub struct Session {
    tokens: Vec<ReferenceToken>,
    /// Token index of each matchable word, in order.
    matchable_indices: Vec<usize>,
    engine: AlignmentEngine,
    cursor: AlignmentCursor,
    clock: SessionClock,
    transcript: TranscriptSnapshot,
    missed_positions: Vec<usize>,
    updates_applied: usize,
    final_updates: usize,
}

impl Session {
    pub fn new(reference_text: &str) -> Result<Self, InvalidReferenceError> {
        Self::with_config(reference_text, AlignmentConfig::default())
    }

    pub fn with_config(
        reference_text: &str,
        config: AlignmentConfig,
    ) -> Result<Self, InvalidReferenceError> {
        let tokens = tokenize(reference_text);
        if tokens.is_empty() {
            return Err(InvalidReferenceError::Empty);
        }
        let engine = AlignmentEngine::new(&tokens, config);
        if engine.is_empty() {
            return Err(InvalidReferenceError::NoMatchableWords);
        }
        let matchable_indices = tokens
            .iter()
            .filter(|t| t.is_matchable)
            .map(|t| t.reference_index)
            .collect();

        log::debug!(
            "Session created: {} tokens, {} matchable words",
            tokens.len(),
            engine.len()
        );

        Ok(Self {
            tokens,
            matchable_indices,
            engine,
            cursor: AlignmentCursor::default(),
            clock: SessionClock::new(),
            transcript: TranscriptSnapshot::default(),
            missed_positions: Vec::new(),
            updates_applied: 0,
            final_updates: 0,
        })
    }

    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        self.clock.start()?;
        log::info!("Reading session started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        self.clock.pause()?;
        log::info!("Reading session paused at {}s", self.clock.elapsed_seconds());
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        self.clock.resume()?;
        log::info!("Reading session resumed");
        Ok(())
    }

    /// Stops the session and scores it: reference words the reader never
    /// reached become miscues. Everything is frozen afterwards.
    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.clock.stop()?;
        let report = self.engine.count_miscues(&self.transcript, true);
        self.cursor.miscue_count = report.count;
        self.missed_positions = report.missed_positions;
        log::info!(
            "Reading session stopped after {}s: {}/{} words, {} miscues",
            self.clock.elapsed_seconds(),
            self.cursor.matched_count,
            self.engine.len(),
            self.cursor.miscue_count
        );
        Ok(())
    }

    /// Advances the clock by one second while recording.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    /// Applies a cumulative transcript. Returns whether it was applied.
    pub fn on_transcript_update(&mut self, text: &str) -> bool {
        self.apply_snapshot(TranscriptSnapshot::from_text(text, false))
    }

    /// Like [`Session::on_transcript_update`], also tracking whether the
    /// recognizer marked the text final.
    pub fn on_recognizer_update(&mut self, update: &TranscriptUpdate) -> bool {
        self.apply_snapshot(TranscriptSnapshot::from_text(&update.text, update.is_final))
    }

    fn apply_snapshot(&mut self, snapshot: TranscriptSnapshot) -> bool {
        match self.clock.state() {
            ClockState::Recording | ClockState::Paused => {}
            state => {
                log::debug!("Ignoring transcript update while {state}");
                return false;
            }
        }
        if snapshot.is_empty() {
            return false;
        }

        if self.engine.advance(&mut self.cursor, &snapshot) {
            log::debug!(
                "Cursor advanced to {}/{}",
                self.cursor.reference_pos,
                self.engine.len()
            );
        }
        self.cursor.miscue_count = self.engine.count_miscues(&snapshot, false).count;

        self.updates_applied += 1;
        if snapshot.is_final() {
            self.final_updates += 1;
        }
        self.transcript = snapshot;
        true
    }

    pub fn current_snapshot(&self) -> MetricsSnapshot {
        MetricsAggregator::snapshot(&self.cursor, &self.clock, self.engine.len())
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            metrics: self.current_snapshot(),
            cursor_position: self.cursor_position(),
            state: self.state(),
        }
    }

    /// Index of the next expected matchable word.
    pub fn cursor_position(&self) -> usize {
        self.cursor.reference_pos
    }

    /// The reference token to highlight, or `None` once the passage is done.
    pub fn next_expected_token(&self) -> Option<&ReferenceToken> {
        self.matchable_indices
            .get(self.cursor.reference_pos)
            .map(|&i| &self.tokens[i])
    }

    pub fn reference_tokens(&self) -> &[ReferenceToken] {
        &self.tokens
    }

    pub fn total_reference_words(&self) -> usize {
        self.engine.len()
    }

    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn cursor(&self) -> &AlignmentCursor {
        &self.cursor
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Final summary, available once the session has stopped.
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.state() != ClockState::Stopped {
            return None;
        }
        let missed_words = self
            .missed_positions
            .iter()
            .map(|&pos| {
                let token = &self.tokens[self.matchable_indices[pos]];
                MissedWord {
                    reference_index: token.reference_index,
                    display_text: token.display_text.clone(),
                }
            })
            .collect();
        Some(MetricsAggregator::summarize(
            self.current_snapshot(),
            self.engine.len(),
            missed_words,
            self.updates_applied,
            self.final_updates,
        ))
    }
}
