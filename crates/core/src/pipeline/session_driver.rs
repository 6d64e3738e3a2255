use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

use super::session_logger::SessionLogger;
use crate::metrics::domain::session_summary::SessionSummary;
use crate::session::domain::session::Session;
use crate::session::domain::session_event::{SessionEvent, TranscriptUpdate};
use crate::session::domain::session_status::SessionStatus;

/// Messages sent from the session worker to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverMessage {
    Status(SessionStatus),
    Rejected(String),
    Finished(SessionSummary),
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("session worker is no longer running")]
    Disconnected,
    #[error("session worker panicked")]
    WorkerPanicked,
}

/// Owns a [`Session`] on a worker thread and applies events to it one at a
/// time, in arrival order.
///
/// Transcript updates carrying a sequence number at or below the last one
/// seen are discarded as stale. With a tick interval the worker is its own
/// scheduler and ticks the clock on that cadence.
pub struct SessionDriver {
    events: Sender<SessionEvent>,
    messages: Receiver<DriverMessage>,
    handle: JoinHandle<Session>,
}

impl SessionDriver {
    pub fn spawn(
        session: Session,
        logger: Box<dyn SessionLogger>,
        tick_interval: Option<Duration>,
    ) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded::<SessionEvent>();
        let (messages_tx, messages_rx) = crossbeam_channel::unbounded::<DriverMessage>();
        let ticker = tick_interval.map(crossbeam_channel::tick);

        let handle = thread::spawn(move || {
            let mut worker = Worker {
                session,
                logger,
                last_sequence: None,
            };
            worker.run(&events_rx, &messages_tx, ticker.as_ref());
            worker.logger.summary();
            worker.session
        });

        Self {
            events: events_tx,
            messages: messages_rx,
            handle,
        }
    }

    pub fn send(&self, event: SessionEvent) -> Result<(), DriverError> {
        self.events
            .send(event)
            .map_err(|_| DriverError::Disconnected)
    }

    /// Entry point for the speech recognizer's update callback.
    pub fn on_update(&self, text: &str, is_final: bool) -> Result<(), DriverError> {
        self.send(SessionEvent::Transcript(TranscriptUpdate::new(text, is_final)))
    }

    pub fn messages(&self) -> &Receiver<DriverMessage> {
        &self.messages
    }

    /// Closes the event channel, waits for queued events to drain and hands
    /// the session back.
    pub fn finish(self) -> Result<Session, DriverError> {
        let Self { events, handle, .. } = self;
        drop(events);
        handle.join().map_err(|_| DriverError::WorkerPanicked)
    }
}

struct Worker {
    session: Session,
    logger: Box<dyn SessionLogger>,
    last_sequence: Option<u64>,
}

impl Worker {
    fn run(
        &mut self,
        events: &Receiver<SessionEvent>,
        out: &Sender<DriverMessage>,
        ticker: Option<&Receiver<std::time::Instant>>,
    ) {
        loop {
            let event = match ticker {
                Some(ticker) => crossbeam_channel::select! {
                    recv(events) -> msg => msg.ok(),
                    recv(ticker) -> _ => Some(SessionEvent::Tick),
                },
                None => events.recv().ok(),
            };
            let Some(event) = event else {
                break;
            };

            for message in self.apply(event) {
                let _ = out.send(message);
            }
        }
    }

    fn apply(&mut self, event: SessionEvent) -> Vec<DriverMessage> {
        let result = match event {
            SessionEvent::Start => self.session.start(),
            SessionEvent::Pause => self.session.pause(),
            SessionEvent::Resume => self.session.resume(),
            SessionEvent::Stop => self.session.stop(),
            SessionEvent::Tick => {
                if !self.session.tick() {
                    return Vec::new();
                }
                let snapshot = self.session.current_snapshot();
                self.logger
                    .metric("wpm", f64::from(snapshot.reading_speed_wpm));
                return vec![DriverMessage::Status(self.session.status())];
            }
            SessionEvent::Transcript(update) => return self.apply_transcript(&update),
        };

        match result {
            Ok(()) => {
                let status = self.session.status();
                self.logger.info(&format!("Session {}", status.state));
                let mut messages = vec![DriverMessage::Status(status)];
                if let Some(summary) = self.session.summary() {
                    self.logger
                        .metric("accuracy", summary.metrics.accuracy_percent);
                    messages.push(DriverMessage::Finished(summary));
                }
                messages
            }
            Err(e) => {
                log::warn!("Rejected: {e}");
                vec![DriverMessage::Rejected(e.to_string())]
            }
        }
    }

    fn apply_transcript(&mut self, update: &TranscriptUpdate) -> Vec<DriverMessage> {
        if let Some(sequence) = update.sequence {
            if self.last_sequence.is_some_and(|last| sequence <= last) {
                log::debug!("Discarding stale transcript update #{sequence}");
                return Vec::new();
            }
            self.last_sequence = Some(sequence);
        }

        if !self.session.on_recognizer_update(update) {
            return Vec::new();
        }
        let status = self.session.status();
        self.logger
            .progress(status.cursor_position, self.session.total_reference_words());
        self.logger.metric("miscues", status.metrics.miscues as f64);
        vec![DriverMessage::Status(status)]
    }
}
