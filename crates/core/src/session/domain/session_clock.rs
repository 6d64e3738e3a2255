use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::session_error::InvalidStateTransition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockState {
    #[default]
    Idle,
    Recording,
    Paused,
    Stopped,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockState::Idle => write!(f, "Idle"),
            ClockState::Recording => write!(f, "Recording"),
            ClockState::Paused => write!(f, "Paused"),
            ClockState::Stopped => write!(f, "Stopped"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockOperation {
    Start,
    Pause,
    Resume,
    Stop,
}

impl fmt::Display for ClockOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockOperation::Start => write!(f, "start"),
            ClockOperation::Pause => write!(f, "pause"),
            ClockOperation::Resume => write!(f, "resume"),
            ClockOperation::Stop => write!(f, "stop"),
        }
    }
}

/// Logical reading clock: counts one second per `tick()` while recording.
///
/// Real time never passes inside the clock; an external scheduler drives it.
/// `Stopped` is terminal.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    state: ClockState,
    elapsed_seconds: u64,
    last_tick_at: Option<Instant>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// When the last counted tick happened.
    pub fn last_tick_at(&self) -> Option<Instant> {
        self.last_tick_at
    }

    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(ClockOperation::Start, &[ClockState::Idle], ClockState::Recording)?;
        self.elapsed_seconds = 0;
        self.last_tick_at = None;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(ClockOperation::Pause, &[ClockState::Recording], ClockState::Paused)
    }

    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(ClockOperation::Resume, &[ClockState::Paused], ClockState::Recording)
    }

    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            ClockOperation::Stop,
            &[ClockState::Recording, ClockState::Paused],
            ClockState::Stopped,
        )
    }

    /// Counts one second if recording. Returns whether the tick counted.
    pub fn tick(&mut self) -> bool {
        if self.state != ClockState::Recording {
            return false;
        }
        self.elapsed_seconds += 1;
        self.last_tick_at = Some(Instant::now());
        true
    }

    fn transition(
        &mut self,
        operation: ClockOperation,
        allowed_from: &[ClockState],
        to: ClockState,
    ) -> Result<(), InvalidStateTransition> {
        if !allowed_from.contains(&self.state) {
            return Err(InvalidStateTransition {
                operation,
                state: self.state,
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn clock_in(state: ClockState) -> SessionClock {
        let mut clock = SessionClock::new();
        match state {
            ClockState::Idle => {}
            ClockState::Recording => clock.start().unwrap(),
            ClockState::Paused => {
                clock.start().unwrap();
                clock.pause().unwrap();
            }
            ClockState::Stopped => {
                clock.start().unwrap();
                clock.stop().unwrap();
            }
        }
        clock
    }

    #[test]
    fn test_new_clock_is_idle() {
        let clock = SessionClock::new();
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.elapsed_seconds(), 0);
        assert!(clock.last_tick_at().is_none());
    }

    #[test]
    fn test_tick_counts_only_while_recording() {
        let mut clock = SessionClock::new();
        assert!(!clock.tick());
        clock.start().unwrap();
        assert!(clock.tick());
        assert!(clock.tick());
        assert_eq!(clock.elapsed_seconds(), 2);
        assert!(clock.last_tick_at().is_some());
    }

    #[test]
    fn test_pause_halts_ticking_and_resume_restarts_it() {
        let mut clock = clock_in(ClockState::Recording);
        clock.tick();
        clock.pause().unwrap();
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert_eq!(clock.elapsed_seconds(), 1);

        clock.resume().unwrap();
        assert!(clock.tick());
        assert_eq!(clock.elapsed_seconds(), 2);
    }

    #[test]
    fn test_stop_freezes_elapsed_time() {
        let mut clock = clock_in(ClockState::Recording);
        clock.tick();
        clock.tick();
        clock.stop().unwrap();
        assert!(!clock.tick());
        assert_eq!(clock.elapsed_seconds(), 2);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn test_stop_from_paused() {
        let mut clock = clock_in(ClockState::Paused);
        assert!(clock.stop().is_ok());
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[rstest]
    #[case::start_while_recording(ClockState::Recording, ClockOperation::Start)]
    #[case::start_while_paused(ClockState::Paused, ClockOperation::Start)]
    #[case::restart_after_stop(ClockState::Stopped, ClockOperation::Start)]
    #[case::pause_while_idle(ClockState::Idle, ClockOperation::Pause)]
    #[case::pause_while_paused(ClockState::Paused, ClockOperation::Pause)]
    #[case::pause_after_stop(ClockState::Stopped, ClockOperation::Pause)]
    #[case::resume_while_idle(ClockState::Idle, ClockOperation::Resume)]
    #[case::resume_while_recording(ClockState::Recording, ClockOperation::Resume)]
    #[case::resume_after_stop(ClockState::Stopped, ClockOperation::Resume)]
    #[case::stop_while_idle(ClockState::Idle, ClockOperation::Stop)]
    #[case::stop_after_stop(ClockState::Stopped, ClockOperation::Stop)]
    fn test_invalid_transition_leaves_state(
        #[case] state: ClockState,
        #[case] operation: ClockOperation,
    ) {
        let mut clock = clock_in(state);
        let result = match operation {
            ClockOperation::Start => clock.start(),
            ClockOperation::Pause => clock.pause(),
            ClockOperation::Resume => clock.resume(),
            ClockOperation::Stop => clock.stop(),
        };
        assert_eq!(result, Err(InvalidStateTransition { operation, state }));
        assert_eq!(clock.state(), state);
    }

    #[test]
    fn test_state_displays_variant_name() {
        assert_eq!(ClockState::Recording.to_string(), "Recording");
        assert_eq!(ClockOperation::Resume.to_string(), "resume");
    }
}
