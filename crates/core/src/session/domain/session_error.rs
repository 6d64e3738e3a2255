use thiserror::Error;

use super::session_clock::{ClockOperation, ClockState};

/// The reference passage cannot be aligned against.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReferenceError {
    #[error("reference passage is empty")]
    Empty,
    #[error("reference passage contains no matchable words")]
    NoMatchableWords,
}

/// A clock operation was called from a state that does not permit it.
/// The session is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {operation} while {state}")]
pub struct InvalidStateTransition {
    pub operation: ClockOperation,
    pub state: ClockState,
}
