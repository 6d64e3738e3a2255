pub mod alignment;
pub mod matching;
pub mod metrics;
pub mod pipeline;
pub mod session;
pub mod shared;
pub mod text;

pub use alignment::domain::alignment_engine::AlignmentConfig;
pub use matching::domain::word_matcher::{is_match, MatchPolicy};
pub use metrics::domain::metrics_snapshot::MetricsSnapshot;
pub use metrics::domain::session_summary::SessionSummary;
pub use session::domain::session::Session;
pub use session::domain::session_clock::ClockState;
pub use session::domain::session_error::{InvalidReferenceError, InvalidStateTransition};
pub use session::domain::session_event::{SessionEvent, TranscriptUpdate};
pub use session::domain::session_status::SessionStatus;
