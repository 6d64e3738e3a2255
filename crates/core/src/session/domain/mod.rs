pub mod session;
pub mod session_clock;
pub mod session_error;
pub mod session_event;
pub mod session_status;
