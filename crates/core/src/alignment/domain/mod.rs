pub mod alignment_cursor;
pub mod alignment_engine;
pub mod transcript_snapshot;
