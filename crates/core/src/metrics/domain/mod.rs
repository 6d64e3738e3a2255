pub mod metrics_aggregator;
pub mod metrics_snapshot;
pub mod session_summary;
