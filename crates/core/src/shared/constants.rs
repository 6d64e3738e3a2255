use std::time::Duration;

/// Cadence at which the scheduler is expected to call `tick()`.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 1;

/// Reference words the aligner may skip over to resynchronize with the reader.
pub const DEFAULT_RESYNC_WINDOW: usize = 1;

/// Log reading progress every N words advanced.
pub const DEFAULT_PROGRESS_THROTTLE_WORDS: usize = 10;

pub const SECONDS_PER_MINUTE: f64 = 60.0;

pub const SETTINGS_DIR_NAME: &str = "Fluency";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
