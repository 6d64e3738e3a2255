use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for reading-session events.
///
/// Lets callers observe a session (stdout, GUI signals, log crate) without
/// the driver knowing which.
pub trait SessionLogger: Send {
    /// Report alignment progress through the reference words.
    fn progress(&mut self, cursor: usize, total: usize);

    /// Record a point-in-time metric (e.g. miscues, words per minute).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn progress(&mut self, _cursor: usize, _total: usize) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that aggregates metrics and reports a summary when
/// the session ends.
///
/// Progress is logged every `throttle_words` words and at the end of the
/// passage.
pub struct StdoutSessionLogger {
    throttle_words: usize,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    cursor: usize,
    total_words: usize,
    last_logged: usize,
    messages: Vec<String>,
}

impl StdoutSessionLogger {
    pub fn new(throttle_words: usize) -> Self {
        Self {
            throttle_words: throttle_words.max(1),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            cursor: 0,
            total_words: 0,
            last_logged: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing happened.
    pub fn summary_string(&self) -> Option<String> {
        if self.total_words == 0 && self.metrics.is_empty() && self.messages.is_empty() {
            return None;
        }

        let wall_secs = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Session summary ({}/{} words, {wall_secs:.1}s wall time):",
            self.cursor, self.total_words
        )];

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let last = values.last().copied().unwrap_or(0.0);
            let avg = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            lines.push(format!("  {name}: last {last:.1}  avg {avg:.1}"));
        }
        if !self.messages.is_empty() {
            lines.push(format!("  status: {}", self.messages.join(" -> ")));
        }

        Some(lines.join("\n"))
    }

    /// Returns the values recorded for a given metric.
    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(crate::shared::constants::DEFAULT_PROGRESS_THROTTLE_WORDS)
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn progress(&mut self, cursor: usize, total: usize) {
        self.cursor = cursor;
        self.total_words = total;
        if total == 0 || cursor == self.last_logged {
            return;
        }
        if cursor >= self.last_logged + self.throttle_words || cursor == total {
            self.last_logged = cursor;
            let pct = cursor as f64 / total as f64 * 100.0;
            log::info!("Reading: {cursor}/{total} words ({pct:.1}%)");
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
