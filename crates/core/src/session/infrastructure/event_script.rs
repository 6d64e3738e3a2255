use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::domain::session_event::SessionEvent;

#[derive(Error, Debug)]
pub enum EventScriptError {
    #[error("failed to read event script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a JSON-lines event script from disk.
pub fn read_events(path: &Path) -> Result<Vec<SessionEvent>, EventScriptError> {
    let contents = fs::read_to_string(path).map_err(|source| EventScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_events(&contents)
}

/// Parses one event per line. Blank lines and `#` comments are skipped;
/// reported line numbers are 1-based.
pub fn parse_events(contents: &str) -> Result<Vec<SessionEvent>, EventScriptError> {
    let mut events = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if let Some(event) = parse_line(line, idx + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parses a single script line. `Ok(None)` for blank and comment lines.
pub fn parse_line(
    line: &str,
    line_number: usize,
) -> Result<Option<SessionEvent>, EventScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| EventScriptError::Parse {
            line: line_number,
            source,
        })
}
