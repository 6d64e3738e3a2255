use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fluency_core::shared::constants::{
    DEFAULT_PROGRESS_THROTTLE_WORDS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use fluency_core::AlignmentConfig;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub alignment: AlignmentConfig,
    pub progress_throttle_words: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alignment: AlignmentConfig::default(),
            progress_throttle_words: DEFAULT_PROGRESS_THROTTLE_WORDS,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads settings from `explicit`, which must exist and parse, or else
    /// from the user config directory, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Ok(Self::config_path()
                .and_then(|path| fs::read_to_string(path).ok())
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.alignment, AlignmentConfig::default());
        assert_eq!(settings.progress_throttle_words, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"alignment": {{"resyncWindow": 3}}}}"#).unwrap();
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.alignment.resync_window, 3);
        assert_eq!(settings.alignment.policy.max_edit_distance, 1);
        assert_eq!(settings.progress_throttle_words, 10);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_explicit_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
