//! Configuration file support for Bug Validator.
//!
//! The configuration remembers the source and destination folders between runs
//! and is rewritten whenever either folder is selected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Verbosity of the application log.
///
/// Serialized in lowercase, the same spelling `--log-level` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Lowercase name, as written in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Levels from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &Self::ALL
    }

    /// Parse a level name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(name))
    }

    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Persisted application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder the images under review are read from
    #[serde(default)]
    pub source_folder: String,

    /// Base folder annotated copies and logs are written to
    #[serde(default)]
    pub destination_folder: String,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Check that both folders have been chosen.
    pub fn has_folders(&self) -> bool {
        !self.source_folder.is_empty() && !self.destination_folder.is_empty()
    }

    /// Source folder as a path, if set.
    pub fn source_path(&self) -> Option<PathBuf> {
        (!self.source_folder.is_empty()).then(|| PathBuf::from(&self.source_folder))
    }

    /// Destination folder as a path, if set.
    pub fn destination_path(&self) -> Option<PathBuf> {
        (!self.destination_folder.is_empty()).then(|| PathBuf::from(&self.destination_folder))
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "bug_validator_config.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("bug-validator").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("bug-validator")
                    .join(Self::default_filename())
            })
        }
    }

    /// Read configuration from a file without logging.
    ///
    /// Returns `Ok(None)` when the file does not exist, so callers can decide
    /// how to report a read or parse failure once logging is set up.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map(Some)
    }

    /// Try to load configuration from a file.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_path(path: &Path) -> Option<Self> {
        match Self::try_load(path) {
            Ok(Some(config)) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Ok(None) => {
                log::debug!("No config file found at {:?}", path);
                None
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        // Create parent directories if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_keys_only() {
        let config = AppConfig::from_json(
            r#"{"source_folder": "/data/in", "destination_folder": "/data/out"}"#,
        )
        .unwrap();
        assert_eq!(config.source_folder, "/data/in");
        assert_eq!(config.destination_folder, "/data/out");
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.has_folders());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let config = AppConfig::from_json("{}").unwrap();
        assert!(!config.has_folders());
        assert!(config.source_path().is_none());
        assert!(config.destination_path().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(AppConfig::default_filename());

        let config = AppConfig {
            source_folder: "in".to_string(),
            destination_folder: "out".to_string(),
            log_level: LogLevel::Debug,
        };
        config.save_to_path(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"source_folder\": \"in\""));
        assert!(json.contains("\"log_level\": \"debug\""));
        assert_eq!(AppConfig::load_from_path(&path), Some(config));
    }

    #[test]
    fn test_corrupt_or_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(AppConfig::load_from_path(&path).is_none());

        std::fs::write(&path, "{not json").unwrap();
        assert!(AppConfig::load_from_path(&path).is_none());
        assert!(matches!(
            AppConfig::from_json("[1, 2]"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_try_load_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(matches!(AppConfig::try_load(&path), Ok(None)));

        std::fs::write(&path, r#"{"log_level": "debug"}"#).unwrap();
        let config = AppConfig::try_load(&path).unwrap().unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            AppConfig::try_load(dir.path()),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::from_name("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_name("TRACE"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_name("loud"), None);
        assert_eq!(LogLevel::all().len(), 5);
        assert!(LogLevel::all().iter().all(|l| LogLevel::from_name(l.name()) == Some(*l)));
        assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    }
}
