//! Configuration for the support inbox.
//!
//! Every field has a serde default, so a partial (or empty) JSON object is a
//! valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::reply::SessionTiming;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".inbox/config.json";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Interval between streamed characters.
    #[serde(default = "default_reveal_interval_ms")]
    pub reveal_interval_ms: u64,

    /// Delay before the generic suggestion appears.
    #[serde(default = "default_suggestion_delay_ms")]
    pub suggestion_delay_ms: u64,

    /// Terminal width below which the layout switches to a single column.
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint: u16,

    /// UI input poll and tick rate.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Number of trailing messages shown in the thread view.
    #[serde(default = "default_thread_window")]
    pub thread_window: usize,

    #[serde(default)]
    pub icons: IconStyle,

    /// Where tracing output goes while the TUI owns the terminal.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_reveal_interval_ms() -> u64 {
    18
}

fn default_suggestion_delay_ms() -> u64 {
    1000
}

fn default_narrow_breakpoint() -> u16 {
    100
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_thread_window() -> usize {
    5
}

fn default_log_file() -> PathBuf {
    PathBuf::from(".inbox/inbox.log")
}

/// Border and icon glyph set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    #[default]
    Unicode,
    Ascii,
}

impl IconStyle {
    /// Resolve against the environment. `NO_COLOR` forces ASCII.
    pub fn resolve(self) -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::Ascii
        } else {
            self
        }
    }
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: default_reveal_interval_ms(),
            suggestion_delay_ms: default_suggestion_delay_ms(),
            narrow_breakpoint: default_narrow_breakpoint(),
            tick_rate_ms: default_tick_rate_ms(),
            thread_window: default_thread_window(),
            icons: IconStyle::default(),
            log_file: default_log_file(),
        }
    }
}

impl InboxConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reply timing derived from this config.
    pub fn session_timing(&self) -> SessionTiming {
        SessionTiming {
            // tokio intervals reject a zero period
            reveal_interval: Duration::from_millis(self.reveal_interval_ms.max(1)),
            suggestion_delay: Duration::from_millis(self.suggestion_delay_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = InboxConfig::default();
        assert_eq!(config.reveal_interval_ms, 18);
        assert_eq!(config.suggestion_delay_ms, 1000);
        assert_eq!(config.narrow_breakpoint, 100);
        assert_eq!(config.thread_window, 5);
        assert_eq!(config.icons, IconStyle::Unicode);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: InboxConfig =
            serde_json::from_str(r#"{"reveal_interval_ms": 5, "icons": "ascii"}"#).unwrap();
        assert_eq!(config.reveal_interval_ms, 5);
        assert_eq!(config.icons, IconStyle::Ascii);
        assert_eq!(config.suggestion_delay_ms, 1000);
        assert_eq!(config.log_file, PathBuf::from(".inbox/inbox.log"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = InboxConfig {
            narrow_breakpoint: 80,
            ..InboxConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = InboxConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = InboxConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, InboxConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(InboxConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_session_timing() {
        let timing = InboxConfig::default().session_timing();
        assert_eq!(timing.reveal_interval, Duration::from_millis(18));
        assert_eq!(timing.suggestion_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let config: InboxConfig =
            serde_json::from_str(r#"{"reveal_interval_ms": 0, "tick_rate_ms": 0}"#).unwrap();
        assert_eq!(config.session_timing().reveal_interval, Duration::from_millis(1));
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
    }
}
