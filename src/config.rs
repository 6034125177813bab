//! Configuration management for Keyboard Tester
//!
//! Settings are read from a platform-specific TOML file. A missing file means
//! defaults; a malformed one is reported as an error.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/keyboard-tester/config.toml` |
//! | macOS | `~/Library/Application Support/keyboard-tester/config.toml` |
//! | Windows | `%APPDATA%\keyboard-tester\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use keyboard_tester::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.classifier.double_press_window_ms = 150;
//! config.save().expect("Failed to save config");
//! ```

use crate::keyboard::KeyboardLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the application directory under the platform config dir
pub const APP_DIR_NAME: &str = "keyboard-tester";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Directory holding the config file and the log file.
///
/// Creates the directory if it doesn't exist.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = base.join(APP_DIR_NAME);
    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }
    Ok(app_dir)
}

/// Returns the path to the config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Keystroke classification settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Statistics refresh settings
    #[serde(default)]
    pub stats: StatsConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
    /// Stats export settings
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Two presses of one key closer than this are a double press
    pub double_press_window_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            double_press_window_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Cadence of elapsed/WPM/accuracy updates
    pub tick_interval_ms: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// How long status messages stay visible
    pub status_duration_secs: u64,
    /// Color theme (dark/light)
    pub theme: Theme,
    /// Layout selected at startup
    pub default_layout: KeyboardLayout,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 60,
            status_duration_secs: 3,
            theme: Theme::Dark,
            default_layout: KeyboardLayout::Full,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the stats file is written to
    pub directory: PathBuf,
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: "keyboard-test-stats.json".to_string(),
        }
    }
}

impl ExportConfig {
    /// Full path of the export file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz.max(1) as u64)
    }

    pub fn double_press_window(&self) -> Duration {
        Duration::from_millis(self.classifier.double_press_window_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.stats.tick_interval_ms.max(1))
    }

    pub fn status_duration(&self) -> Duration {
        Duration::from_secs(self.ui.status_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config_path(tag: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "keyboard-tester-test-{}-{}.toml",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.classifier.double_press_window_ms, 200);
        assert_eq!(config.stats.tick_interval_ms, 1000);
        assert_eq!(config.ui.refresh_rate_hz, 60);
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.ui.default_layout, KeyboardLayout::Full);
        assert_eq!(config.export.file_name, "keyboard-test-stats.json");
    }

    #[test]
    fn config_durations() {
        let config = Config::default();
        // 60 Hz = 16666 microseconds per frame
        assert_eq!(config.refresh_interval().as_micros(), 16666);
        assert_eq!(config.double_press_window(), Duration::from_millis(200));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.status_duration(), Duration::from_secs(3));
    }

    #[test]
    fn zero_refresh_rate_does_not_divide_by_zero() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 0;
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn export_path_joins_directory_and_name() {
        let export = ExportConfig {
            directory: PathBuf::from("out"),
            file_name: "stats.json".to_string(),
        };
        assert_eq!(export.path(), PathBuf::from("out").join("stats.json"));
    }

    #[test]
    fn config_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");

        let mut config = Config::default();
        config.classifier.double_press_window_ms = 150;
        config.ui.theme = Theme::Light;
        config.ui.default_layout = KeyboardLayout::Sixty;

        config.save_to(&path).expect("Failed to save config");
        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_load_missing_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/path/config.toml");
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn config_load_malformed_file_is_parse_error() {
        let path = temp_config_path("malformed");
        fs::write(&path, "[classifier\ndouble_press_window_ms = ").unwrap();
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        assert!(toml_str.contains("[classifier]"));
        assert!(toml_str.contains("[stats]"));
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("[export]"));
        assert!(toml_str.contains("double_press_window_ms = 200"));
        assert!(toml_str.contains("default_layout = \"100%\""));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[ui]
refresh_rate_hz = 144
status_duration_secs = 5
theme = "Light"
default_layout = "65%"
"#;

        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.ui.refresh_rate_hz, 144);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.ui.default_layout, KeyboardLayout::SixtyFive);
        assert_eq!(config.classifier, ClassifierConfig::default());
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::NoConfigDir;
        assert_eq!(err.to_string(), "Could not determine config directory");

        let io_err = ConfigError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));
    }
}
