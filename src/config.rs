//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::ticker::TickerConfig;
use crate::tracker::TrackerSettings;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Years that can be selected as the countdown target
pub const SELECTED_YEAR_RANGE: RangeInclusive<i32> = 2026..=2040;

/// Selectable birth years
pub const BIRTH_YEAR_RANGE: RangeInclusive<i32> = 1920..=2020;

/// Selectable life expectancies, in years
pub const LIFE_EXPECTANCY_RANGE: RangeInclusive<i32> = 50..=120;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub ticker: TickerSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// User selections
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Defaults to the current year when unset
    pub selected_year: Option<i32>,

    #[serde(default = "default_birth_year")]
    pub birth_year: i32,

    #[serde(default = "default_life_expectancy")]
    pub life_expectancy_years: i32,

    #[serde(default = "default_life_scale")]
    pub life_scale_years: i32,
}

fn default_birth_year() -> i32 {
    TrackerSettings::DEFAULT_BIRTH_YEAR
}

fn default_life_expectancy() -> i32 {
    TrackerSettings::DEFAULT_LIFE_EXPECTANCY
}

fn default_life_scale() -> i32 {
    TrackerSettings::DEFAULT_LIFE_SCALE
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            selected_year: None,
            birth_year: default_birth_year(),
            life_expectancy_years: default_life_expectancy(),
            life_scale_years: default_life_scale(),
        }
    }
}

impl TrackerConfig {
    /// Resolve into tracker settings, using `current_year` when no year is selected
    pub fn settings(&self, current_year: i32) -> TrackerSettings {
        TrackerSettings {
            selected_year: self.selected_year.unwrap_or(current_year),
            birth_year: self.birth_year,
            life_expectancy_years: self.life_expectancy_years,
            life_scale_years: self.life_scale_years,
        }
    }
}

/// Refresh loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TickerSection {
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
}

fn default_interval() -> u64 {
    100
}

impl Default for TickerSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
        }
    }
}

impl TickerSection {
    pub fn ticker_config(&self) -> TickerConfig {
        TickerConfig::with_interval_ms(self.interval_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("memento").join("config.toml")),
            Some(PathBuf::from("/etc/memento/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file of `paths`, or defaults when none exists
    ///
    /// A file that exists but cannot be read or parsed is an error; it never
    /// falls back to defaults.
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::info!("Using default config with environment overrides");
                Self::from_env()
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        // Tracker overrides
        if let Some(year) = env_parse("MEMENTO_SELECTED_YEAR")? {
            self.tracker.selected_year = Some(year);
        }
        if let Some(year) = env_parse("MEMENTO_BIRTH_YEAR")? {
            self.tracker.birth_year = year;
        }
        if let Some(years) = env_parse("MEMENTO_LIFE_EXPECTANCY")? {
            self.tracker.life_expectancy_years = years;
        }

        // Ticker overrides
        if let Some(ms) = env_parse("MEMENTO_TICK_INTERVAL_MS")? {
            self.ticker.interval_ms = ms;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("MEMENTO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MEMENTO_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Check user selections against the selectable ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(year) = self.tracker.selected_year {
            check_range("tracker.selected_year", year, &SELECTED_YEAR_RANGE)?;
        }
        check_range("tracker.birth_year", self.tracker.birth_year, &BIRTH_YEAR_RANGE)?;
        check_range(
            "tracker.life_expectancy_years",
            self.tracker.life_expectancy_years,
            &LIFE_EXPECTANCY_RANGE,
        )?;
        check_range("tracker.life_scale_years", self.tracker.life_scale_years, &(1..=100))?;

        if self.ticker.interval_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "ticker.interval_ms",
                value: 0,
                min: 1,
                max: i64::from(u32::MAX),
            });
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => parse_value(key, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}

fn check_range(
    field: &'static str,
    value: i32,
    range: &RangeInclusive<i32>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Memento Configuration
#
# Environment variables override these settings:
# - MEMENTO_SELECTED_YEAR
# - MEMENTO_BIRTH_YEAR
# - MEMENTO_LIFE_EXPECTANCY
# - MEMENTO_TICK_INTERVAL_MS
# - MEMENTO_LOG_LEVEL
# - MEMENTO_LOG_FORMAT

[tracker]
# Year to count down to (2026-2040). Defaults to the current year.
# selected_year = 2026

# Birth year (1920-2020)
birth_year = 1997

# Life expectancy in years (50-120)
life_expectancy_years = 80

# Years highlighted in the century view
life_scale_years = 80

[ticker]
# Time between two refreshes (ms)
interval_ms = 100

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/memento/memento.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tracker.selected_year, None);
        assert_eq!(config.tracker.birth_year, 1997);
        assert_eq!(config.tracker.life_expectancy_years, 80);
        assert_eq!(config.ticker.interval_ms, 100);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_config_parses() {
        let file = write_config(&generate_default_config());
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.tracker.birth_year, 1997);
        assert_eq!(config.tracker.life_scale_years, 80);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let file = write_config(
            r#"
            [tracker]
            selected_year = 2030
            birth_year = 1985
            "#,
        );
        let config = Config::load(file.path()).unwrap();

        let settings = config.tracker.settings(2026);
        assert_eq!(settings.selected_year, 2030);
        assert_eq!(settings.birth_year, 1985);
        assert_eq!(settings.life_expectancy_years, 80);
        assert_eq!(config.ticker.interval_ms, 100);
    }

    #[test]
    fn test_selected_year_falls_back_to_current_year() {
        let settings = TrackerConfig::default().settings(2031);
        assert_eq!(settings.selected_year, 2031);
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[tracker]\nbirth_year = \"soon\"\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/memento.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_broken_file_is_not_replaced_by_defaults() {
        let broken = write_config("[tracker]\nbirth_year = \"oops\"\n");
        let paths = vec![
            PathBuf::from("/nonexistent/memento/config.toml"),
            broken.path().to_path_buf(),
        ];

        let err = Config::load_first(&paths).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_first_existing_file_wins() {
        let first = write_config("[tracker]\nbirth_year = 1960\n");
        let second = write_config("[tracker]\nbirth_year = 1970\n");
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        let config = Config::load_first(&paths).unwrap();
        assert_eq!(config.tracker.birth_year, 1960);
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let config = Config::load_first(&[PathBuf::from("/nonexistent/memento.toml")]).unwrap();
        assert_eq!(config.ticker.interval_ms, 100);
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        assert_eq!(parse_value::<i32>("MEMENTO_BIRTH_YEAR", " 1985 ").unwrap(), 1985);

        let err = parse_value::<i32>("MEMENTO_BIRTH_YEAR", "soon").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for MEMENTO_BIRTH_YEAR: \"soon\"");

        std::env::set_var("MEMENTO_TEST_INTERVAL", "fast");
        assert!(matches!(
            env_parse::<u64>("MEMENTO_TEST_INTERVAL"),
            Err(ConfigError::InvalidEnv { .. })
        ));
        assert_eq!(env_parse::<u64>("MEMENTO_TEST_UNSET_KEY").unwrap(), None);
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = Config::default();
        config.tracker.life_expectancy_years = 121;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "tracker.life_expectancy_years = 121 is out of range (50..=120)"
        );

        let mut config = Config::default();
        config.tracker.selected_year = Some(2025);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tracker.birth_year = 1919;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ticker.interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
