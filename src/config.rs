use healthlog_core::ClockFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest image the shell turns into a meal photo unless configured
pub const DEFAULT_PHOTO_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// How completion times are displayed
    pub clock_format: ConfigValue<ClockFormat>,
    /// Upper bound on image files attached to meals
    pub photo_max_bytes: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    clock_format: Option<ClockFormat>,
    photo_max_bytes: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut clock_format = ConfigValue::new(ClockFormat::default(), ConfigSource::Default);
        let mut photo_max_bytes = ConfigValue::new(DEFAULT_PHOTO_MAX_BYTES, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(format) = file_config.clock_format {
                clock_format = ConfigValue::new(format, ConfigSource::File);
            }
            if let Some(max) = file_config.photo_max_bytes {
                photo_max_bytes = ConfigValue::new(max, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(format) = std::env::var("HEALTHLOG_CLOCK_FORMAT") {
            let parsed = format
                .parse::<ClockFormat>()
                .map_err(|e| ConfigError::EnvError("HEALTHLOG_CLOCK_FORMAT", e))?;
            clock_format = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(max) = std::env::var("HEALTHLOG_PHOTO_MAX_BYTES") {
            let parsed = max.trim().parse::<u64>().map_err(|_| {
                ConfigError::EnvError(
                    "HEALTHLOG_PHOTO_MAX_BYTES",
                    format!("'{}' is not a byte count", max),
                )
            })?;
            photo_max_bytes = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            clock_format,
            photo_max_bytes,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/healthlog/
    /// - macOS: ~/Library/Application Support/healthlog/
    /// - Windows: %APPDATA%/healthlog/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("healthlog")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    EnvError(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::EnvError(var, e) => {
                write!(f, "Invalid value in {}: {}", var, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.clock_format.value, ClockFormat::TwentyFourHour);
        assert_eq!(config.clock_format.source, ConfigSource::Default);
        assert_eq!(config.photo_max_bytes.value, DEFAULT_PHOTO_MAX_BYTES);
        assert_eq!(config.photo_max_bytes.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "clock_format: 12h").unwrap();
        writeln!(file, "photo_max_bytes: 1024").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.clock_format.value, ClockFormat::TwelveHour);
        assert_eq!(config.clock_format.source, ConfigSource::File);
        assert_eq!(config.photo_max_bytes.value, 1024);
        assert_eq!(config.photo_max_bytes.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "clock_format: 24h").unwrap();

        // Set env var
        std::env::set_var("HEALTHLOG_CLOCK_FORMAT", "12h");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.clock_format.value, ClockFormat::TwelveHour);
        assert_eq!(config.clock_format.source, ConfigSource::Environment);

        // Clean up
        std::env::remove_var("HEALTHLOG_CLOCK_FORMAT");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_clock_format_is_parse_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "clock_format: sundial").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "photo_max_bytes: 2048").unwrap();
        // clock_format not specified

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.clock_format.source, ConfigSource::Default);
        assert_eq!(config.photo_max_bytes.value, 2048);
        assert_eq!(config.photo_max_bytes.source, ConfigSource::File);
    }
}
