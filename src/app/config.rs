//! Configuration for groffhl
//!
//! Precedence: CLI > environment variables > config file > defaults.

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::core::defaults;
use crate::parser::DEFAULT_MAX_SEQUENCE_LEN;

/// Smallest pending buffer that can still hold `ESC[m`
const MIN_SEQUENCE_LEN: usize = 8;

/// Largest accepted pending buffer
const MAX_SEQUENCE_LEN: usize = 1 << 20;

/// Largest accepted initial output buffer in bytes
const MAX_BUFFER_CAPACITY: usize = 1 << 30;

/// Largest accepted initial number of registry slots
const MAX_REGISTRY_CAPACITY: usize = 1 << 20;

/// CLI arguments for groffhl
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "groffhl")]
#[command(version)]
#[command(about = "Convert ANSI 24-bit color escapes into groff color markup", long_about = None)]
pub struct CliArgs {
    /// Input files (stdin if none are given)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prefix for generated color names
    #[arg(long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Maximum size of an escape sequence in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_sequence_len: Option<usize>,
}

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix of generated color names
    pub name_prefix: String,
    /// Maximum length of a generated color name, prefix included
    pub max_name_len: usize,
    /// Capacity of the pending escape buffer
    pub max_sequence_len: usize,
    /// Initial size of the output buffer in bytes
    pub initial_buffer_capacity: usize,
    /// Initial number of color registry slots
    pub initial_registry_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_prefix: defaults::NAME_PREFIX.to_string(),
            max_name_len: defaults::MAX_NAME_LEN,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            initial_buffer_capacity: defaults::BUFFER_CAPACITY,
            initial_registry_capacity: defaults::REGISTRY_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration with full precedence
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            // An explicitly requested file must load
            Some(path) => Self::load(path)?,
            None => Self::load_default(),
        };

        config.apply_env_vars(|key| env::var(key).ok());
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults
    fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}", path, e);
                Self::default()
            },
        }
    }

    /// Apply `GROFFHL_*` environment variables
    fn apply_env_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(prefix) = var("GROFFHL_PREFIX") {
            self.name_prefix = prefix;
        }
        if let Some(val) = var("GROFFHL_MAX_SEQUENCE_LEN") {
            match val.parse() {
                Ok(len) => self.max_sequence_len = len,
                Err(_) => tracing::warn!("Ignoring invalid GROFFHL_MAX_SEQUENCE_LEN: {}", val),
            }
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(prefix) = &args.prefix {
            self.name_prefix = prefix.clone();
        }
        if let Some(len) = args.max_sequence_len {
            self.max_sequence_len = len;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "name_prefix",
                message: "must not be empty".to_string(),
            });
        }
        if self
            .name_prefix
            .chars()
            .any(|c| c.is_whitespace() || c == ']' || c == '\\')
        {
            return Err(ConfigError::Invalid {
                field: "name_prefix",
                message: format!("'{}' contains whitespace, ']' or '\\'", self.name_prefix),
            });
        }
        if self.name_prefix.len() >= self.max_name_len {
            return Err(ConfigError::Invalid {
                field: "max_name_len",
                message: format!(
                    "{} leaves no room for an index after prefix '{}'",
                    self.max_name_len, self.name_prefix
                ),
            });
        }
        check_range(
            "max_sequence_len",
            self.max_sequence_len,
            MIN_SEQUENCE_LEN,
            MAX_SEQUENCE_LEN,
        )?;
        check_range(
            "initial_buffer_capacity",
            self.initial_buffer_capacity,
            1,
            MAX_BUFFER_CAPACITY,
        )?;
        check_range(
            "initial_registry_capacity",
            self.initial_registry_capacity,
            1,
            MAX_REGISTRY_CAPACITY,
        )?;
        Ok(())
    }
}

/// Reject `value` unless it lies in `min..=max`
fn check_range(
    field: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field,
        message: format!("{} is outside {}..={}", value, min, max),
    })
}

/// Get the default configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("groffhl").join("config.json"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error in '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.name_prefix, "groffhl_");
        assert_eq!(config.max_name_len, 15);
        assert_eq!(config.max_sequence_len, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"name_prefix": "hl"}"#).unwrap();
        assert_eq!(config.name_prefix, "hl");
        assert_eq!(config.initial_buffer_capacity, 4096);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            name_prefix: "x_".to_string(),
            ..Config::default()
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_env_vars() {
        let mut config = Config::default();
        config.apply_env_vars(|key| match key {
            "GROFFHL_PREFIX" => Some("env_".to_string()),
            "GROFFHL_MAX_SEQUENCE_LEN" => Some("not a number".to_string()),
            _ => None,
        });

        assert_eq!(config.name_prefix, "env_");
        assert_eq!(config.max_sequence_len, 256);
    }

    #[test]
    fn test_config_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"name_prefix": "file_", "max_sequence_len": 64}"#).unwrap();

        let args = CliArgs {
            config: Some(path),
            prefix: Some("cli_".to_string()),
            ..CliArgs::default()
        };
        let config = Config::load_with_args(&args).unwrap();

        assert_eq!(config.name_prefix, "cli_");
        assert_eq!(config.max_sequence_len, 64);
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/groffhl.json")),
            ..CliArgs::default()
        };
        assert!(matches!(
            Config::load_with_args(&args),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_config_validation() {
        let invalid = [
            Config {
                name_prefix: String::new(),
                ..Config::default()
            },
            Config {
                name_prefix: "a b".to_string(),
                ..Config::default()
            },
            Config {
                name_prefix: "prefix_".to_string(),
                max_name_len: 7,
                ..Config::default()
            },
            Config {
                max_sequence_len: 3,
                ..Config::default()
            },
            Config {
                initial_buffer_capacity: 0,
                ..Config::default()
            },
            Config {
                initial_registry_capacity: 0,
                ..Config::default()
            },
        ];

        for config in invalid {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid { .. })),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn test_config_upper_bounds() {
        let oversized = [
            (
                "max_sequence_len",
                Config {
                    max_sequence_len: usize::MAX,
                    ..Config::default()
                },
            ),
            (
                "initial_buffer_capacity",
                Config {
                    initial_buffer_capacity: usize::MAX,
                    ..Config::default()
                },
            ),
            (
                "initial_registry_capacity",
                Config {
                    initial_registry_capacity: MAX_REGISTRY_CAPACITY + 1,
                    ..Config::default()
                },
            ),
        ];

        for (expected, config) in oversized {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {} to be rejected, got {:?}", expected, other),
            }
        }

        let largest = Config {
            max_sequence_len: MAX_SEQUENCE_LEN,
            ..Config::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("groffhl/config.json"));
        }
    }

    #[test]
    fn test_cli_args_parse() {
        let args = CliArgs::parse_from(["groffhl", "--prefix", "hl_", "a.txt", "b.txt"]);
        assert_eq!(args.prefix.as_deref(), Some("hl_"));
        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }
}
