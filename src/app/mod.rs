//! Application configuration

mod config;

pub use config::{default_config_path, CliArgs, Config, ConfigError};
