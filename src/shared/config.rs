use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::Deserialize;

use super::logging::{LogFormat, LogLevel};
use super::process::DEFAULT_TIMEOUT;

/// Top-level configuration for gitflow-pr.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// External process settings.
    #[serde(default)]
    pub process: ProcessConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// External process configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProcessConfig {
    /// Seconds a single git or gh invocation may run before it is killed (default: 300).
    #[serde(default = "default_timeout_secs")]
    #[schemars(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProcessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log level ("info" or "debug", default: "info").
    #[serde(default)]
    pub level: LogLevel,

    /// Log format ("plain" or "json", default: "plain").
    #[serde(default)]
    pub format: LogFormat,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Value parsed but unusable
    #[error("Invalid config file {path}: {message}")]
    InvalidValue { path: PathBuf, message: String },
}

/// Returns the XDG config directory (~/.config or $XDG_CONFIG_HOME).
/// Empty values are treated as unset.
fn config_dir() -> Option<PathBuf> {
    let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
    non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Load configuration from `explicit` when given, otherwise from
/// ~/.config/gitflow-pr/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    let Some(dir) = config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir.join("gitflow-pr"))
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in ["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

/// Load a config file the user named explicitly. A missing file is an error.
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    let config: Config =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if config.process.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            path: path.to_path_buf(),
            message: "process.timeout_secs must be greater than 0".to_string(),
        }
        .into());
    }

    Ok(config)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
