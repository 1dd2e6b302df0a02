//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Published oral health indicators workbook
pub const DEFAULT_DATASET_URL: &str =
    "https://github.com/rmejia41/open_datasets/raw/main/ML_state_oralhealthindicators.xlsx";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the dataset is loaded from at startup
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_url")]
    pub url: String,

    /// Local copy; takes precedence over `url` when set
    pub path: Option<PathBuf>,

    #[serde(default = "default_fetch_timeout")]
    pub request_timeout_secs: u64,
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: default_dataset_url(),
            path: None,
            request_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("oralscope").join("config.toml")),
            Some(PathBuf::from("/etc/oralscope/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Dataset overrides
        if let Some(url) = lookup("ORALSCOPE_DATASET_URL") {
            self.dataset.url = url;
        }
        if let Some(path) = lookup("ORALSCOPE_DATASET_PATH") {
            self.dataset.path = Some(PathBuf::from(path));
        }

        // Server overrides
        if let Some(host) = lookup("ORALSCOPE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ORALSCOPE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("ORALSCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("ORALSCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Oralscope Configuration
#
# Environment variables override these settings:
# - ORALSCOPE_DATASET_URL
# - ORALSCOPE_DATASET_PATH
# - ORALSCOPE_HOST
# - ORALSCOPE_PORT
# - ORALSCOPE_LOG_LEVEL
# - ORALSCOPE_LOG_FORMAT

[dataset]
# Workbook (.xlsx) or CSV with State, Location, outcome and indicator columns
url = "{url}"

# Local copy of the dataset, used instead of the URL when set
# path = "./ML_state_oralhealthindicators.xlsx"

# Download timeout in seconds
request_timeout_secs = 30

[server]
# Dashboard host
host = "127.0.0.1"

# Dashboard port
port = 8050

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        url = DEFAULT_DATASET_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset.url, DEFAULT_DATASET_URL);
        assert!(config.dataset.path.is_none());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.dataset.url, DEFAULT_DATASET_URL);
        assert_eq!(config.dataset.request_timeout_secs, 30);
        assert_eq!(config.server.port, 8050);
        assert!(config.server.cors_origins.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.dataset.url, DEFAULT_DATASET_URL);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ORALSCOPE_DATASET_PATH", "/data/oral.csv"),
            ("ORALSCOPE_PORT", "8123"),
            ("ORALSCOPE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dataset.path, Some(PathBuf::from("/data/oral.csv")));
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "ORALSCOPE_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 8050);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/oralscope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server\nport = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
