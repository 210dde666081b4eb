//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides. Every
//! setting has a default, so running without any config reproduces the
//! stock dashboard: the bundled dataset and boundary files served on
//! `127.0.0.1:8050`.

use crate::geo::DEFAULT_FEATURE_ID_KEY;
use crate::layout::LayoutOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Startup input files
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    #[serde(default = "default_boundaries_path")]
    pub boundaries_path: PathBuf,

    /// Dotted path of the GeoJSON property holding the state name
    #[serde(default = "default_feature_id_key")]
    pub feature_id_key: String,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("assets/Amazon dataset.json")
}

fn default_boundaries_path() -> PathBuf {
    PathBuf::from("assets/india_states.geojson")
}

fn default_feature_id_key() -> String {
    DEFAULT_FEATURE_ID_KEY.to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            boundaries_path: default_boundaries_path(),
            feature_id_key: default_feature_id_key(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page appearance
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_plotly_src")]
    pub plotly_src: String,
}

fn default_title() -> String {
    LayoutOptions::default().title
}

fn default_plotly_src() -> String {
    LayoutOptions::default().plotly_src
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            plotly_src: default_plotly_src(),
        }
    }
}

impl PageConfig {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            title: self.title.clone(),
            plotly_src: self.plotly_src.clone(),
            ..Default::default()
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
    "salesboard=info,tower_http=debug".to_string()
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

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("salesboard").join("config.toml")),
            Some(PathBuf::from("/etc/salesboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
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

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Data overrides
        if let Some(path) = lookup("SALESBOARD_DATASET") {
            self.data.dataset_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SALESBOARD_BOUNDARIES") {
            self.data.boundaries_path = PathBuf::from(path);
        }
        if let Some(key) = lookup("SALESBOARD_FEATURE_KEY") {
            self.data.feature_id_key = key;
        }

        // API overrides
        if let Some(host) = lookup("SALESBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("SALESBOARD_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid SALESBOARD_API_PORT: {}", port),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("SALESBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SALESBOARD_LOG_FORMAT") {
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
    r#"# Salesboard Configuration
#
# Environment variables override these settings:
# - SALESBOARD_DATASET
# - SALESBOARD_BOUNDARIES
# - SALESBOARD_FEATURE_KEY
# - SALESBOARD_API_HOST
# - SALESBOARD_API_PORT
# - SALESBOARD_LOG_LEVEL
# - SALESBOARD_LOG_FORMAT

[data]
# Sales records: JSON lines, or CSV when the extension is .csv
dataset_path = "assets/Amazon dataset.json"

# State boundaries (GeoJSON FeatureCollection)
boundaries_path = "assets/india_states.geojson"

# Feature property holding the state name
feature_id_key = "properties.NAME_1"

[api]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8050

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[page]
# Page header and document title
title = "Amazon Sales Dashboard"

# Plotly bundle
plotly_src = "https://cdn.plot.ly/plotly-2.35.2.min.js"

[logging]
# Log filter directive: trace, debug, info, warn, error, or per-target
level = "salesboard=info,tower_http=debug"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.addr(), "127.0.0.1:8050");
        assert_eq!(
            config.data.dataset_path,
            PathBuf::from("assets/Amazon dataset.json")
        );
        assert_eq!(config.data.feature_id_key, "properties.NAME_1");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.data.dataset_path, defaults.data.dataset_path);
        assert_eq!(config.data.boundaries_path, defaults.data.boundaries_path);
        assert_eq!(config.api.port, defaults.api.port);
        assert_eq!(config.page.title, defaults.page.title);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.data.feature_id_key, "properties.NAME_1");
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[api\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SALESBOARD_DATASET", "data/sales.csv"),
            ("SALESBOARD_API_PORT", "9100"),
            ("SALESBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.dataset_path, PathBuf::from("data/sales.csv"));
        assert_eq!(config.api.port, 9100);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "SALESBOARD_API_PORT").then(|| "http".to_string()));
        assert_eq!(config.api.port, 8050);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/salesboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
