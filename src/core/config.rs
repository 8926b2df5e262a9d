//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! Every section is optional: without a file the client runs in demo mode
//! against the public endpoint.

use crate::core::constants::DEFAULT_API_URL;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Default configuration file, looked up in the current directory
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Environment variable overriding the activation key
pub const API_KEY_ENV: &str = "STEGANOGRAPHY_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            endpoint: default_endpoint(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Activation key, `None` for demo mode
    pub api_key: Option<String>,

    /// Web API endpoint
    pub endpoint: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Logging level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl Config {
    fn from_toml(config: TomlConfig) -> Self {
        Config {
            api_key: config.api.key.filter(|k| !k.is_empty()),
            endpoint: config.api.endpoint,
            request_timeout: config.api.request_timeout,
            log_level: config.logging.log_level,
        }
    }

    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TOML file cannot be read or parsed
    /// - The endpoint is not an http(s) URL
    /// - The request timeout is zero
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        let config = Self::from_toml(config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment and config file
    ///
    /// Uses `CONFIG_PATH` when set, otherwise `config.toml` in the current
    /// directory if it exists, otherwise built-in defaults. A non-empty
    /// `STEGANOGRAPHY_API_KEY` replaces the configured key.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok(), Path::new("."))
    }

    /// Same as `from_env`, with an explicit variable lookup and directory
    /// searched for `config.toml`
    pub fn from_env_with<F>(lookup: F, dir: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_file = dir.join(DEFAULT_CONFIG_FILE);
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(&path)
                .with_context(|| format!("{} points to {}", CONFIG_PATH_ENV, path))?,
            None if default_file.is_file() => Self::from_file(&default_file)?,
            None => Self::default(),
        };
        config.apply_env(&lookup);
        Ok(config)
    }

    /// Replace key and log level with explicitly given values
    ///
    /// An empty key switches to demo mode.
    pub fn apply_overrides(&mut self, key: Option<&str>, log_level: Option<&str>) {
        if let Some(key) = key {
            self.api_key = Some(key.to_string()).filter(|k| !k.is_empty());
        }
        if let Some(level) = log_level {
            self.log_level = level.to_string();
        }
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            bail!("Invalid endpoint '{}': must be an http(s) URL", self.endpoint);
        }
        if self.request_timeout == 0 {
            bail!("request_timeout must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file.flush().unwrap();
        file
    }

    fn create_test_config() -> NamedTempFile {
        write_config(
            r#"
            [api]
            key = "YOUR-WEB-API-KEY"
            endpoint = "http://127.0.0.1:8080/v1"
            request_timeout = 15

            [logging]
            log_level = "debug"
        "#,
        )
    }

    #[test]
    fn test_load_config() {
        let file = create_test_config();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, Some("YOUR-WEB-API-KEY".to_string()));
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/v1");
        assert_eq!(config.request_timeout, 15);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, 90);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_empty_key_means_demo() {
        let file = write_config("[api]\nkey = \"\"\n");
        let config = Config::from_file(file.path()).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let file = write_config("[api]\nendpoint = \"ftp://example.com\"\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = write_config("[api]\nrequest_timeout = 0\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file("/nonexistent/config.toml").is_err());
    }

    #[test]
    fn test_env_key_override() {
        let mut config = Config::default();
        config.apply_env(|name| {
            (name == API_KEY_ENV).then(|| "ENV-KEY".to_string())
        });
        assert_eq!(config.api_key, Some("ENV-KEY".to_string()));

        // an empty variable leaves the configured key alone
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.api_key, Some("ENV-KEY".to_string()));
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_from_env_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_env_with(no_env, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_env_picks_up_config_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[api]\nkey = \"FILE-KEY\"\n[logging]\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let config = Config::from_env_with(no_env, dir.path()).unwrap();
        assert_eq!(config.api_key, Some("FILE-KEY".to_string()));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_from_env_missing_config_path_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        let missing = missing.to_string_lossy().into_owned();

        let result = Config::from_env_with(
            |name| (name == CONFIG_PATH_ENV).then(|| missing.clone()),
            dir.path(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_env_config_path_wins_over_default_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[api]\nkey = \"DEFAULT\"\n").unwrap();
        let file = create_test_config();
        let path = file.path().to_string_lossy().into_owned();

        let config = Config::from_env_with(
            |name| (name == CONFIG_PATH_ENV).then(|| path.clone()),
            dir.path(),
        )
        .unwrap();
        assert_eq!(config.api_key, Some("YOUR-WEB-API-KEY".to_string()));
    }

    #[test]
    fn test_from_env_key_variable_beats_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[api]\nkey = \"FILE-KEY\"\n").unwrap();

        let config = Config::from_env_with(
            |name| (name == API_KEY_ENV).then(|| "ENV-KEY".to_string()),
            dir.path(),
        )
        .unwrap();
        assert_eq!(config.api_key, Some("ENV-KEY".to_string()));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.api_key = Some("FILE-KEY".to_string());

        config.apply_overrides(None, None);
        assert_eq!(config.api_key, Some("FILE-KEY".to_string()));
        assert_eq!(config.log_level, "info");

        config.apply_overrides(Some("FLAG-KEY"), Some("debug"));
        assert_eq!(config.api_key, Some("FLAG-KEY".to_string()));
        assert_eq!(config.log_level, "debug");

        // an empty key on the command line means demo mode
        config.apply_overrides(Some(""), None);
        assert_eq!(config.api_key, None);
    }
}
