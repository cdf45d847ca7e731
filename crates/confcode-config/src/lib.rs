//! Configuration management for confcode.
//!
//! Parses `conf-code.json` configuration files with serde and validates
//! the result before any network traffic happens.
//!
//! ## Environment Variable Expansion
//!
//! Credential and URL values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `user`, `token`, `base`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default configuration filename, looked up in the current directory.
pub const CONFIG_FILENAME: &str = "conf-code.json";

/// Mapping from heading text to the local file synced into its code macro.
pub type FileMapping = BTreeMap<String, PathBuf>;

/// Application configuration, loaded once and immutable for the run.
#[derive(Debug, Deserialize)]
pub struct SyncConfig {
    /// Confluence account name for HTTP basic authentication.
    pub user: String,
    /// API token for HTTP basic authentication.
    pub token: String,
    /// REST API root URL (e.g. `https://wiki.example.com/rest/api`).
    #[serde(rename = "base")]
    pub base_url: String,
    /// Space display name, resolved to a space key at runtime.
    pub space: String,
    /// Page title -> (heading text -> file path).
    pub pages: BTreeMap<String, FileMapping>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g. "token").
        field: String,
        /// Error message (e.g. "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

impl SyncConfig {
    /// Load configuration from a JSON file.
    ///
    /// Environment variables in `user`, `token` and `base` are expanded
    /// and the result is validated before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, the JSON is malformed,
    /// expansion references an unset variable, or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any required field is empty or
    /// the base URL has an invalid scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.user, "user")?;
        require_non_empty(&self.token, "token")?;
        require_non_empty(&self.base_url, "base")?;
        require_http_url(&self.base_url, "base")?;
        require_non_empty(&self.space, "space")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.user = expand::expand_env(&self.user, "user")?;
        self.token = expand::expand_env(&self.token, "token")?;
        self.base_url = expand::expand_env(&self.base_url, "base")?;
        Ok(())
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}
