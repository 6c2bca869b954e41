//! Configuration loading.
//!
//! [`ConfigLoader`] turns a TOML document into a validated
//! [`QuickdrawConfig`]. `load()` looks for `config.toml` in the application
//! config directory and falls back to defaults when it does not exist; the
//! other entry points take an explicit source. Every path ends in
//! validation, which normalizes the logging level and format, rejects values
//! the rest of the stack cannot use, and anchors relative log file paths in
//! the application state directory.

use std::path::Path;

use crate::config::QuickdrawConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as qd_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.toml` from the application config directory.
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load() -> Result<QuickdrawConfig, CoreError> {
        let config_path = get_app_config_dir()?.join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Loads the configuration from `path`, using defaults if the file does
    /// not exist.
    pub fn load_from_path(path: &Path) -> Result<QuickdrawConfig, CoreError> {
        let content = match qd_fs::read_to_string(path) {
            Ok(content) => content,
            Err(CoreError::Filesystem { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!("No configuration at {:?}, using defaults", path);
                String::new()
            }
            Err(CoreError::Filesystem { path, source, .. }) => {
                return Err(CoreError::Config(ConfigError::ReadError { path, source }));
            }
            Err(e) => return Err(e),
        };
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration document.
    pub fn from_toml_str(content: &str) -> Result<QuickdrawConfig, CoreError> {
        let mut config = if content.trim().is_empty() {
            QuickdrawConfig::default()
        } else {
            toml::from_str(content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    fn validate_config(config: &mut QuickdrawConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))));
            }
        }

        if let Some(log_path) = &config.logging.file_path {
            let absolute_path = if log_path.is_absolute() {
                log_path.clone()
            } else {
                get_app_state_dir()?.join(log_path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    qd_fs::ensure_dir_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        if config.registry.lock_poll_interval_ms == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "registry.lock_poll_interval_ms must be greater than zero.".to_string(),
            )));
        }

        Ok(())
    }
}
