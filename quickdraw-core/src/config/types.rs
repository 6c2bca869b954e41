//! Configuration data structures.
//!
//! These structs are populated by deserializing `config.toml`. Missing fields
//! take their values from [`super::defaults`]; unknown fields are rejected.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use quickdraw_core::config::LoggingConfig;
///
/// let log_config: LoggingConfig = toml::from_str(r#"
/// level = "debug"
/// format = "json"
/// "#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, None);
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the
    /// application state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Settings for the buffer registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// How often a blocked `lock` re-checks its cancellation token.
    #[serde(default = "defaults::default_lock_poll_interval_ms")]
    pub lock_poll_interval_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        defaults::default_registry_config()
    }
}

/// Parameters of the overlay requested for every quickdraw buffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    #[serde(default = "defaults::default_overlay_z_order")]
    pub z_order: u32,
    #[serde(default = "defaults::default_overlay_alpha")]
    pub alpha: u8,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        defaults::default_overlay_config()
    }
}

/// Root configuration structure.
///
/// ```
/// use quickdraw_core::config::QuickdrawConfig;
///
/// let config: QuickdrawConfig = toml::from_str(r#"
/// [registry]
/// lock_poll_interval_ms = 5
/// "#).unwrap();
/// assert_eq!(config.registry.lock_poll_interval_ms, 5);
/// assert_eq!(config.overlay.alpha, 0xff);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuickdrawConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}
