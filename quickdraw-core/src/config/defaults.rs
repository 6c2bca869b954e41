//! Default configuration values.
//!
//! These functions back the `#[serde(default = ...)]` attributes in
//! [`super::types`].

use crate::config::{LoggingConfig, OverlayConfig, RegistryConfig};
use std::path::PathBuf;

pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file by default.
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(super) fn default_log_format() -> String {
    "text".to_string()
}

pub(super) fn default_registry_config() -> RegistryConfig {
    RegistryConfig {
        lock_poll_interval_ms: default_lock_poll_interval_ms(),
    }
}

pub(super) fn default_lock_poll_interval_ms() -> u64 {
    10
}

pub(super) fn default_overlay_config() -> OverlayConfig {
    OverlayConfig {
        z_order: default_overlay_z_order(),
        alpha: default_overlay_alpha(),
    }
}

pub(super) fn default_overlay_z_order() -> u32 {
    0
}

/// Fully opaque.
pub(super) fn default_overlay_alpha() -> u8 {
    0xff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging_config_values() {
        let lc = default_logging_config();
        assert_eq!(lc.level, "info");
        assert_eq!(lc.file_path, None);
        assert_eq!(lc.format, "text");
    }

    #[test]
    fn test_default_registry_and_overlay_values() {
        assert_eq!(default_registry_config().lock_poll_interval_ms, 10);
        let oc = default_overlay_config();
        assert_eq!(oc.z_order, 0);
        assert_eq!(oc.alpha, 255);
    }
}
