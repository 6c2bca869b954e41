//! Configuration management for quickdraw.
//!
//! - [`types`]: the schema ([`QuickdrawConfig`] and its sections).
//! - [`defaults`]: values used when a field or section is missing.
//! - [`loader`]: [`ConfigLoader`], which locates, parses and validates the
//!   TOML configuration.
//!
//! ```rust,ignore
//! use quickdraw_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("lock poll: {}ms", config.registry.lock_poll_interval_ms),
//!     Err(e) => {
//!         quickdraw_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration error: {}", e);
//!     }
//! }
//! ```

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{LoggingConfig, OverlayConfig, QuickdrawConfig, RegistryConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_quickdraw_config_default() {
        let config = QuickdrawConfig::default();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.registry.lock_poll_interval_ms, 10);
        assert_eq!(config.overlay, OverlayConfig::default());
    }

    #[test]
    fn test_quickdraw_config_deserialize_full() {
        let toml_data = r#"
            [logging]
            level = "trace"
            file_path = "/var/log/quickdraw.log"
            format = "json"

            [registry]
            lock_poll_interval_ms = 25

            [overlay]
            z_order = 2
            alpha = 128
        "#;
        let config: QuickdrawConfig = toml::from_str(toml_data).expect("Failed to deserialize");

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.file_path, Some(PathBuf::from("/var/log/quickdraw.log")));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.registry.lock_poll_interval_ms, 25);
        assert_eq!(config.overlay.z_order, 2);
        assert_eq!(config.overlay.alpha, 128);
    }

    #[test]
    fn test_quickdraw_config_rejects_unknown_fields() {
        let result: Result<QuickdrawConfig, _> = toml::from_str("[registry]\nmax_buffers = 3\n");
        assert!(result.is_err());
    }
}
