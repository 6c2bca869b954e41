//! Application-specific path resolution.
//!
//! Resolves the directories quickdraw reads its configuration from and writes
//! relative log files into, using `directories-next`.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Quickdraw";
const APPLICATION: &str = "quickdraw";

/// Returns the application-specific configuration directory,
/// e.g. `~/.config/quickdraw` on Linux.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Config".to_string(),
            })
        })
}

/// Returns the application-specific state directory, used to anchor relative
/// log file paths.
///
/// `ProjectDirs` has no state directory, so `$XDG_STATE_HOME` (or
/// `~/.local/state`) is joined with the application name.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            let base = match std::env::var("XDG_STATE_HOME") {
                Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                _ => dirs.home_dir().join(".local/state"),
            };
            base.join(APPLICATION)
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App State".to_string(),
            })
        })
}
