//! Error handling for the quickdraw core layer.
//!
//! This module defines the error types shared by every crate of the quickdraw
//! workspace. They are built with `thiserror` so that the higher layers can
//! wrap them with `#[from]` and propagate with `?`.
//!
//! - [`CoreError`] covers the infrastructure concerns of this crate
//!   (configuration, logging, filesystem).
//! - [`DriverError`] is the opaque failure reported by a display collaborator
//!   (panel, framebuffer, overlay engine, memory provider). It is never
//!   interpreted, only propagated.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the quickdraw infrastructure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while installing the global subscriber.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem operations, such as creating the log directory.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but holds values that cannot be used.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A base directory (e.g. the XDG config home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// A log filter string could not be parsed.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),

    #[error("Logging I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Failure reported by a display collaborator.
///
/// `code` is the collaborator's own (negative, errno-style) status and is
/// handed back to the quickdraw consumer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{context} failed with status {code}")]
pub struct DriverError {
    pub code: i32,
    pub context: String,
}

impl DriverError {
    pub fn new(code: i32, context: impl Into<String>) -> Self {
        Self {
            code,
            context: context.into(),
        }
    }
}

/// Errno values used when translating errors into ioctl-style statuses.
pub mod errno {
    pub const EPERM: i32 = 1;
    pub const ENOENT: i32 = 2;
    pub const EINTR: i32 = 4;
    pub const EEXIST: i32 = 17;
    pub const EINVAL: i32 = 22;
}
