//! General utilities for the quickdraw core.
//!
//! - [`fs`]: directory creation with errors mapped to [`crate::error::CoreError`].
//! - [`paths`]: application-specific config and state directories.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
