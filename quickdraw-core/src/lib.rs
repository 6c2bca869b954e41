//! # Quickdraw Core Library (`quickdraw-core`)
//!
//! Foundational pieces shared by the quickdraw crates:
//!
//! - **Error Handling**: [`CoreError`] with [`ConfigError`] and [`LoggingError`]
//!   for the infrastructure, and [`DriverError`] for opaque failures reported
//!   by display collaborators.
//! - **Configuration**: [`QuickdrawConfig`], loaded from TOML by [`ConfigLoader`].
//! - **Logging**: `tracing` subscriber setup, see [`initialize_logging`].
//! - **Geometry**: [`PointInt`], [`SizeInt`], [`RectInt`].
//!
//! ```rust,ignore
//! use quickdraw_core::{ConfigLoader, CoreError, initialize_logging};
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     initialize_logging(&config.logging, false)?;
//!     tracing::info!("quickdraw core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, LoggingConfig, OverlayConfig, QuickdrawConfig, RegistryConfig};
pub use error::{ConfigError, CoreError, DriverError, LoggingError};
pub use logging::{init_minimal_logging, initialize_logging};
pub use types::{PointInt, RectInt, SizeInt};
