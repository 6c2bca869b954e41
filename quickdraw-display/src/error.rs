//! Errors of the quickdraw lifecycle calls.

use quickdraw_buffer_manager::BufferError;
use quickdraw_core::error::errno;
use quickdraw_core::DriverError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Unknown buffer, out-of-bounds rectangle, or no prepared session.
    #[error("invalid quickdraw request: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl SessionError {
    /// Negative errno-style status for the consumer.
    pub fn errno(&self) -> i32 {
        match self {
            SessionError::InvalidArgument(_) => -errno::EINVAL,
            SessionError::Buffer(e) => e.errno(),
            SessionError::Driver(e) => e.code,
        }
    }
}
