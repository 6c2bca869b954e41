//! Errors reported by the buffer registry and the draw locks.

use crate::buffer::BufferId;
use quickdraw_core::error::errno;
use quickdraw_core::DriverError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// No buffer is registered under the id, or no buffer was given.
    #[error("no quickdraw buffer with id {0}")]
    NotFound(BufferId),

    #[error("quickdraw buffer id {0} is already registered")]
    AlreadyExists(BufferId),

    /// Malformed descriptor or a buffer in the wrong state for the request.
    #[error("invalid buffer argument: {0}")]
    InvalidArgument(String),

    /// The consumer's memory object could not be referenced.
    #[error("unable to reference the memory of buffer {0}")]
    PermissionDenied(BufferId),

    /// A blocking lock wait was interrupted; the lock was not taken.
    #[error("wait for buffer lock was cancelled")]
    Cancelled,

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl BufferError {
    /// Negative errno-style status, as an ioctl layer reports it.
    pub fn errno(&self) -> i32 {
        match self {
            BufferError::NotFound(_) => -errno::ENOENT,
            BufferError::AlreadyExists(_) => -errno::EEXIST,
            BufferError::InvalidArgument(_) => -errno::EINVAL,
            BufferError::PermissionDenied(_) => -errno::EPERM,
            BufferError::Cancelled => -errno::EINTR,
            BufferError::Driver(e) => e.code,
        }
    }
}
