//! # Quickdraw Buffer Manager
//!
//! Bookkeeping for the buffers a consumer registers for quickdraw, the
//! low-power partial-screen drawing done while the main display pipeline is
//! suspended.
//!
//! - [`BufferRegistry`]: id → buffer map with create / lookup / destroy.
//! - [`BufferHandle`]: counted reference; the buffer's overlay, memory handle
//!   and memory reference are given back when the last one is released.
//! - Draw locks: [`Buffer::lock`] / [`Buffer::unlock`], interruptible through
//!   a [`CancelToken`].

pub mod buffer;
pub mod error;
pub mod lock;
pub mod registry;

pub use buffer::{
    Buffer, BufferDescriptor, BufferHandle, BufferId, MemoryObject, MemoryProvider, OverlayId,
    OverlaySink, PixelFormat,
};
pub use error::BufferError;
pub use lock::CancelToken;
pub use registry::BufferRegistry;
