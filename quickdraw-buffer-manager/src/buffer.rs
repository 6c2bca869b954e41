//! Quickdraw buffers and their reference-counted handles.
//!
//! A [`Buffer`] is a graphics surface the consumer registered for drawing
//! while the main display pipeline is suspended. It references (but does not
//! own) the consumer's pixel memory and, while it is being displayed, an
//! overlay pipe of the display engine. Both are given back when the last
//! [`BufferHandle`] goes away.

use crate::error::BufferError;
use crate::lock::{BufferLock, CancelToken};
use parking_lot::Mutex;
use quickdraw_core::{DriverError, PointInt, RectInt};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

/// Consumer-assigned buffer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub i32);

impl BufferId {
    /// Reserved id of the erase buffer, which has no memory and no overlay.
    pub const ERASE: BufferId = BufferId(-1);
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Overlay pipe assigned by the display engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// Pixel formats accepted for quickdraw buffers.
///
/// The discriminants are the overlay engine's raw format codes, which is
/// what consumers put in a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb565 = 0,
    Xrgb8888 = 1,
    Argb8888 = 4,
    Rgb888 = 5,
    Rgba8888 = 12,
    Bgra8888 = 13,
    Rgbx8888 = 14,
}

impl PixelFormat {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(PixelFormat::Rgb565),
            1 => Some(PixelFormat::Xrgb8888),
            4 => Some(PixelFormat::Argb8888),
            5 => Some(PixelFormat::Rgb888),
            12 => Some(PixelFormat::Rgba8888),
            13 => Some(PixelFormat::Bgra8888),
            14 => Some(PixelFormat::Rgbx8888),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Registration request, as handed over by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDescriptor {
    pub buffer_id: BufferId,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Raw overlay engine format code, see [`PixelFormat`].
    pub format: u32,
    /// Consumer handle of the pixel memory. `None` for memoryless buffers.
    pub memory: Option<i32>,
}

impl BufferDescriptor {
    /// Descriptor of the erase buffer: no memory and an empty rectangle that
    /// `erase` rewrites before every use.
    pub fn erase() -> Self {
        Self {
            buffer_id: BufferId::ERASE,
            x: 0,
            y: 0,
            w: 0,
            h: 0,
            format: PixelFormat::Rgb565.as_raw(),
            memory: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(PixelFormat, RectInt), BufferError> {
        if self.w < 0 || self.h < 0 {
            return Err(BufferError::InvalidArgument(format!(
                "buffer {} has negative size {}x{}",
                self.buffer_id, self.w, self.h
            )));
        }
        let format = PixelFormat::from_raw(self.format).ok_or_else(|| {
            BufferError::InvalidArgument(format!(
                "buffer {} has unknown pixel format {}",
                self.buffer_id, self.format
            ))
        })?;
        Ok((
            format,
            RectInt::from_coords(self.x, self.y, self.w as u32, self.h as u32),
        ))
    }
}

/// Releases overlay pipes on behalf of a dying buffer.
pub trait OverlaySink: Send + Sync {
    fn unset(&self, overlay_id: OverlayId) -> Result<(), DriverError>;
}

/// A referenced consumer memory object.
///
/// Dropping it gives the reference back.
pub trait MemoryObject: Send + Sync {
    /// Publishes a handle to the memory that the display process can pass
    /// to the overlay engine.
    fn install_handle(&self) -> Result<i32, DriverError>;

    /// Withdraws a handle returned by [`MemoryObject::install_handle`].
    fn remove_handle(&self, handle: i32);
}

/// Resolves consumer memory handles into referenced memory objects.
#[cfg_attr(test, mockall::automock)]
pub trait MemoryProvider: Send + Sync {
    /// Returns `None` if the handle does not name memory the caller may use.
    fn acquire(&self, user_handle: i32) -> Option<Box<dyn MemoryObject>>;
}

#[derive(Debug)]
struct BufferState {
    rect: RectInt,
    overlay_id: Option<OverlayId>,
    mem_handle: Option<i32>,
}

pub struct Buffer {
    id: BufferId,
    format: PixelFormat,
    state: Mutex<BufferState>,
    lock: BufferLock,
    memory: Option<Box<dyn MemoryObject>>,
    sink: Arc<dyn OverlaySink>,
}

impl Buffer {
    pub(crate) fn new(
        id: BufferId,
        format: PixelFormat,
        rect: RectInt,
        memory: Option<Box<dyn MemoryObject>>,
        sink: Arc<dyn OverlaySink>,
        lock_poll_interval: Duration,
    ) -> Self {
        Self {
            id,
            format,
            state: Mutex::new(BufferState {
                rect,
                overlay_id: None,
                mem_handle: None,
            }),
            lock: BufferLock::new(lock_poll_interval),
            memory,
            sink,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Destination rectangle (stored position and size).
    pub fn rect(&self) -> RectInt {
        self.state.lock().rect
    }

    pub fn set_rect(&self, rect: RectInt) {
        self.state.lock().rect = rect;
    }

    pub fn position(&self) -> PointInt {
        self.state.lock().rect.origin
    }

    /// Only memory-backed buffers use overlays.
    pub fn has_memory(&self) -> bool {
        self.memory.is_some()
    }

    pub fn overlay_id(&self) -> Option<OverlayId> {
        self.state.lock().overlay_id
    }

    pub fn set_overlay_id(&self, overlay_id: OverlayId) {
        self.state.lock().overlay_id = Some(overlay_id);
    }

    /// Hands the overlay pipe back to the display engine.
    ///
    /// A memoryless buffer never has an overlay, so this is a no-op for it.
    pub fn unset_overlay(&self) -> Result<(), BufferError> {
        if !self.has_memory() {
            return Ok(());
        }
        // Taken under the state lock, released before calling the engine.
        let overlay_id = self.state.lock().overlay_id.take();
        match overlay_id {
            Some(overlay_id) => {
                tracing::debug!("Unsetting overlay {:?} of buffer {}", overlay_id, self.id);
                self.sink.unset(overlay_id).map_err(|e| {
                    tracing::error!("Unsetting overlay of buffer {} failed: {}", self.id, e);
                    BufferError::from(e)
                })
            }
            None => {
                tracing::warn!("Buffer {} has no overlay to unset", self.id);
                Err(BufferError::InvalidArgument(format!(
                    "buffer {} has no overlay set",
                    self.id
                )))
            }
        }
    }

    /// Returns the process-visible memory handle, installing it on first use.
    pub fn ensure_handle(&self) -> Result<i32, BufferError> {
        let memory = self.memory.as_ref().ok_or_else(|| {
            BufferError::InvalidArgument(format!("buffer {} has no memory", self.id))
        })?;
        let mut state = self.state.lock();
        if let Some(handle) = state.mem_handle {
            return Ok(handle);
        }
        let handle = memory.install_handle().map_err(|e| {
            tracing::error!("Unable to install memory handle for buffer {}: {}", self.id, e);
            BufferError::from(e)
        })?;
        tracing::debug!("Buffer {} memory handle {}", self.id, handle);
        state.mem_handle = Some(handle);
        Ok(handle)
    }

    /// Blocks until this caller holds the buffer's draw lock.
    pub fn lock(&self, cancel: &CancelToken) -> Result<(), BufferError> {
        tracing::debug!("Locking buffer {}", self.id);
        self.lock.lock(cancel).map_err(|e| {
            tracing::debug!("Lock wait on buffer {} ended: {}", self.id, e);
            e
        })
    }

    pub fn unlock(&self) {
        tracing::debug!("Unlocking buffer {}", self.id);
        self.lock.unlock();
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("format", &self.format)
            .field("state", &*self.state.lock())
            .field("has_memory", &self.has_memory())
            .finish()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        tracing::debug!("Deleting buffer {}", self.id);
        let (overlay_id, mem_handle) = {
            let state = self.state.get_mut();
            (state.overlay_id.take(), state.mem_handle.take())
        };
        if let Some(overlay_id) = overlay_id {
            if let Err(e) = self.sink.unset(overlay_id) {
                tracing::error!("Unsetting overlay of deleted buffer {} failed: {}", self.id, e);
            }
        }
        if let (Some(handle), Some(memory)) = (mem_handle, self.memory.as_ref()) {
            memory.remove_handle(handle);
        }
        // `memory` is dropped after this, giving the consumer reference back.
    }
}

/// Counted reference to a [`Buffer`].
///
/// Cloning takes a reference. Dropping a handle, or calling
/// [`BufferHandle::release`], gives it back; the buffer's resources are
/// released synchronously when the last one goes.
#[derive(Clone)]
pub struct BufferHandle(Arc<Buffer>);

impl BufferHandle {
    pub(crate) fn new(buffer: Buffer) -> Self {
        Self(Arc::new(buffer))
    }

    /// Drops this reference. Returns `true` if it was the last one and the
    /// buffer has been deleted.
    pub fn release(self) -> bool {
        let id = self.0.id;
        let deleted = Arc::into_inner(self.0).is_some();
        tracing::debug!("Released buffer {} (deleted: {})", id, deleted);
        deleted
    }

    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    pub fn ptr_eq(a: &BufferHandle, b: &BufferHandle) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for BufferHandle {
    type Target = Buffer;

    fn deref(&self) -> &Buffer {
        &self.0
    }
}

impl fmt::Debug for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BufferHandle").field(&self.0.id).finish()
    }
}
