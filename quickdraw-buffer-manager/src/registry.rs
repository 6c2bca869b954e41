//! Registry of quickdraw buffers.
//!
//! Maps consumer buffer ids to buffers. A single mutex guards the map and is
//! held only while inserting, removing or looking up; buffers are always
//! released after it has been dropped, so the overlay engine calls made by a
//! dying buffer never run under it.

use crate::buffer::{Buffer, BufferDescriptor, BufferHandle, BufferId, MemoryProvider, OverlaySink};
use crate::error::BufferError;
use crate::lock::CancelToken;
use parking_lot::Mutex;
use quickdraw_core::RegistryConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub struct BufferRegistry {
    buffers: Mutex<HashMap<BufferId, BufferHandle>>,
    memory: Arc<dyn MemoryProvider>,
    overlay_sink: Arc<dyn OverlaySink>,
    lock_poll_interval: Duration,
}

impl BufferRegistry {
    /// Creates an empty registry. Call [`BufferRegistry::reset`] to register
    /// the erase buffer.
    pub fn new(
        memory: Arc<dyn MemoryProvider>,
        overlay_sink: Arc<dyn OverlaySink>,
        config: &RegistryConfig,
    ) -> Self {
        Self {
            buffers: Mutex::new(HashMap::new()),
            memory,
            overlay_sink,
            lock_poll_interval: Duration::from_millis(config.lock_poll_interval_ms),
        }
    }

    /// Drops every registered buffer and registers a fresh erase buffer.
    pub fn reset(&self) -> Result<(), BufferError> {
        tracing::debug!("Resetting quickdraw buffer registry");
        let drained: Vec<BufferHandle> = self.buffers.lock().drain().map(|(_, b)| b).collect();
        for buffer in drained {
            buffer.release();
        }
        self.create(&BufferDescriptor::erase())
    }

    /// Registers a new buffer.
    ///
    /// Fails with `AlreadyExists` for a duplicate id, `InvalidArgument` for a
    /// malformed descriptor and `PermissionDenied` when the memory handle
    /// cannot be referenced. The registry is unchanged on failure.
    pub fn create(&self, descriptor: &BufferDescriptor) -> Result<(), BufferError> {
        let id = descriptor.buffer_id;
        tracing::debug!("Creating buffer {}", id);

        let (format, rect) = descriptor.validate().map_err(|e| {
            tracing::error!("Rejecting buffer {}: {}", id, e);
            e
        })?;

        let mut buffers = self.buffers.lock();
        if buffers.contains_key(&id) {
            tracing::error!("Duplicate buffer_id: {}", id);
            return Err(BufferError::AlreadyExists(id));
        }

        let memory = match descriptor.memory {
            Some(user_handle) => match self.memory.acquire(user_handle) {
                Some(memory) => Some(memory),
                None => {
                    tracing::error!("Unable to reference memory {} for buffer {}", user_handle, id);
                    return Err(BufferError::PermissionDenied(id));
                }
            },
            None => None,
        };

        let buffer = Buffer::new(
            id,
            format,
            rect,
            memory,
            Arc::clone(&self.overlay_sink),
            self.lock_poll_interval,
        );
        buffers.insert(id, BufferHandle::new(buffer));
        tracing::debug!("Buffer {} registered ({} total)", id, buffers.len());
        Ok(())
    }

    /// Returns a new reference to the buffer registered under `id`.
    pub fn lookup(&self, id: BufferId) -> Option<BufferHandle> {
        let buffer = self.buffers.lock().get(&id).cloned();
        tracing::trace!("Lookup buffer {}: found {}", id, buffer.is_some());
        buffer
    }

    /// Unregisters a buffer and drops the registry's reference to it.
    ///
    /// Returns whether the buffer was deleted right away; it stays alive
    /// while other references are outstanding.
    pub fn destroy(&self, id: BufferId) -> Result<bool, BufferError> {
        tracing::debug!("Destroying buffer {}", id);
        let removed = self.buffers.lock().remove(&id);
        match removed {
            Some(buffer) => Ok(buffer.release()),
            None => {
                tracing::error!("No buffer found with ID: {}", id);
                Err(BufferError::NotFound(id))
            }
        }
    }

    /// Gives back a reference obtained from [`BufferRegistry::lookup`].
    pub fn release(buffer: BufferHandle) -> bool {
        buffer.release()
    }

    /// Takes the draw lock of the buffer registered under `id`.
    pub fn lock_buffer(&self, id: BufferId, cancel: &CancelToken) -> Result<(), BufferError> {
        let buffer = self.lookup(id).ok_or(BufferError::NotFound(id))?;
        let result = buffer.lock(cancel);
        buffer.release();
        result
    }

    /// Releases the draw lock of the buffer registered under `id`.
    pub fn unlock_buffer(&self, id: BufferId) -> Result<(), BufferError> {
        let buffer = self.lookup(id).ok_or(BufferError::NotFound(id))?;
        buffer.unlock();
        buffer.release();
        Ok(())
    }

    pub fn contains(&self, id: BufferId) -> bool {
        self.buffers.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.buffers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.lock().is_empty()
    }
}
