//! Per-buffer draw lock.
//!
//! A drawer (the suspend-time drawing path) and the overlay execution path
//! serialize access to a buffer through this flag. `lock` blocks until the
//! flag flips from unlocked to locked; `unlock` clears it and wakes every
//! waiter. The flag is only read and written under `state`, the same mutex
//! the condition variable is paired with, so a wakeup cannot be missed.

use crate::error::BufferError;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cancellation request for blocking lock waits.
///
/// Clones share the same flag. A blocked waiter notices a cancellation at its
/// next poll and returns [`BufferError::Cancelled`] without the lock.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Re-arms the token after a cancellation has been handled.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub(crate) struct BufferLock {
    state: Mutex<bool>,
    waiters: Condvar,
    poll_interval: Duration,
}

impl BufferLock {
    pub(crate) fn new(poll_interval: Duration) -> Self {
        Self {
            state: Mutex::new(false),
            waiters: Condvar::new(),
            poll_interval,
        }
    }

    pub(crate) fn lock(&self, cancel: &CancelToken) -> Result<(), BufferError> {
        let mut locked = self.state.lock();
        loop {
            // A free lock wins over a pending cancellation.
            if !*locked {
                *locked = true;
                return Ok(());
            }
            if cancel.is_cancelled() {
                return Err(BufferError::Cancelled);
            }
            self.waiters.wait_for(&mut locked, self.poll_interval);
        }
    }

    pub(crate) fn unlock(&self) {
        let mut locked = self.state.lock();
        *locked = false;
        self.waiters.notify_all();
    }

    pub(crate) fn is_locked(&self) -> bool {
        *self.state.lock()
    }
}
