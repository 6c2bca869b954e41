//! Quickdraw overlay execution.
//!
//! A [`QuickdrawSession`] shows registered quickdraw buffers on a panel whose
//! main display pipeline is suspended, one buffer at a time:
//!
//! ```text
//! Idle --prepare--> Prepared --execute/erase--> Active --execute/erase--> Active
//!   ^                                                                       |
//!   +------------------------------- cleanup -------------------------------+
//! ```
//!
//! `prepare` wakes the pipeline and framebuffer and remembers the full-screen
//! resolution. Each `execute` switches the panel to a partial window the
//! size of the buffer and, for memory-backed buffers, puts the buffer on an
//! overlay pipe. The buffer being displayed (the *active* buffer) stays
//! referenced and draw-locked until the next `execute` or `cleanup`, so no
//! drawer writes into it while it is on screen. `cleanup` restores the full
//! screen and puts the display back to sleep.
//!
//! Every lifecycle call holds the session mutex for its whole sequence, so
//! the active buffer slot has a single writer.

use crate::backend::{DisplayBackend, OverlayRequest, ResumeStatus};
use crate::error::SessionError;
use parking_lot::Mutex;
use quickdraw_buffer_manager::{BufferError, BufferHandle, BufferId, BufferRegistry, CancelToken};
use quickdraw_core::{OverlayConfig, PointInt, RectInt, SizeInt};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Prepared,
    Active,
}

/// Result of [`QuickdrawSession::prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareOutcome {
    Ready,
    /// The framebuffer recovered the panel from an ESD event while
    /// resuming; the consumer should redraw everything.
    EsdRecovered,
}

struct SessionInner {
    state: SessionState,
    saved_resolution: Option<SizeInt>,
    active: Option<BufferHandle>,
    panel_state: u8,
    in_progress: bool,
}

pub struct QuickdrawSession {
    registry: Arc<BufferRegistry>,
    backend: DisplayBackend,
    overlay: OverlayConfig,
    cancel: CancelToken,
    inner: Mutex<SessionInner>,
}

impl QuickdrawSession {
    pub fn new(
        registry: Arc<BufferRegistry>,
        backend: DisplayBackend,
        overlay: OverlayConfig,
    ) -> Self {
        Self {
            registry,
            backend,
            overlay,
            cancel: CancelToken::new(),
            inner: Mutex::new(SessionInner {
                state: SessionState::Idle,
                saved_resolution: None,
                active: None,
                panel_state: 0,
                in_progress: false,
            }),
        }
    }

    pub fn registry(&self) -> &Arc<BufferRegistry> {
        &self.registry
    }

    /// Token that interrupts an `execute` blocked on a buffer's draw lock.
    ///
    /// Only a cancellation issued while an `execute` or `erase` is running
    /// counts; each call clears one left over from before it started.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn active_buffer_id(&self) -> Option<BufferId> {
        self.inner.lock().active.as_ref().map(|b| b.id())
    }

    pub fn in_progress(&self) -> bool {
        self.inner.lock().in_progress
    }

    pub fn panel_state(&self) -> u8 {
        self.inner.lock().panel_state
    }

    /// Full-screen resolution captured by the last `prepare`.
    pub fn saved_resolution(&self) -> Option<SizeInt> {
        self.inner.lock().saved_resolution
    }

    #[instrument(level = "debug", skip(self))]
    pub fn prepare(&self, panel_state: u8) -> PrepareOutcome {
        let mut inner = self.inner.lock();
        inner.panel_state = panel_state;
        inner.in_progress = true;

        if inner.state == SessionState::Idle {
            inner.saved_resolution = Some(self.backend.framebuffer.resolution());
            inner.state = SessionState::Prepared;
        } else {
            // The framebuffer is in partial mode; its resolution is the
            // active buffer's, not the panel's.
            warn!(
                "Quickdraw already prepared, keeping saved resolution {:?}",
                inner.saved_resolution
            );
        }

        self.backend.pipeline.resume();
        let outcome = match self.backend.framebuffer.resume() {
            ResumeStatus::Resumed => PrepareOutcome::Ready,
            ResumeStatus::EsdRecovered => PrepareOutcome::EsdRecovered,
        };
        debug!(?outcome, saved = ?inner.saved_resolution, "Quickdraw prepared");
        outcome
    }

    /// Displays the buffer registered under `buffer_id` at (`x`, `y`).
    ///
    /// A negative `x` or `y` selects the buffer's stored position.
    #[instrument(level = "debug", skip(self))]
    pub fn execute(&self, buffer_id: BufferId, x: i32, y: i32) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        self.execute_locked(&mut inner, buffer_id, PointInt::new(x, y))
    }

    /// Clears the screen area (`x1`, `y1`)..(`x2`, `y2`) using the erase buffer.
    #[instrument(level = "debug", skip(self))]
    pub fn erase(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        let bounds = Self::saved_bounds(&inner)?;

        if x1 < 0
            || y1 < 0
            || x2 < x1
            || y2 < y1
            || i64::from(x2) > i64::from(bounds.width)
            || i64::from(y2) > i64::from(bounds.height)
        {
            error!("Invalid coordinates [x1:{} y1:{} x2:{} y2:{}]", x1, y1, x2, y2);
            return Err(SessionError::InvalidArgument(format!(
                "erase area ({}, {})..({}, {}) is outside {}x{}",
                x1, y1, x2, y2, bounds.width, bounds.height
            )));
        }

        let buffer = self.registry.lookup(BufferId::ERASE).ok_or_else(|| {
            error!("Unable to find erase buffer");
            SessionError::InvalidArgument("erase buffer is not registered".to_string())
        })?;
        buffer.set_rect(RectInt::from_coords(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32));
        buffer.release();

        self.execute_locked(&mut inner, BufferId::ERASE, PointInt::new(-1, -1))
    }

    /// Leaves quickdraw: drops the active buffer and restores full-screen
    /// operation.
    #[instrument(level = "debug", skip(self))]
    pub fn cleanup(&self) {
        let mut inner = self.inner.lock();

        self.backend.pipeline.wait_idle();

        if let Some(active) = inner.active.take() {
            Self::retire(active);
        }

        if let Some(saved) = inner.saved_resolution {
            self.backend.framebuffer.set_resolution(saved);
            self.backend.panel.set_stream_params(saved);
        }
        self.backend.panel.set_full_window();

        self.backend.framebuffer.suspend();
        self.backend.pipeline.suspend();

        // The panel may have been woken for quickdraw.
        self.backend.panel.wait_sleep_exit();

        inner.in_progress = false;
        inner.state = SessionState::Idle;
        debug!("Quickdraw cleaned up");
    }

    fn saved_bounds(inner: &SessionInner) -> Result<SizeInt, SessionError> {
        match (inner.state, inner.saved_resolution) {
            (SessionState::Prepared | SessionState::Active, Some(size)) => Ok(size),
            _ => {
                error!("Quickdraw request without a prepared session");
                Err(SessionError::InvalidArgument(
                    "quickdraw session is not prepared".to_string(),
                ))
            }
        }
    }

    fn execute_locked(
        &self,
        inner: &mut SessionInner,
        buffer_id: BufferId,
        requested: PointInt,
    ) -> Result<(), SessionError> {
        if self.cancel.is_cancelled() {
            debug!("Clearing stale quickdraw cancellation");
            self.cancel.reset();
        }
        let bounds = Self::saved_bounds(inner)?;

        let buffer = self.registry.lookup(buffer_id).ok_or_else(|| {
            error!("Unknown buffer [{}]", buffer_id);
            SessionError::InvalidArgument(format!("unknown buffer {}", buffer_id))
        })?;

        let origin = if requested.is_unset() {
            buffer.position()
        } else {
            requested
        };
        let window = buffer.rect().with_origin(origin);
        if !window.fits_within(bounds) {
            error!(
                "Invalid coordinates [x:{} y:{} w:{} h:{}]",
                window.x(),
                window.y(),
                window.width(),
                window.height()
            );
            buffer.release();
            return Err(SessionError::InvalidArgument(format!(
                "buffer {} at ({}, {}) does not fit {}x{}",
                buffer_id,
                window.x(),
                window.y(),
                bounds.width,
                bounds.height
            )));
        }

        self.backend.pipeline.wait_idle();

        // Unlock before locking so re-executing the active buffer cannot
        // wait on itself.
        if let Some(previous) = inner.active.as_ref() {
            previous.unlock();
        }
        if let Err(e) = buffer.lock(&self.cancel) {
            error!("Unable to lock buffer {}: {}", buffer_id, e);
            if e == BufferError::Cancelled {
                self.cancel.reset();
            }
            self.abandon(inner, buffer, false);
            return Err(e.into());
        }

        self.backend.framebuffer.set_resolution(window.size);
        self.backend.panel.set_partial_window(window);
        self.backend.panel.set_stream_params(window.size);

        if buffer.has_memory() {
            if let Err(e) = self.show_overlay(&buffer) {
                error!("Error setting up overlay for buffer {}, cleanup: {}", buffer_id, e);
                self.abandon(inner, buffer, true);
                return Err(e);
            }
        }

        if let Some(previous) = inner.active.take() {
            if !BufferHandle::ptr_eq(&previous, &buffer) {
                let _ = previous.unset_overlay();
            }
            previous.release();
        }
        inner.active = Some(buffer);
        inner.state = SessionState::Active;

        if let Err(e) = self.backend.framebuffer.commit(true) {
            error!("Commit of buffer {} failed: {}", buffer_id, e);
            if let Some(active) = inner.active.take() {
                Self::retire(active);
            }
            inner.state = SessionState::Prepared;
            return Err(e.into());
        }

        debug!("Buffer {} active at {:?}", buffer_id, window);
        Ok(())
    }

    /// Sets (or reuses) the buffer's overlay pipe and queues its memory on it.
    fn show_overlay(&self, buffer: &BufferHandle) -> Result<(), SessionError> {
        let request = OverlayRequest {
            id: buffer.overlay_id(),
            size: buffer.rect().size,
            format: buffer.format(),
            z_order: self.overlay.z_order,
            alpha: self.overlay.alpha,
        };
        let overlay_id = self.backend.overlay.set(&request).map_err(|e| {
            error!("Error setting overlay for buffer {}: {}", buffer.id(), e);
            e
        })?;
        buffer.set_overlay_id(overlay_id);

        let handle = buffer.ensure_handle()?;
        self.backend.overlay.play(overlay_id, handle)?;
        Ok(())
    }

    /// Failure path of `execute`: nothing stays active and the new buffer is
    /// neither locked nor on an overlay.
    fn abandon(&self, inner: &mut SessionInner, buffer: BufferHandle, locked: bool) {
        if buffer.overlay_id().is_some() {
            let _ = buffer.unset_overlay();
        }
        if locked {
            buffer.unlock();
        }
        if let Some(previous) = inner.active.take() {
            if !BufferHandle::ptr_eq(&previous, &buffer) && previous.overlay_id().is_some() {
                let _ = previous.unset_overlay();
            }
            previous.release();
        }
        buffer.release();
        inner.state = SessionState::Prepared;
    }

    fn retire(buffer: BufferHandle) {
        let _ = buffer.unset_overlay();
        buffer.unlock();
        buffer.release();
    }
}
