//! Contracts of the display collaborators quickdraw drives.
//!
//! The pixel pipeline, framebuffer, panel and overlay engine belong to the
//! host display driver. Quickdraw only sequences calls into them, so each
//! is a trait object here. Calls block until the hardware step completes.

use quickdraw_buffer_manager::{OverlayId, OverlaySink, PixelFormat};
use quickdraw_core::{DriverError, RectInt, SizeInt};
use std::sync::Arc;

/// The display engine feeding the panel.
pub trait PixelPipeline: Send + Sync {
    fn resume(&self);
    fn suspend(&self);
    /// Returns once the link to the panel is quiescent.
    fn wait_idle(&self);
}

/// Outcome of resuming the framebuffer for a quickdraw session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeStatus {
    Resumed,
    /// The panel had to be recovered from an ESD event while resuming.
    EsdRecovered,
}

pub trait Framebuffer: Send + Sync {
    fn resume(&self) -> ResumeStatus;
    fn suspend(&self);
    /// Current full-screen resolution.
    fn resolution(&self) -> SizeInt;
    /// Updates both the logical (framebuffer) and the physical (panel)
    /// resolution.
    fn set_resolution(&self, size: SizeInt);
    /// Flushes the current overlay configuration to the panel.
    fn commit(&self, wait_for_finish: bool) -> Result<(), DriverError>;
}

pub trait Panel: Send + Sync {
    fn set_partial_window(&self, window: RectInt);
    fn set_full_window(&self);
    /// Reconfigures the geometry of the stream sent to the panel.
    fn set_stream_params(&self, size: SizeInt);
    /// Returns once the panel is out of sleep.
    fn wait_sleep_exit(&self);
}

/// Overlay pipe request for one quickdraw buffer.
///
/// Source and destination are the full buffer at (0, 0); the panel's partial
/// window places it on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRequest {
    /// Pipe to reuse, or `None` to allocate one.
    pub id: Option<OverlayId>,
    pub size: SizeInt,
    pub format: PixelFormat,
    pub z_order: u32,
    pub alpha: u8,
}

/// The overlay engine. `unset` comes from [`OverlaySink`], which buffers use
/// to give their pipe back when they are deleted.
pub trait OverlayEngine: OverlaySink {
    fn set(&self, request: &OverlayRequest) -> Result<OverlayId, DriverError>;
    /// Queues `memory_handle` for display on the pipe.
    fn play(&self, overlay_id: OverlayId, memory_handle: i32) -> Result<(), DriverError>;
}

/// The set of collaborators one quickdraw session drives.
#[derive(Clone)]
pub struct DisplayBackend {
    pub pipeline: Arc<dyn PixelPipeline>,
    pub framebuffer: Arc<dyn Framebuffer>,
    pub panel: Arc<dyn Panel>,
    pub overlay: Arc<dyn OverlayEngine>,
}
