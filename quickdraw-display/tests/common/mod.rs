//! Recording fakes for the display collaborators.

#![allow(dead_code)]

use parking_lot::Mutex;
use quickdraw_buffer_manager::{
    BufferDescriptor, BufferId, BufferRegistry, MemoryObject, MemoryProvider, OverlayId,
    OverlaySink, PixelFormat,
};
use quickdraw_core::{DriverError, OverlayConfig, RectInt, RegistryConfig, SizeInt};
use quickdraw_display::{
    DisplayBackend, Framebuffer, OverlayEngine, OverlayRequest, Panel, PixelPipeline,
    QuickdrawSession, ResumeStatus,
};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Offset between a consumer memory handle and the handle installed for it.
pub const HANDLE_OFFSET: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PipelineResume,
    PipelineSuspend,
    WaitIdle,
    FramebufferResume,
    FramebufferSuspend,
    SetResolution(SizeInt),
    Commit,
    PartialWindow(RectInt),
    FullWindow,
    StreamParams(SizeInt),
    WaitSleepExit,
    OverlaySet(OverlayRequest),
    OverlayPlay(OverlayId, i32),
    OverlayUnset(OverlayId),
    InstallHandle(i32),
    RemoveHandle(i32),
}

pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    resolution: Mutex<SizeInt>,
    next_overlay: AtomicU32,
    pub esd_on_resume: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_play: AtomicBool,
    pub fail_commit: AtomicBool,
    pub fail_install: AtomicBool,
}

impl Recorder {
    pub fn new(resolution: SizeInt) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            resolution: Mutex::new(resolution),
            next_overlay: AtomicU32::new(1),
            esd_on_resume: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_play: AtomicBool::new(false),
            fail_commit: AtomicBool::new(false),
            fail_install: AtomicBool::new(false),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Returns and clears the calls recorded so far.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn resolution(&self) -> SizeInt {
        *self.resolution.lock()
    }
}

impl PixelPipeline for Recorder {
    fn resume(&self) {
        self.record(Call::PipelineResume);
    }

    fn suspend(&self) {
        self.record(Call::PipelineSuspend);
    }

    fn wait_idle(&self) {
        self.record(Call::WaitIdle);
    }
}

impl Framebuffer for Recorder {
    fn resume(&self) -> ResumeStatus {
        self.record(Call::FramebufferResume);
        if self.esd_on_resume.load(Ordering::SeqCst) {
            ResumeStatus::EsdRecovered
        } else {
            ResumeStatus::Resumed
        }
    }

    fn suspend(&self) {
        self.record(Call::FramebufferSuspend);
    }

    fn resolution(&self) -> SizeInt {
        *self.resolution.lock()
    }

    fn set_resolution(&self, size: SizeInt) {
        *self.resolution.lock() = size;
        self.record(Call::SetResolution(size));
    }

    fn commit(&self, _wait_for_finish: bool) -> Result<(), DriverError> {
        self.record(Call::Commit);
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(DriverError::new(-5, "commit"));
        }
        Ok(())
    }
}

impl Panel for Recorder {
    fn set_partial_window(&self, window: RectInt) {
        self.record(Call::PartialWindow(window));
    }

    fn set_full_window(&self) {
        self.record(Call::FullWindow);
    }

    fn set_stream_params(&self, size: SizeInt) {
        self.record(Call::StreamParams(size));
    }

    fn wait_sleep_exit(&self) {
        self.record(Call::WaitSleepExit);
    }
}

impl OverlaySink for Recorder {
    fn unset(&self, overlay_id: OverlayId) -> Result<(), DriverError> {
        self.record(Call::OverlayUnset(overlay_id));
        Ok(())
    }
}

impl OverlayEngine for Recorder {
    fn set(&self, request: &OverlayRequest) -> Result<OverlayId, DriverError> {
        self.record(Call::OverlaySet(*request));
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(DriverError::new(-22, "overlay set"));
        }
        Ok(request
            .id
            .unwrap_or_else(|| OverlayId(self.next_overlay.fetch_add(1, Ordering::SeqCst))))
    }

    fn play(&self, overlay_id: OverlayId, memory_handle: i32) -> Result<(), DriverError> {
        self.record(Call::OverlayPlay(overlay_id, memory_handle));
        if self.fail_play.load(Ordering::SeqCst) {
            return Err(DriverError::new(-12, "overlay play"));
        }
        Ok(())
    }
}

struct RecordedMemory {
    user_handle: i32,
    recorder: Arc<Recorder>,
}

impl MemoryObject for RecordedMemory {
    fn install_handle(&self) -> Result<i32, DriverError> {
        let handle = self.user_handle + HANDLE_OFFSET;
        self.recorder.record(Call::InstallHandle(handle));
        if self.recorder.fail_install.load(Ordering::SeqCst) {
            return Err(DriverError::new(-24, "install handle"));
        }
        Ok(handle)
    }

    fn remove_handle(&self, handle: i32) {
        self.recorder.record(Call::RemoveHandle(handle));
    }
}

pub struct RecordedMemoryProvider(pub Arc<Recorder>);

impl MemoryProvider for RecordedMemoryProvider {
    fn acquire(&self, user_handle: i32) -> Option<Box<dyn MemoryObject>> {
        Some(Box::new(RecordedMemory {
            user_handle,
            recorder: self.0.clone(),
        }))
    }
}

pub struct Rig {
    pub recorder: Arc<Recorder>,
    pub registry: Arc<BufferRegistry>,
    pub session: QuickdrawSession,
}

pub fn rig(width: u32, height: u32) -> Rig {
    let recorder = Arc::new(Recorder::new(SizeInt::new(width, height)));
    let registry = Arc::new(BufferRegistry::new(
        Arc::new(RecordedMemoryProvider(recorder.clone())),
        recorder.clone(),
        &RegistryConfig {
            lock_poll_interval_ms: 5,
        },
    ));
    registry.reset().expect("registry reset");
    let backend = DisplayBackend {
        pipeline: recorder.clone(),
        framebuffer: recorder.clone(),
        panel: recorder.clone(),
        overlay: recorder.clone(),
    };
    let session = QuickdrawSession::new(registry.clone(), backend, OverlayConfig::default());
    Rig {
        recorder,
        registry,
        session,
    }
}

pub fn descriptor(
    id: i32,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    memory: Option<i32>,
) -> BufferDescriptor {
    BufferDescriptor {
        buffer_id: BufferId(id),
        x,
        y,
        w,
        h,
        format: PixelFormat::Rgb565.as_raw(),
        memory,
    }
}

/// The overlay request a fresh buffer of `size` produces with default config.
pub fn overlay_request(id: Option<OverlayId>, size: SizeInt) -> OverlayRequest {
    let defaults = OverlayConfig::default();
    OverlayRequest {
        id,
        size,
        format: PixelFormat::Rgb565,
        z_order: defaults.z_order,
        alpha: defaults.alpha,
    }
}
