//! # Quickdraw Display
//!
//! Shows quickdraw buffers on the panel while the main display pipeline is
//! suspended.
//!
//! - [`QuickdrawSession`]: prepare / execute / erase / cleanup state machine
//!   for one display.
//! - [`backend`]: the pixel pipeline, framebuffer, panel and overlay engine
//!   contracts the session drives.
//! - [`ops`]: the entry points handed to the drawing client.

pub mod backend;
pub mod error;
pub mod ops;
pub mod session;

pub use backend::{
    DisplayBackend, Framebuffer, OverlayEngine, OverlayRequest, Panel, PixelPipeline, ResumeStatus,
};
pub use error::SessionError;
pub use ops::{register_ops, OpsRegistrar, QuickdrawOps};
pub use session::{PrepareOutcome, QuickdrawSession, SessionState};
