//! The quickdraw entry points as seen by the drawing client (a sensor hub
//! that renders while the application processor sleeps).

use crate::error::SessionError;
use crate::session::{PrepareOutcome, QuickdrawSession};
use quickdraw_buffer_manager::BufferId;
use std::sync::Arc;
use tracing::debug;

pub trait QuickdrawOps: Send + Sync {
    fn prepare(&self, panel_state: u8) -> PrepareOutcome;
    fn execute(&self, buffer_id: BufferId, x: i32, y: i32) -> Result<(), SessionError>;
    fn erase(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), SessionError>;
    fn cleanup(&self);
}

impl QuickdrawOps for QuickdrawSession {
    fn prepare(&self, panel_state: u8) -> PrepareOutcome {
        QuickdrawSession::prepare(self, panel_state)
    }

    fn execute(&self, buffer_id: BufferId, x: i32, y: i32) -> Result<(), SessionError> {
        QuickdrawSession::execute(self, buffer_id, x, y)
    }

    fn erase(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), SessionError> {
        QuickdrawSession::erase(self, x1, y1, x2, y2)
    }

    fn cleanup(&self) {
        QuickdrawSession::cleanup(self)
    }
}

/// A client that accepts a set of quickdraw entry points.
#[cfg_attr(test, mockall::automock)]
pub trait OpsRegistrar {
    fn register_quickdraw(&self, ops: Arc<dyn QuickdrawOps>);
}

/// Hands `session` to `registrar` as its quickdraw entry points.
pub fn register_ops(registrar: &dyn OpsRegistrar, session: Arc<QuickdrawSession>) {
    debug!("Registering quickdraw ops");
    registrar.register_quickdraw(session);
}
