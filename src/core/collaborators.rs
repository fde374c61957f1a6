//! Interfaces to the parts of the driver the scheduler calls out to.

use crate::core::{Frame, QueueKey};

/// Hands frames to the host interface.
///
/// Called with the scheduler lock held, so implementations must not block:
/// enqueue the frame for a transmit context and return. Failures belong to
/// the implementation; the scheduler does not look at a result.
pub trait Transmit: Send + Sync {
    /// Submit `frame` queued under `key`.
    fn transmit(&self, frame: Frame, key: QueueKey);
}

/// Brings the target out of power save.
///
/// Fire-and-forget; must not block.
pub trait Wake: Send + Sync {
    /// Request a wake-up of the target.
    fn wake_from_low_power(&self);
}

/// Wake implementation for targets without power save.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWake;

impl Wake for NoopWake {
    fn wake_from_low_power(&self) {}
}
