//! Per-destination, per-class transmit queues.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::{Frame, FrameInfo, TrafficClass};

/// Station MAC address a queue transmits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Destination(pub [u8; 6]);

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Identity of a transmit queue: one per destination and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueKey {
    /// Receiving station.
    pub destination: Destination,
    /// Access category of the queued frames.
    pub class: TrafficClass,
}

impl QueueKey {
    /// Build a key.
    #[must_use]
    pub const fn new(destination: Destination, class: TrafficClass) -> Self {
        Self { destination, class }
    }
}

impl fmt::Display for QueueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.destination, self.class.label())
    }
}

/// Queue depth, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDepth {
    /// Pending frames.
    pub frames: usize,
    /// Pending bytes.
    pub bytes: usize,
}

/// Backing FIFO of a transmit queue.
///
/// Owned by the data path; the scheduler only peeks and dequeues. All methods
/// take `&self` because producers, flushes and the scheduler run concurrently.
pub trait FrameQueue: Send + Sync {
    /// Append a frame. Returns `true` if the queue was empty before the push.
    fn push(&self, frame: Frame) -> bool;
    /// Head frame, without removing it.
    fn peek(&self) -> Option<FrameInfo>;
    /// Remove and return the head frame; `None` if it was flushed meanwhile.
    fn dequeue(&self) -> Option<Frame>;
    /// Remove the head frame only if it is still the one `peek` described.
    ///
    /// Check and removal happen atomically, so a frame is never sent on the
    /// strength of another frame's header.
    fn dequeue_if(&self, expected: FrameInfo) -> Option<Frame>;
    /// Drop every pending frame, returning how many were dropped.
    fn flush(&self) -> usize;
    /// Current depth.
    fn depth(&self) -> QueueDepth;
}

/// A transmit queue as seen by the scheduler.
#[derive(Debug)]
pub struct TxQueue<Q> {
    key: QueueKey,
    frames: Q,
    admitted: AtomicU64,
}

impl<Q: FrameQueue> TxQueue<Q> {
    /// Wrap a backing FIFO.
    pub const fn new(key: QueueKey, frames: Q) -> Self {
        Self {
            key,
            frames,
            admitted: AtomicU64::new(0),
        }
    }

    /// Queue identity.
    pub const fn key(&self) -> QueueKey {
        self.key
    }

    /// Owning class.
    pub const fn class(&self) -> TrafficClass {
        self.key.class
    }

    /// Backing FIFO.
    pub const fn frames(&self) -> &Q {
        &self.frames
    }

    /// Frames handed to the transmit path so far.
    pub fn admitted(&self) -> u64 {
        self.admitted.load(Ordering::Relaxed)
    }

    pub(crate) fn record_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Frames still waiting.
    pub fn pending(&self) -> usize {
        self.frames.depth().frames
    }
}
