//! Frames and credit cost.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Frame identifier assigned by the data path.
pub type FrameId = u64;

/// An opaque frame waiting for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Identifier, used only for tracing and diagnostics.
    pub id: FrameId,
    /// Frame bytes as handed to the host interface.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a frame from a payload.
    #[must_use]
    pub const fn new(id: FrameId, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }

    /// Create a zero-filled frame of `len` bytes.
    #[must_use]
    pub fn with_len(id: FrameId, len: usize) -> Self {
        Self::new(id, vec![0; len])
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Header view used by `peek`.
    #[must_use]
    pub fn info(&self) -> FrameInfo {
        FrameInfo {
            id: self.id,
            len: self.len(),
        }
    }
}

/// What a queue reveals about its head frame without removing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frame identifier.
    pub id: FrameId,
    /// Length in bytes.
    pub len: usize,
}

/// Credits needed to transmit `len` bytes: `ceil(len / unit)`, never less than 1.
///
/// A zero-length frame still costs one credit so a drain loop is bounded by
/// its budget.
#[must_use]
pub fn credit_cost(len: usize, unit: NonZeroU32) -> u32 {
    let unit = unit.get() as usize;
    let credits = len.div_ceil(unit).max(1);
    u32::try_from(credits).unwrap_or(u32::MAX)
}
