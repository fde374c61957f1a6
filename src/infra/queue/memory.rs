//! In-memory FIFO backing a transmit queue.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::core::{Frame, FrameInfo, FrameQueue, QueueDepth};

#[derive(Debug, Default)]
struct Fifo {
    frames: VecDeque<Frame>,
    bytes: usize,
}

/// Mutex-protected `VecDeque` of frames.
///
/// Producers, flushes and the scheduler each take the lock briefly; it is
/// independent of the scheduler lock.
#[derive(Debug, Default)]
pub struct InMemoryFrameQueue {
    fifo: Mutex<Fifo>,
}

impl InMemoryFrameQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameQueue for InMemoryFrameQueue {
    fn push(&self, frame: Frame) -> bool {
        let mut fifo = self.fifo.lock();
        let was_empty = fifo.frames.is_empty();
        fifo.bytes += frame.len();
        fifo.frames.push_back(frame);
        was_empty
    }

    fn peek(&self) -> Option<FrameInfo> {
        self.fifo.lock().frames.front().map(Frame::info)
    }

    fn dequeue(&self) -> Option<Frame> {
        let mut fifo = self.fifo.lock();
        let frame = fifo.frames.pop_front()?;
        fifo.bytes -= frame.len();
        Some(frame)
    }

    fn dequeue_if(&self, expected: FrameInfo) -> Option<Frame> {
        let mut fifo = self.fifo.lock();
        if fifo.frames.front().map(Frame::info) != Some(expected) {
            return None;
        }
        let frame = fifo.frames.pop_front()?;
        fifo.bytes -= frame.len();
        Some(frame)
    }

    fn flush(&self) -> usize {
        let mut fifo = self.fifo.lock();
        fifo.bytes = 0;
        let dropped = fifo.frames.len();
        fifo.frames.clear();
        dropped
    }

    fn depth(&self) -> QueueDepth {
        let fifo = self.fifo.lock();
        QueueDepth {
            frames: fifo.frames.len(),
            bytes: fifo.bytes,
        }
    }
}
