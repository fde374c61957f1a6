//! Scheduler statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::{ClassMap, TrafficClass};

/// Point-in-time copy of the scheduler counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Passes executed, including no-op passes.
    pub passes: u64,
    /// Passes that found no active queue.
    pub idle_passes: u64,
    /// Passes that found zero total credit.
    pub backpressured_passes: u64,
    /// Activation calls.
    pub activations: u64,
    /// Activation calls for a queue that was already active.
    pub duplicate_activations: u64,
    /// Pass requests issued by activations and transmit completions.
    pub pass_requests: u64,
    /// Pass requests merged into one already pending.
    pub merged_requests: u64,
    /// Queues removed from the active set after draining.
    pub queues_drained: u64,
    /// Queues moved to the tail after exhausting their budget.
    pub queues_requeued: u64,
    /// Wake-ups requested from power save.
    pub wakeups: u64,
    /// Frames handed to the transmit path, per class.
    pub frames: ClassMap<u64>,
    /// Credits consumed, per class.
    pub credits: ClassMap<u64>,
}

impl SchedulerStats {
    /// Frames transmitted across all classes.
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.frames.iter().map(|(_, n)| n).sum()
    }
}

/// Lock-free counters behind [`SchedulerStats`].
#[derive(Debug, Default)]
pub(crate) struct SchedulerCounters {
    pub passes: AtomicU64,
    pub idle_passes: AtomicU64,
    pub backpressured_passes: AtomicU64,
    pub activations: AtomicU64,
    pub duplicate_activations: AtomicU64,
    pub pass_requests: AtomicU64,
    pub merged_requests: AtomicU64,
    pub queues_drained: AtomicU64,
    pub queues_requeued: AtomicU64,
    pub wakeups: AtomicU64,
    frames: ClassMap<AtomicU64>,
    credits: ClassMap<AtomicU64>,
}

impl SchedulerCounters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self, class: TrafficClass, frames: u32, credits: u32) {
        if frames == 0 {
            return;
        }
        self.frames[class].fetch_add(u64::from(frames), Ordering::Relaxed);
        self.credits[class].fetch_add(u64::from(credits), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SchedulerStats {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        SchedulerStats {
            passes: load(&self.passes),
            idle_passes: load(&self.idle_passes),
            backpressured_passes: load(&self.backpressured_passes),
            activations: load(&self.activations),
            duplicate_activations: load(&self.duplicate_activations),
            pass_requests: load(&self.pass_requests),
            merged_requests: load(&self.merged_requests),
            queues_drained: load(&self.queues_drained),
            queues_requeued: load(&self.queues_requeued),
            wakeups: load(&self.wakeups),
            frames: ClassMap::from_fn(|class| load(&self.frames[class])),
            credits: ClassMap::from_fn(|class| load(&self.credits[class])),
        }
    }
}
