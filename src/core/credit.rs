//! Per-class transmit credit accounting.
//!
//! Credits are a proxy for firmware buffer space. The scheduler consumes them
//! while handing frames to the host interface; the transmit-completion path
//! gives them back from another context. Every mutation is a single CAS so
//! the two paths never lose an update, and no value ever leaves
//! `[0, ceiling]`.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::{ClassMap, TrafficClass};

/// Starting value and upper bound for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLimit {
    /// Credits available when the pool is created.
    pub initial: u32,
    /// Upper bound; replenishment never pushes the value above it.
    pub ceiling: u32,
}

impl CreditLimit {
    /// A limit whose pool starts full.
    #[must_use]
    pub const fn full(ceiling: u32) -> Self {
        Self {
            initial: ceiling,
            ceiling,
        }
    }
}

#[derive(Debug)]
struct CreditSlot {
    available: AtomicU32,
    in_flight: AtomicU32,
    ceiling: u32,
}

/// Atomic per-class credit counters.
#[derive(Debug)]
pub struct CreditPool {
    slots: ClassMap<CreditSlot>,
}

impl CreditPool {
    /// Create a pool; initial values above the ceiling are clamped.
    #[must_use]
    pub fn new(limits: ClassMap<CreditLimit>) -> Self {
        Self {
            slots: ClassMap::from_fn(|class| {
                let limit = limits[class];
                CreditSlot {
                    available: AtomicU32::new(limit.initial.min(limit.ceiling)),
                    in_flight: AtomicU32::new(0),
                    ceiling: limit.ceiling,
                }
            }),
        }
    }

    /// Current credit for `class` (non-blocking).
    #[must_use]
    pub fn available(&self, class: TrafficClass) -> u32 {
        self.slots[class].available.load(Ordering::Acquire)
    }

    /// Sum of available credit over all classes.
    #[must_use]
    pub fn total_available(&self) -> u64 {
        TrafficClass::PRIORITY_ORDER
            .iter()
            .map(|&class| u64::from(self.available(class)))
            .sum()
    }

    /// Configured ceiling for `class`.
    #[must_use]
    pub fn ceiling(&self, class: TrafficClass) -> u32 {
        self.slots[class].ceiling
    }

    /// Credits handed to the hardware and not yet completed.
    #[must_use]
    pub fn in_flight(&self, class: TrafficClass) -> u32 {
        self.slots[class].in_flight.load(Ordering::Acquire)
    }

    /// Subtract `n` credits iff at least `n` are available.
    ///
    /// Returns `false` and leaves the counter untouched otherwise.
    pub fn consume(&self, class: TrafficClass, n: u32) -> bool {
        let slot = &self.slots[class];
        let mut current = slot.available.load(Ordering::Acquire);
        loop {
            if current < n {
                return false;
            }
            match slot.available.compare_exchange_weak(
                current,
                current - n,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
        slot.in_flight.fetch_add(n, Ordering::AcqRel);
        true
    }

    /// Add `n` credits, saturating at the ceiling. Returns the new value.
    pub fn replenish(&self, class: TrafficClass, n: u32) -> u32 {
        let slot = &self.slots[class];
        let ceiling = slot.ceiling;
        let previous = slot
            .available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(n).min(ceiling))
            })
            .unwrap_or(ceiling);
        previous.saturating_add(n).min(ceiling)
    }

    /// Return up to `n` in-flight credits to the available pool.
    ///
    /// Called on transmit completion, and by the scheduler when a frame it
    /// paid for left the queue head before it could be dequeued. Only credit
    /// that is actually in flight comes back; a release larger than the
    /// in-flight count refunds the in-flight count.
    pub fn release(&self, class: TrafficClass, n: u32) -> u32 {
        let (Ok(previous) | Err(previous)) = self.slots[class]
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(n))
            });
        let refund = previous.min(n);
        if refund < n {
            tracing::debug!("{class}: release of {n} credits exceeds {previous} in flight");
        }
        self.replenish(class, refund)
    }

    /// Overwrite the available credit, e.g. from a firmware credit report.
    pub fn reset(&self, class: TrafficClass, value: u32) {
        let slot = &self.slots[class];
        slot.available
            .store(value.min(slot.ceiling), Ordering::Release);
    }

    /// Snapshot of available credit per class.
    #[must_use]
    pub fn snapshot(&self) -> ClassMap<u32> {
        ClassMap::from_fn(|class| self.available(class))
    }
}
