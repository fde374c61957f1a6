//! Transmit scheduler: activation, scheduling passes and introspection.
//!
//! One `parking_lot::Mutex` guards the active registry and the queue table.
//! It is held for a whole pass and for each activation; the transmit and
//! wake collaborators are called under it, which is why they must not block.
//! Credit counters live outside the lock and are only touched atomically,
//! so the completion path can replenish them at any time.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::class_scheduler::schedule_class;
use crate::core::drain::DrainContext;
use crate::core::stats::SchedulerCounters;
use crate::core::{
    ActiveRegistry, ClassMap, ClassReport, CreditPool, Destination, Frame, FrameQueue,
    PassTrigger, QueueKey, RemainingAccounting, SchedulerError, SchedulerStats, TrafficClass,
    Transmit, TxQueue, Wake,
};

/// State guarded by the scheduler lock.
pub(crate) struct SchedulerState<Q> {
    pub registry: ActiveRegistry,
    pub queues: HashMap<QueueKey, Arc<TxQueue<Q>>>,
}

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// No active queue.
    Idle,
    /// Active queues exist but no class has credit.
    Backpressure,
    /// Classes were walked in priority order.
    Completed,
}

/// Summary of one scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// How the pass ended.
    pub outcome: PassOutcome,
    /// Sum of available credit at pass start.
    pub total_credit: u64,
    /// Budget left when the pass stopped.
    pub remaining: u64,
    /// Class turns that ran, in priority order.
    pub classes: Vec<ClassReport>,
}

impl PassReport {
    const fn empty(outcome: PassOutcome, total_credit: u64) -> Self {
        Self {
            outcome,
            total_credit,
            remaining: total_credit,
            classes: Vec::new(),
        }
    }

    /// Frames sent during the pass.
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.classes.iter().map(ClassReport::frames).sum()
    }

    /// Report of the turn given to `class`, if it had one.
    #[must_use]
    pub fn class(&self, class: TrafficClass) -> Option<&ClassReport> {
        self.classes.iter().find(|report| report.class == class)
    }
}

/// Read-only view of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    /// Class described.
    pub class: TrafficClass,
    /// Active queues of the class.
    pub active_queues: usize,
    /// Available credit.
    pub available_credit: u32,
    /// Credit handed to hardware and not yet completed.
    pub in_flight_credit: u32,
    /// Credit ceiling.
    pub ceiling: u32,
}

/// Read-only view of the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    /// Total active queues.
    pub total_active: usize,
    /// Per-class view, highest priority first.
    pub classes: Vec<ClassSnapshot>,
    /// Active queues in round-robin order.
    pub active_order: Vec<QueueKey>,
    /// Whether the target is in power save.
    pub low_power: bool,
}

impl SchedulerSnapshot {
    /// View of `class`.
    #[must_use]
    pub fn class(&self, class: TrafficClass) -> Option<&ClassSnapshot> {
        self.classes.iter().find(|c| c.class == class)
    }
}

/// Credit-based fair-queuing transmit scheduler.
pub struct TxScheduler<Q> {
    state: Mutex<SchedulerState<Q>>,
    credits: Arc<CreditPool>,
    transmit: Arc<dyn Transmit>,
    wake: Arc<dyn Wake>,
    trigger: Arc<PassTrigger>,
    low_power: AtomicBool,
    buffer_unit: NonZeroU32,
    accounting: RemainingAccounting,
    counters: SchedulerCounters,
}

impl<Q> std::fmt::Debug for TxScheduler<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxScheduler")
            .field("buffer_unit", &self.buffer_unit)
            .field("accounting", &self.accounting)
            .field("credits", &self.credits)
            .finish_non_exhaustive()
    }
}

impl<Q: FrameQueue + Default> TxScheduler<Q> {
    /// Create a scheduler around an existing credit pool.
    pub fn new(
        credits: Arc<CreditPool>,
        buffer_unit: NonZeroU32,
        accounting: RemainingAccounting,
        transmit: Arc<dyn Transmit>,
        wake: Arc<dyn Wake>,
    ) -> Self {
        Self {
            state: Mutex::new(SchedulerState {
                registry: ActiveRegistry::new(),
                queues: HashMap::new(),
            }),
            credits,
            transmit,
            wake,
            trigger: Arc::new(PassTrigger::new()),
            low_power: AtomicBool::new(false),
            buffer_unit,
            accounting,
            counters: SchedulerCounters::default(),
        }
    }

    /// Credit pool shared with the transmit-completion path.
    pub const fn credits(&self) -> &Arc<CreditPool> {
        &self.credits
    }

    /// Pass trigger, for the worker that runs passes.
    pub const fn trigger(&self) -> &Arc<PassTrigger> {
        &self.trigger
    }

    /// Record whether the target is in power save.
    pub fn set_low_power(&self, low_power: bool) {
        self.low_power.store(low_power, Ordering::Release);
    }

    /// Whether the target is in power save.
    pub fn is_low_power(&self) -> bool {
        self.low_power.load(Ordering::Acquire)
    }

    /// Queue registered under `key`.
    pub fn queue(&self, key: &QueueKey) -> Option<Arc<TxQueue<Q>>> {
        self.state.lock().queues.get(key).cloned()
    }

    /// Whether `key` is in the active registry.
    pub fn is_active(&self, key: &QueueKey) -> bool {
        self.state.lock().registry.contains(key)
    }

    /// Data-arrival path: queue `frame`, creating the queue on first use.
    ///
    /// Runs the activation trigger when the push made the queue non-empty.
    /// Returns whether activation ran.
    pub fn enqueue(&self, destination: Destination, class: TrafficClass, frame: Frame) -> bool {
        let key = QueueKey::new(destination, class);
        let queue = {
            let mut state = self.state.lock();
            Arc::clone(state.queues.entry(key).or_insert_with(|| {
                tracing::debug!("{key}: queue created");
                Arc::new(TxQueue::new(key, Q::default()))
            }))
        };

        if queue.frames().push(frame) {
            self.activate_queue(&queue);
            true
        } else {
            false
        }
    }

    /// Activation trigger for a queue that just became non-empty.
    ///
    /// Idempotent for a queue that is already active; in every case asks for
    /// one pass, merging with a pending request.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::UnknownQueue`] if no queue is registered under `key`.
    pub fn activate(&self, key: &QueueKey) -> Result<bool, SchedulerError> {
        let queue = self.queue(key).ok_or(SchedulerError::UnknownQueue(*key))?;
        Ok(self.activate_queue(&queue))
    }

    fn activate_queue(&self, queue: &TxQueue<Q>) -> bool {
        let key = queue.key();

        if self.is_low_power() {
            self.wake.wake_from_low_power();
            SchedulerCounters::bump(&self.counters.wakeups);
            tracing::debug!("{key}: waking target from power save");
        }

        let depth = queue.frames().depth();
        let inserted = {
            let mut state = self.state.lock();
            // a teardown may have raced with the push
            state.queues.contains_key(&key) && state.registry.push_back(key)
        };

        SchedulerCounters::bump(&self.counters.activations);
        if inserted {
            tracing::debug!(
                "{key}: added to active list (frames:{}, bytes:{})",
                depth.frames,
                depth.bytes
            );
        } else {
            SchedulerCounters::bump(&self.counters.duplicate_activations);
            tracing::debug!(
                "{key}: already active (frames:{}, bytes:{})",
                depth.frames,
                depth.bytes
            );
        }

        SchedulerCounters::bump(&self.counters.pass_requests);
        if !self.trigger.request() {
            SchedulerCounters::bump(&self.counters.merged_requests);
        }
        inserted
    }

    /// Tear down the queue under `key`, dropping its pending frames.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::UnknownQueue`] if no queue is registered under `key`.
    pub fn remove_queue(&self, key: &QueueKey) -> Result<usize, SchedulerError> {
        let queue = {
            let mut state = self.state.lock();
            state.registry.remove(key);
            state
                .queues
                .remove(key)
                .ok_or(SchedulerError::UnknownQueue(*key))?
        };
        let dropped = queue.frames().flush();
        tracing::debug!("{key}: queue removed, {dropped} frames dropped");
        Ok(dropped)
    }

    /// Drop the pending frames of `key` without tearing it down.
    ///
    /// The queue stays in the active registry until the next pass finds it
    /// empty.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::UnknownQueue`] if no queue is registered under `key`.
    pub fn flush_queue(&self, key: &QueueKey) -> Result<usize, SchedulerError> {
        let queue = self.queue(key).ok_or(SchedulerError::UnknownQueue(*key))?;
        Ok(queue.frames().flush())
    }

    /// Transmit-completion path: return `credits` to `class` and request a
    /// pass so queues held back for lack of credit get another turn.
    pub fn complete_tx(&self, class: TrafficClass, credits: u32) {
        self.credits.release(class, credits);
        if self.state.lock().registry.is_empty() {
            return;
        }
        SchedulerCounters::bump(&self.counters.pass_requests);
        if !self.trigger.request() {
            SchedulerCounters::bump(&self.counters.merged_requests);
        }
    }

    /// Run one scheduling pass.
    pub fn run_pass(&self) -> PassReport {
        let mut state = self.state.lock();
        SchedulerCounters::bump(&self.counters.passes);

        if state.registry.is_empty() {
            SchedulerCounters::bump(&self.counters.idle_passes);
            return PassReport::empty(PassOutcome::Idle, 0);
        }

        let total = self.credits.total_available();
        if total == 0 {
            SchedulerCounters::bump(&self.counters.backpressured_passes);
            tracing::debug!(
                "no credit for {} active queues, waiting for completions",
                state.registry.len()
            );
            return PassReport::empty(PassOutcome::Backpressure, 0);
        }

        let ctx = DrainContext {
            credits: &self.credits,
            transmit: self.transmit.as_ref(),
            buffer_unit: self.buffer_unit,
        };
        let mut remaining = total;
        let mut classes = Vec::new();

        for class in TrafficClass::PRIORITY_ORDER {
            if let Some(report) = schedule_class(
                class,
                &mut remaining,
                &mut *state,
                &ctx,
                self.accounting,
                &self.counters,
            ) {
                classes.push(report);
            }
            if remaining == 0 {
                break;
            }
        }

        let report = PassReport {
            outcome: PassOutcome::Completed,
            total_credit: total,
            remaining,
            classes,
        };
        let frames = report.frames();
        if frames > 0 {
            tracing::info!(
                "pass sent {frames} frames, credit {total} -> {remaining}, {} queues still active",
                state.registry.len()
            );
        }
        report
    }

    /// Run a pass if one is pending, claiming the request.
    pub fn run_pending(&self) -> Option<PassReport> {
        self.trigger.try_take().then(|| self.run_pass())
    }

    /// Active-queue counts and credit levels.
    pub fn snapshot(&self) -> SchedulerSnapshot {
        let state = self.state.lock();
        let counts: ClassMap<usize> = state.registry.counts();
        let classes = TrafficClass::PRIORITY_ORDER
            .iter()
            .map(|&class| ClassSnapshot {
                class,
                active_queues: counts[class],
                available_credit: self.credits.available(class),
                in_flight_credit: self.credits.in_flight(class),
                ceiling: self.credits.ceiling(class),
            })
            .collect();

        SchedulerSnapshot {
            total_active: state.registry.len(),
            classes,
            active_order: state.registry.iter().copied().collect(),
            low_power: self.is_low_power(),
        }
    }

    /// Counters since creation.
    pub fn stats(&self) -> SchedulerStats {
        self.counters.snapshot()
    }
}
