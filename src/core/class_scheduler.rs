//! Fair distribution of the pass budget within one traffic class.

use serde::{Deserialize, Serialize};

use crate::core::drain::{drain_queue, DrainContext};
use crate::core::scheduler::SchedulerState;
use crate::core::stats::SchedulerCounters;
use crate::core::{DrainOutcome, DrainResult, FrameQueue, QueueKey, TrafficClass};

/// How a class turn charges the pass-wide `remaining` counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingAccounting {
    /// Charge each queue's full allocation, whatever it actually used.
    #[default]
    Allocated,
    /// Charge only the credits the drain consumed.
    Consumed,
}

/// One queue's turn within a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueTurn {
    /// Queue served.
    pub key: QueueKey,
    /// Share of `remaining` given to the queue.
    pub allocated: u32,
    /// Budget actually passed to the drain (allocation capped by class credit).
    pub budget: u32,
    /// What the drain did.
    pub result: DrainResult,
}

/// Summary of one class turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReport {
    /// Class served.
    pub class: TrafficClass,
    /// Active queues of the class at the start of the turn.
    pub active: usize,
    /// Per-queue share computed at the start of the turn.
    pub fair_share: u64,
    /// Queue turns, in service order.
    pub turns: Vec<QueueTurn>,
}

impl ClassReport {
    /// Frames sent during this turn.
    #[must_use]
    pub fn frames(&self) -> u32 {
        self.turns.iter().map(|t| t.result.frames).sum()
    }

    /// Credits consumed during this turn.
    #[must_use]
    pub fn credits(&self) -> u32 {
        self.turns.iter().map(|t| t.result.credits).sum()
    }
}

/// Serve the active queues of `class` from the shared `remaining` budget.
///
/// Only queues active when the turn starts are visited, each at most once.
/// Returns `None` when the class has no active queue or nothing remains.
pub(crate) fn schedule_class<Q: FrameQueue>(
    class: TrafficClass,
    remaining: &mut u64,
    state: &mut SchedulerState<Q>,
    ctx: &DrainContext<'_>,
    accounting: RemainingAccounting,
    counters: &SchedulerCounters,
) -> Option<ClassReport> {
    let members = state.registry.class_members(class);
    if members.is_empty() || *remaining == 0 {
        return None;
    }

    let active = members.len();
    let fair_share = (*remaining / active as u64).max(1);
    let mut turns = Vec::with_capacity(active);

    for key in members {
        if *remaining == 0 {
            break;
        }

        let Some(queue) = state.queues.get(&key) else {
            // torn down without leaving the registry; cannot happen under the lock
            state.registry.remove(&key);
            continue;
        };

        let allocated = u32::try_from(fair_share.min(*remaining)).unwrap_or(u32::MAX);
        let budget = allocated.min(ctx.credits.available(class));
        let result = drain_queue(queue, budget, ctx);

        match result.outcome {
            DrainOutcome::Drained => {
                state.registry.remove(&key);
                SchedulerCounters::bump(&counters.queues_drained);
            }
            DrainOutcome::BudgetExhausted => {
                state.registry.move_to_back(&key);
                SchedulerCounters::bump(&counters.queues_requeued);
            }
        }
        counters.record_sent(class, result.frames, result.credits);

        tracing::debug!(
            "{key}: allocated {allocated}, budget {budget}, sent {} frames / {} credits, {:?}",
            result.frames,
            result.credits,
            result.outcome
        );

        let charge = match accounting {
            RemainingAccounting::Allocated => allocated,
            RemainingAccounting::Consumed => result.credits,
        };
        *remaining = remaining.saturating_sub(u64::from(charge));

        turns.push(QueueTurn {
            key,
            allocated,
            budget,
            result,
        });
    }

    Some(ClassReport {
        class,
        active,
        fair_share,
        turns,
    })
}
