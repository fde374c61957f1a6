//! Draining one queue under a credit budget.

use std::num::NonZeroU32;

use crate::core::{credit_cost, CreditPool, FrameQueue, Transmit, TxQueue};

/// Why a drain call stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// No frame left (or it was flushed from under us).
    Drained,
    /// The head frame does not fit in what is left of the budget.
    BudgetExhausted,
}

/// Result of one drain call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainResult {
    /// Stop reason.
    pub outcome: DrainOutcome,
    /// Frames handed to the transmit path.
    pub frames: u32,
    /// Credits consumed by those frames.
    pub credits: u32,
}

/// Shared inputs of every drain call within a pass.
pub(crate) struct DrainContext<'a> {
    pub credits: &'a CreditPool,
    pub transmit: &'a dyn Transmit,
    pub buffer_unit: NonZeroU32,
}

/// Hand frames from `queue` to the transmit path, oldest first, until the
/// queue is empty or the next frame would push usage past `budget`.
pub(crate) fn drain_queue<Q: FrameQueue>(
    queue: &TxQueue<Q>,
    budget: u32,
    ctx: &DrainContext<'_>,
) -> DrainResult {
    let key = queue.key();
    let mut used: u32 = 0;
    let mut frames: u32 = 0;

    let outcome = loop {
        let Some(head) = queue.frames().peek() else {
            break DrainOutcome::Drained;
        };

        let cost = credit_cost(head.len, ctx.buffer_unit);
        if used.saturating_add(cost) > budget {
            break DrainOutcome::BudgetExhausted;
        }

        if !ctx.credits.consume(key.class, cost) {
            tracing::warn!(
                "{key}: credit refused for frame {} (cost {cost}, available {})",
                head.id,
                ctx.credits.available(key.class)
            );
            break DrainOutcome::BudgetExhausted;
        }

        let Some(frame) = queue.frames().dequeue_if(head) else {
            // head flushed or replaced since peek; charge whatever is there now
            ctx.credits.release(key.class, cost);
            tracing::debug!("{key}: frame {} left the head before dequeue", head.id);
            continue;
        };

        tracing::trace!("{key}: transmit frame {} ({} bytes, {cost} credits)", frame.id, frame.len());
        ctx.transmit.transmit(frame, key);
        used += cost;
        frames += 1;
        queue.record_admitted();
    };

    DrainResult {
        outcome,
        frames,
        credits: used,
    }
}
