//! Host-interface channel.
//!
//! Implements both scheduler collaborators by posting commands on a
//! `crossbeam_channel` drained by the thread that talks to the bus. Sends
//! never block: with a bounded channel a full queue drops the command and
//! counts it. A channel built with [`HifChannel::returning_credit`] hands the
//! credit of a dropped frame back to the pool, since no completion will ever
//! arrive for it.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use tracing::warn;

use crate::core::{credit_cost, CreditPool, Frame, QueueKey, Transmit, Wake};

/// Command for the host-interface thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HifCommand {
    /// Send `frame` queued under `key`.
    Transmit {
        /// Frame to send.
        frame: Frame,
        /// Queue it came from.
        key: QueueKey,
    },
    /// Bring the target out of power save.
    Wake,
}

/// Sending half of the host-interface command channel.
#[derive(Debug, Clone)]
pub struct HifChannel {
    tx: Sender<HifCommand>,
    dropped: Arc<AtomicU64>,
    refund: Option<CreditRefund>,
}

/// Pool that pays back the cost of frames the channel could not deliver.
#[derive(Debug, Clone)]
struct CreditRefund {
    credits: Arc<CreditPool>,
    buffer_unit: NonZeroU32,
}

impl HifChannel {
    /// Channel without a bound.
    #[must_use]
    pub fn unbounded() -> (Self, Receiver<HifCommand>) {
        let (tx, rx) = unbounded();
        (Self::from_sender(tx), rx)
    }

    /// Channel holding at most `capacity` commands.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, Receiver<HifCommand>) {
        let (tx, rx) = bounded(capacity);
        (Self::from_sender(tx), rx)
    }

    fn from_sender(tx: Sender<HifCommand>) -> Self {
        Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
            refund: None,
        }
    }

    /// Release the credit of every dropped frame back into `credits`.
    ///
    /// `buffer_unit` must be the unit the scheduler charges frames with.
    #[must_use]
    pub fn returning_credit(mut self, credits: Arc<CreditPool>, buffer_unit: NonZeroU32) -> Self {
        self.refund = Some(CreditRefund {
            credits,
            buffer_unit,
        });
        self
    }

    /// Commands dropped because the channel was full or closed.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn post(&self, command: HifCommand) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!("host interface queue full, dropping {}", describe(&command));
                self.discard(&command);
            }
            Err(TrySendError::Disconnected(command)) => {
                warn!("host interface closed, dropping {}", describe(&command));
                self.discard(&command);
            }
        }
    }

    fn discard(&self, command: &HifCommand) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
        if let (Some(refund), HifCommand::Transmit { frame, key }) = (&self.refund, command) {
            let cost = credit_cost(frame.len(), refund.buffer_unit);
            refund.credits.release(key.class, cost);
        }
    }
}

fn describe(command: &HifCommand) -> String {
    match command {
        HifCommand::Transmit { frame, key } => format!("frame {} for {key}", frame.id),
        HifCommand::Wake => "wake request".to_string(),
    }
}

impl Transmit for HifChannel {
    fn transmit(&self, frame: Frame, key: QueueKey) {
        self.post(HifCommand::Transmit { frame, key });
    }
}

impl Wake for HifChannel {
    fn wake_from_low_power(&self) {
        self.post(HifCommand::Wake);
    }
}
