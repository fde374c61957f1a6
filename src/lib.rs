//! # credit_txq
//!
//! A credit-based fair-queuing transmit scheduler for multi-priority wireless
//! transmit paths.
//!
//! The firmware exposes a limited pool of transmit buffers, advertised to the
//! host as per-access-category *credits*. This crate decides when, and how
//! much, queued data may be handed to the host interface under that ceiling:
//!
//! - **Strict priority across classes**: Voice, then Video, then Best-Effort,
//!   then Background, re-evaluated on every pass.
//! - **Fairness within a class**: the pass budget is split evenly between the
//!   class's active queues (floor, minimum one credit), and a queue that runs
//!   out of budget goes to the back of the line.
//! - **FIFO per queue**: frames leave a queue in arrival order, exactly once.
//! - **Coalesced activation**: any number of queues waking up before the pass
//!   worker runs produce a single pass.
//!
//! ## Components
//!
//! - [`core::CreditPool`]: atomic per-class credit counters, safe against the
//!   transmit-completion path replenishing them concurrently.
//! - [`core::ActiveRegistry`]: ordered set of queues believed to hold frames.
//! - [`core::TxScheduler`]: activation trigger, scheduling pass and
//!   introspection, all under one lock.
//! - [`runtime::worker`]: the single context that runs passes, on a tokio task
//!   or a dedicated thread.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use credit_txq::builders::build_scheduler_from_env;
//! use credit_txq::core::{Destination, Frame, TrafficClass, TxScheduler};
//! use credit_txq::infra::{HifChannel, InMemoryFrameQueue};
//! use credit_txq::runtime::{spawn_pass_worker, TokioSpawner};
//!
//! let (hif, commands) = HifChannel::unbounded();
//! let hif = Arc::new(hif);
//! let scheduler: Arc<TxScheduler<InMemoryFrameQueue>> =
//!     Arc::new(build_scheduler_from_env(hif.clone(), hif)?);
//! spawn_pass_worker(Arc::clone(&scheduler), &TokioSpawner::current());
//!
//! scheduler.enqueue(Destination([2, 0, 0, 0, 0, 1]), TrafficClass::Voice, Frame::with_len(1, 200));
//! // transmit completion path:
//! scheduler.complete_tx(TrafficClass::Voice, 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions and credit accounting.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct scheduler components from configuration.
pub mod builders;
/// Infrastructure adapters for frame queues and the host interface.
pub mod infra;
/// Runtime adapters (pass workers, spawners) and administrative API.
pub mod runtime;
/// Shared utilities.
pub mod util;
