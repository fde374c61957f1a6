//! Core scheduling: credits, queues, the active registry and the pass driver.

pub mod class_scheduler;
pub mod collaborators;
pub mod credit;
pub mod drain;
pub mod error;
pub mod frame;
pub mod queue;
pub mod registry;
pub mod scheduler;
pub mod stats;
pub mod traffic_class;
pub mod trigger;

pub use class_scheduler::{ClassReport, QueueTurn, RemainingAccounting};
pub use collaborators::{NoopWake, Transmit, Wake};
pub use credit::{CreditLimit, CreditPool};
pub use drain::{DrainOutcome, DrainResult};
pub use error::{AppResult, SchedulerError};
pub use frame::{credit_cost, Frame, FrameId, FrameInfo};
pub use queue::{Destination, FrameQueue, QueueDepth, QueueKey, TxQueue};
pub use registry::ActiveRegistry;
pub use scheduler::{ClassSnapshot, PassOutcome, PassReport, SchedulerSnapshot, TxScheduler};
pub use stats::SchedulerStats;
pub use traffic_class::{ClassMap, TrafficClass, NUM_CLASSES};
pub use trigger::PassTrigger;
