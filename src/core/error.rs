//! Error types for scheduler operations.
//!
//! Scheduling never fails; a pass that cannot make progress reports it in its
//! [`PassReport`](crate::core::PassReport). These errors cover setup and
//! queue management.

use thiserror::Error;

use crate::core::QueueKey;

/// Errors produced by scheduler components.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// No queue is registered under the key.
    #[error("unknown queue: {0}")]
    UnknownQueue(QueueKey),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
