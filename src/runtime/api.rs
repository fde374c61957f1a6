//! Read-only administrative reports over scheduler introspection.
//!
//! Response models serialize with serde for a control socket; their
//! `Display` impls give the plain-text form of the `status`, `credit` and
//! `stats` commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ClassSnapshot, FrameQueue, SchedulerStats, TrafficClass, TxScheduler};

/// Answer to `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Pass worker still accepting requests.
    pub running: bool,
    /// Target in power save.
    pub low_power: bool,
    /// A pass has been requested and not started.
    pub pass_pending: bool,
    /// Active queues.
    pub active_queues: usize,
}

/// Answer to `credit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditResponse {
    /// Per-class credit, AC0 first.
    pub classes: Vec<ClassSnapshot>,
}

/// Answer to `stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Scheduler counters.
    pub stats: SchedulerStats,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Build the `status` report.
pub fn status<Q: FrameQueue + Default>(scheduler: &TxScheduler<Q>) -> StatusResponse {
    let snapshot = scheduler.snapshot();
    StatusResponse {
        running: !scheduler.trigger().is_shut_down(),
        low_power: snapshot.low_power,
        pass_pending: scheduler.trigger().is_pending(),
        active_queues: snapshot.total_active,
    }
}

/// Build the `credit` report.
pub fn credit<Q: FrameQueue + Default>(scheduler: &TxScheduler<Q>) -> CreditResponse {
    let mut classes = scheduler.snapshot().classes;
    classes.sort_by_key(|c| c.class.hw_queue());
    CreditResponse { classes }
}

/// Build the `stats` report.
pub fn stats<Q: FrameQueue + Default>(scheduler: &TxScheduler<Q>) -> StatsResponse {
    StatsResponse {
        stats: scheduler.stats(),
    }
}

/// Run an administrative command by name and render its text output.
///
/// # Errors
///
/// Returns the usage text for an unknown command.
pub fn run_command<Q: FrameQueue + Default>(
    scheduler: &TxScheduler<Q>,
    command: &str,
) -> Result<String, String> {
    match command {
        "status" => Ok(status(scheduler).to_string()),
        "credit" => Ok(credit(scheduler).to_string()),
        "stats" => Ok(stats(scheduler).to_string()),
        other => Err(format!(
            "Unknown command: {other}\nCommands:\n  status    - Show scheduler status\n  credit    - Show TX credit information\n  stats     - Show statistics"
        )),
    }
}

/// Return a health payload.
#[must_use]
pub const fn health() -> Health {
    Health { ok: true }
}

impl fmt::Display for StatusResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.running { "Running" } else { "Stopped" };
        writeln!(f, "Scheduler Status: {state}")?;
        writeln!(f, "Power save: {}", if self.low_power { "on" } else { "off" })?;
        writeln!(f, "Pass pending: {}", if self.pass_pending { "yes" } else { "no" })?;
        write!(f, "Active queues: {}", self.active_queues)
    }
}

impl fmt::Display for CreditResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TX Credit Status:")?;
        for c in &self.classes {
            write!(
                f,
                "\n{}: {} credits ({} in flight, ceiling {}, {} active queues)",
                c.class, c.available_credit, c.in_flight_credit, c.ceiling, c.active_queues
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for StatsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "TX Statistics:")?;
        writeln!(f, "Total TX: {} frames", s.total_frames())?;
        for class in TrafficClass::PRIORITY_ORDER.iter().rev() {
            writeln!(
                f,
                "{class}: {} frames, {} credits",
                s.frames[*class], s.credits[*class]
            )?;
        }
        writeln!(
            f,
            "Passes: {} ({} idle, {} without credit)",
            s.passes, s.idle_passes, s.backpressured_passes
        )?;
        writeln!(
            f,
            "Activations: {} ({} duplicate), wake-ups: {}",
            s.activations, s.duplicate_activations, s.wakeups
        )?;
        write!(
            f,
            "Queues drained: {}, requeued: {}",
            s.queues_drained, s.queues_requeued
        )
    }
}
