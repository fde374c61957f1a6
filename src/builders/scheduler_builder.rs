//! Builders to construct a scheduler from configuration.

use std::sync::Arc;

use anyhow::{anyhow, Context};

use crate::config::SchedulerConfig;
use crate::core::{AppResult, CreditPool, FrameQueue, SchedulerError, Transmit, TxScheduler, Wake};

/// Build a scheduler with a fresh credit pool from `cfg`.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] if `cfg` fails validation.
pub fn build_scheduler<Q>(
    cfg: &SchedulerConfig,
    transmit: Arc<dyn Transmit>,
    wake: Arc<dyn Wake>,
) -> Result<TxScheduler<Q>, SchedulerError>
where
    Q: FrameQueue + Default,
{
    let credits = build_credit_pool(cfg)?;
    build_scheduler_with_pool(cfg, credits, transmit, wake)
}

/// Credit pool seeded from `cfg.credits`.
///
/// Lets collaborators that return credit (such as
/// [`HifChannel::returning_credit`](crate::infra::HifChannel::returning_credit))
/// hold the pool before the scheduler exists.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] if `cfg` fails validation.
pub fn build_credit_pool(cfg: &SchedulerConfig) -> Result<Arc<CreditPool>, SchedulerError> {
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;
    Ok(Arc::new(CreditPool::new(cfg.credits.to_map())))
}

/// Build a scheduler around an existing credit pool.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] if `cfg` fails validation.
pub fn build_scheduler_with_pool<Q>(
    cfg: &SchedulerConfig,
    credits: Arc<CreditPool>,
    transmit: Arc<dyn Transmit>,
    wake: Arc<dyn Wake>,
) -> Result<TxScheduler<Q>, SchedulerError>
where
    Q: FrameQueue + Default,
{
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;
    let buffer_unit = cfg
        .buffer_unit()
        .ok_or_else(|| SchedulerError::InvalidConfig("buffer_unit_size must be greater than 0".into()))?;

    tracing::info!(
        "scheduler configured: buffer unit {buffer_unit} bytes, accounting {:?}, credits {:?}",
        cfg.accounting,
        credits.snapshot()
    );

    Ok(TxScheduler::new(
        credits,
        buffer_unit,
        cfg.accounting,
        transmit,
        wake,
    ))
}

/// Build a scheduler from [`SchedulerConfig::from_env`].
///
/// # Errors
///
/// Fails when the environment configuration cannot be loaded or is invalid.
pub fn build_scheduler_from_env<Q>(
    transmit: Arc<dyn Transmit>,
    wake: Arc<dyn Wake>,
) -> AppResult<TxScheduler<Q>>
where
    Q: FrameQueue + Default,
{
    let cfg = SchedulerConfig::from_env()
        .map_err(|e| anyhow!(e))
        .context("loading scheduler configuration from the environment")?;
    build_scheduler(&cfg, transmit, wake).context("building scheduler")
}
