//! Tests for scheduler builders

use std::sync::Arc;

use credit_txq::builders::{
    build_credit_pool, build_scheduler, build_scheduler_from_env, build_scheduler_with_pool,
};
use credit_txq::config::{ClassCredits, SchedulerConfig};
use credit_txq::core::{CreditLimit, NoopWake, SchedulerError, TrafficClass, TxScheduler};
use credit_txq::infra::{HifChannel, InMemoryFrameQueue};

fn hif() -> Arc<HifChannel> {
    let (hif, _rx) = HifChannel::unbounded();
    Arc::new(hif)
}

#[test]
fn test_build_rejects_invalid_config() {
    let cfg = SchedulerConfig {
        buffer_unit_size: 0,
        ..SchedulerConfig::default()
    };
    let result: Result<TxScheduler<InMemoryFrameQueue>, _> =
        build_scheduler(&cfg, hif(), Arc::new(NoopWake));
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn test_build_seeds_credit_pool() {
    let cfg = SchedulerConfig {
        credits: ClassCredits {
            best_effort: CreditLimit {
                initial: 10,
                ceiling: 35,
            },
            ..ClassCredits::default()
        },
        ..SchedulerConfig::default()
    };
    let sched: TxScheduler<InMemoryFrameQueue> =
        build_scheduler(&cfg, hif(), Arc::new(NoopWake)).unwrap();

    let credits = sched.credits();
    assert_eq!(credits.available(TrafficClass::Voice), 8);
    assert_eq!(credits.available(TrafficClass::Video), 8);
    assert_eq!(credits.available(TrafficClass::BestEffort), 10);
    assert_eq!(credits.ceiling(TrafficClass::BestEffort), 35);
    assert_eq!(credits.available(TrafficClass::Background), 4);
    assert_eq!(credits.total_available(), 30);
    assert_eq!(sched.snapshot().total_active, 0);
}

#[test]
fn test_build_from_env_defaults() {
    let sched: TxScheduler<InMemoryFrameQueue> =
        build_scheduler_from_env(hif(), Arc::new(NoopWake)).unwrap();
    for class in TrafficClass::PRIORITY_ORDER {
        assert!(sched.credits().ceiling(class) > 0);
    }
}

#[test]
fn test_build_with_pool_shares_it() {
    let cfg = SchedulerConfig::default();
    let credits = build_credit_pool(&cfg).unwrap();
    let sched: TxScheduler<InMemoryFrameQueue> =
        build_scheduler_with_pool(&cfg, Arc::clone(&credits), hif(), Arc::new(NoopWake)).unwrap();
    assert!(Arc::ptr_eq(sched.credits(), &credits));
}

#[test]
fn test_credit_pool_rejects_invalid_config() {
    let cfg = SchedulerConfig {
        buffer_unit_size: 0,
        ..SchedulerConfig::default()
    };
    assert!(matches!(build_credit_pool(&cfg), Err(SchedulerError::InvalidConfig(_))));
}
