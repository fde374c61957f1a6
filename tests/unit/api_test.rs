//! Tests for the administrative API

use std::sync::Arc;

use credit_txq::builders::build_scheduler;
use credit_txq::config::SchedulerConfig;
use credit_txq::core::{Destination, Frame, NoopWake, TrafficClass, TxScheduler};
use credit_txq::infra::{HifChannel, InMemoryFrameQueue};
use credit_txq::runtime::api::{credit, health, run_command, stats, status};

fn scheduler() -> TxScheduler<InMemoryFrameQueue> {
    let (hif, _rx) = HifChannel::unbounded();
    build_scheduler(&SchedulerConfig::default(), Arc::new(hif), Arc::new(NoopWake)).unwrap()
}

fn dest(n: u8) -> Destination {
    Destination([0x02, 0, 0, 0, 0, n])
}

#[test]
fn test_status_tracks_activity() {
    let sched = scheduler();
    let idle = status(&sched);
    assert!(idle.running);
    assert!(!idle.pass_pending);
    assert_eq!(idle.active_queues, 0);

    sched.enqueue(dest(1), TrafficClass::Voice, Frame::with_len(1, 100));
    sched.set_low_power(true);
    let busy = status(&sched);
    assert!(busy.pass_pending);
    assert!(busy.low_power);
    assert_eq!(busy.active_queues, 1);

    sched.trigger().shutdown();
    let stopped = status(&sched);
    assert!(!stopped.running);
    assert!(stopped.to_string().starts_with("Scheduler Status: Stopped"));
}

#[test]
fn test_credit_report_lists_hardware_order() {
    let sched = scheduler();
    let report = credit(&sched);
    let order: Vec<_> = report.classes.iter().map(|c| c.class).collect();
    assert_eq!(
        order,
        vec![
            TrafficClass::Background,
            TrafficClass::BestEffort,
            TrafficClass::Video,
            TrafficClass::Voice,
        ]
    );

    let text = report.to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("TX Credit Status:"));
    assert_eq!(
        lines.next(),
        Some("AC0 (BK): 4 credits (0 in flight, ceiling 4, 0 active queues)")
    );
}

#[test]
fn test_stats_after_pass() {
    let sched = scheduler();
    sched.enqueue(dest(1), TrafficClass::Video, Frame::with_len(1, 3000));
    sched.enqueue(dest(1), TrafficClass::Video, Frame::with_len(2, 10));
    sched.run_pass();

    let report = stats(&sched);
    assert_eq!(report.stats.total_frames(), 2);
    assert_eq!(report.stats.frames[TrafficClass::Video], 2);
    assert_eq!(report.stats.credits[TrafficClass::Video], 4);
    assert_eq!(report.stats.queues_drained, 1);

    let text = report.to_string();
    assert!(text.contains("Total TX: 2 frames"), "{text}");
    assert!(text.contains("AC2 (VI): 2 frames, 4 credits"), "{text}");
}

#[test]
fn test_run_command() {
    let sched = scheduler();
    assert!(run_command(&sched, "status").unwrap().contains("Running"));
    assert!(run_command(&sched, "credit").unwrap().contains("AC3 (VO): 8 credits"));
    assert!(run_command(&sched, "stats").unwrap().starts_with("TX Statistics:"));

    let usage = run_command(&sched, "reboot").unwrap_err();
    assert!(usage.starts_with("Unknown command: reboot"));
    assert!(usage.contains("credit"));
}

#[test]
fn test_responses_serialize() {
    let sched = scheduler();
    let value = serde_json::to_value(status(&sched)).unwrap();
    assert_eq!(value["active_queues"], 0);
    assert_eq!(value["running"], true);

    let value = serde_json::to_value(credit(&sched)).unwrap();
    assert_eq!(value["classes"][3]["class"], "voice");
    assert_eq!(value["classes"][3]["ceiling"], 8);

    assert!(health().ok);
}
