//! Tests for configuration validation and loading

use std::collections::HashMap;

use credit_txq::config::scheduler::{ENV_ACCOUNTING, ENV_BUFFER_UNIT, ENV_CONFIG_PATH};
use credit_txq::config::{ClassCredits, SchedulerConfig};
use credit_txq::core::{CreditLimit, RemainingAccounting, TrafficClass};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_default_config_is_valid() {
    let cfg = SchedulerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.buffer_unit_size, 1024);
    assert_eq!(cfg.accounting, RemainingAccounting::Allocated);
    assert_eq!(cfg.credits.get(TrafficClass::Background), CreditLimit::full(4));
    assert_eq!(cfg.credits.get(TrafficClass::BestEffort), CreditLimit::full(35));
    assert_eq!(cfg.credits.get(TrafficClass::Video), CreditLimit::full(8));
    assert_eq!(cfg.credits.get(TrafficClass::Voice), CreditLimit::full(8));
}

#[test]
fn test_zero_buffer_unit_rejected() {
    let cfg = SchedulerConfig {
        buffer_unit_size: 0,
        ..SchedulerConfig::default()
    };
    assert!(cfg.validate().is_err());
    assert!(cfg.buffer_unit().is_none());
}

#[test]
fn test_zero_ceiling_rejected() {
    let cfg = SchedulerConfig {
        credits: ClassCredits {
            video: CreditLimit::full(0),
            ..ClassCredits::default()
        },
        ..SchedulerConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.contains("VI"), "{err}");
}

#[test]
fn test_initial_above_ceiling_rejected() {
    let cfg = SchedulerConfig {
        credits: ClassCredits {
            voice: CreditLimit {
                initial: 9,
                ceiling: 8,
            },
            ..ClassCredits::default()
        },
        ..SchedulerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_json_uses_defaults_for_missing_sections() {
    let cfg = SchedulerConfig::from_json_str(r#"{ "buffer_unit_size": 512 }"#).unwrap();
    assert_eq!(cfg.buffer_unit_size, 512);
    assert_eq!(cfg.credits, ClassCredits::default());
    assert_eq!(cfg.accounting, RemainingAccounting::Allocated);
}

#[test]
fn test_json_full_document() {
    let raw = r#"{
        "buffer_unit_size": 1600,
        "accounting": "consumed",
        "credits": {
            "voice": { "initial": 2, "ceiling": 8 },
            "video": { "initial": 8, "ceiling": 8 },
            "best_effort": { "initial": 20, "ceiling": 35 },
            "background": { "initial": 4, "ceiling": 4 }
        }
    }"#;
    let cfg = SchedulerConfig::from_json_str(raw).unwrap();
    assert_eq!(cfg.accounting, RemainingAccounting::Consumed);
    assert_eq!(cfg.credits.voice.initial, 2);
    assert_eq!(cfg.credits.to_map()[TrafficClass::BestEffort].ceiling, 35);
}

#[test]
fn test_json_errors() {
    assert!(SchedulerConfig::from_json_str("{}").is_err());
    assert!(SchedulerConfig::from_json_str("not json").is_err());
    assert!(SchedulerConfig::from_json_str(r#"{ "buffer_unit_size": 0 }"#).is_err());
    assert!(
        SchedulerConfig::from_json_str(r#"{ "buffer_unit_size": 10, "accounting": "eager" }"#)
            .is_err()
    );
}

#[test]
fn test_lookup_without_variables_gives_defaults() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, SchedulerConfig::default());
}

#[test]
fn test_lookup_overrides() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[
        (ENV_BUFFER_UNIT, " 2048 "),
        (ENV_ACCOUNTING, "consumed"),
    ]))
    .unwrap();
    assert_eq!(cfg.buffer_unit_size, 2048);
    assert_eq!(cfg.accounting, RemainingAccounting::Consumed);
}

#[test]
fn test_lookup_rejects_bad_values() {
    assert!(SchedulerConfig::from_lookup(lookup(&[(ENV_BUFFER_UNIT, "lots")])).is_err());
    assert!(SchedulerConfig::from_lookup(lookup(&[(ENV_BUFFER_UNIT, "0")])).is_err());
    assert!(SchedulerConfig::from_lookup(lookup(&[(ENV_ACCOUNTING, "eager")])).is_err());
}

#[test]
fn test_lookup_reads_config_file() {
    let path = std::env::temp_dir().join(format!("credit_txq_cfg_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "buffer_unit_size": 256 }"#).unwrap();
    let path_str = path.to_string_lossy().into_owned();

    let cfg = SchedulerConfig::from_lookup(lookup(&[
        (ENV_CONFIG_PATH, path_str.as_str()),
        (ENV_ACCOUNTING, "consumed"),
    ]))
    .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.buffer_unit_size, 256);
    assert_eq!(cfg.accounting, RemainingAccounting::Consumed);
}

#[test]
fn test_lookup_missing_config_file() {
    let err = SchedulerConfig::from_lookup(lookup(&[(
        ENV_CONFIG_PATH,
        "/nonexistent/credit_txq.json",
    )]))
    .unwrap_err();
    assert!(err.contains("cannot read"), "{err}");
}
