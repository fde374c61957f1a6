//! Tests for error types

use credit_txq::core::{AppResult, Destination, QueueKey, SchedulerError, TrafficClass};

#[test]
fn test_error_display() {
    let err = SchedulerError::InvalidConfig("buffer_unit_size must be greater than 0".into());
    assert_eq!(
        err.to_string(),
        "invalid configuration: buffer_unit_size must be greater than 0"
    );

    let key = QueueKey::new(Destination([0x02, 0, 0, 0xab, 0xcd, 0x01]), TrafficClass::Video);
    assert_eq!(
        SchedulerError::UnknownQueue(key).to_string(),
        "unknown queue: 02:00:00:ab:cd:01/VI"
    );
}

#[test]
fn test_error_converts_to_app_result() {
    fn lookup() -> AppResult<()> {
        let key = QueueKey::new(Destination([0; 6]), TrafficClass::Background);
        let found: Result<(), SchedulerError> = Err(SchedulerError::UnknownQueue(key));
        found?;
        Ok(())
    }

    let err = lookup().unwrap_err();
    assert!(err.downcast_ref::<SchedulerError>().is_some());
}
