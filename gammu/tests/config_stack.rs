#![allow(clippy::unwrap_used)]

mod common;

use gammu::{Config, ConnectionType, Error, ErrorCode, MAX_CONFIGS, TruncationPolicy};

fn numbered(n: usize) -> Config {
    Config::new(format!("/dev/ttyUSB{n}"), "at")
}

#[test]
fn stack_holds_six_slots() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    for n in 0..MAX_CONFIGS {
        sm.push_config(&numbered(n)).unwrap();
    }
    assert_eq!(sm.config_count().unwrap(), MAX_CONFIGS);

    let err = sm.push_config(&numbered(6)).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ConfigSlotExhausted));
    assert_eq!(sm.config_count().unwrap(), MAX_CONFIGS);
}

#[test]
fn slots_read_back() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let config = Config {
        model: "at".into(),
        debug_level: "textall".into(),
        debug_file: "/tmp/gammu.log".into(),
        sync_time: true,
        start_info: true,
        ..Config::new("/dev/ttyACM0", "at115200")
    };
    sm.push_config(&config).unwrap();
    sm.push_config(&numbered(1)).unwrap();

    assert_eq!(sm.config(0).unwrap(), config);
    assert_eq!(sm.config(1).unwrap().device, "/dev/ttyUSB1");
    let err = sm.config(2).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ConfigSlotExhausted));
}

#[test]
fn remove_pops_last() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&numbered(0)).unwrap();
    sm.push_config(&numbered(1)).unwrap();

    assert_eq!(sm.remove_config().unwrap().device, "/dev/ttyUSB1");
    assert_eq!(sm.config_count().unwrap(), 1);
    assert_eq!(sm.remove_config().unwrap().device, "/dev/ttyUSB0");

    let err = sm.remove_config().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ConfigSlotExhausted));
}

#[test]
fn freed_machine_leaves_no_borrowed_strings() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&numbered(0)).unwrap();
    sm.push_config(&numbered(1)).unwrap();
    sm.remove_config().unwrap();
    sm.push_config(&numbered(2)).unwrap();
    sm.close().unwrap();
    assert_eq!(device.dangling_config_strings(), 0);
}

#[test]
fn long_model_depends_on_policy() {
    let config = Config {
        model: "x".repeat(60),
        ..common::at_config()
    };

    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    match sm.push_config(&config) {
        Err(Error::Truncated(t)) => {
            assert_eq!(t.field, "config.model");
            assert_eq!(t.requested, 60);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
    assert_eq!(sm.config_count().unwrap(), 0);

    let (gammu, _device) = common::dummy_with(TruncationPolicy::Warn);
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&config).unwrap();
    assert_eq!(sm.config(0).unwrap().model, "x".repeat(49));
}

#[test]
fn nul_in_device_is_rejected() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let err = sm.push_config(&Config::new("/dev/tty\0USB0", "at")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(sm.config_count().unwrap(), 0);
}

#[test]
fn connect_without_config_is_unconfigured() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let err = sm.init_connection(1).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::Unconfigured));
    assert!(!sm.is_connected());
}

#[test]
fn connect_falls_back_to_next_slot() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&Config::new("/dev/nonexistent", "at")).unwrap();
    sm.push_config(&Config::new("/dev/ttyACM1", "at")).unwrap();
    sm.init_connection(1).unwrap();
    assert_eq!(sm.used_connection().unwrap(), ConnectionType::At);
}

#[test]
fn connect_reports_last_failure() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&Config::new("/dev/nonexistent", "at")).unwrap();
    let err = sm.init_connection(1).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::DeviceNotExist));

    sm.remove_config().unwrap();
    sm.push_config(&Config::new("/dev/ttyUSB0", "carrier-pigeon")).unwrap();
    let err = sm.init_connection(1).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UnknownConnectionTypeString));
}

#[test]
fn used_connection_needs_connection() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let err = sm.used_connection().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotConnected));
}
