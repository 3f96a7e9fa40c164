#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use gammu::{Error, ErrorCode};
use parking_lot::Mutex;

#[test]
fn close_is_idempotent_and_frees_once() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    assert!(sm.is_connected());

    sm.close().unwrap();
    sm.close().unwrap();
    drop(sm);

    assert_eq!(device.allocations(), 1);
    assert_eq!(device.frees(), 1);
    assert_eq!(device.invalid_frees(), 0);
    assert_eq!(device.live_state_machines(), 0);
}

#[test]
fn drop_frees_once() {
    let (gammu, device) = common::dummy();
    {
        let _sm = common::connected(&gammu);
        let _idle = gammu.state_machine().unwrap();
        assert_eq!(device.live_state_machines(), 2);
    }
    assert_eq!(device.frees(), 2);
    assert_eq!(device.invalid_frees(), 0);
}

#[test]
fn failed_allocation_is_out_of_memory() {
    let (gammu, device) = common::dummy();
    device.fail_next_allocation();
    assert!(matches!(gammu.state_machine(), Err(Error::OutOfMemory)));
    assert_eq!(device.frees(), 0);

    let sm = gammu.state_machine().unwrap();
    assert!(!sm.is_closed());
}

#[test]
fn use_after_close_is_released() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);
    sm.close().unwrap();

    assert!(sm.is_closed());
    assert!(!sm.is_connected());
    assert!(matches!(sm.config_count(), Err(Error::Released)));
    assert!(matches!(sm.push_config(&common::at_config()), Err(Error::Released)));
    assert!(matches!(sm.init_connection(1), Err(Error::Released)));
    assert!(matches!(sm.read_device(false), Err(Error::Released)));
    assert!(matches!(sm.imei(), Err(Error::Released)));
    assert!(matches!(sm.on_incoming_sms(|_, _| {}), Err(Error::Released)));
}

#[test]
fn close_disconnects_and_reports_to_log_listener() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&common::at_config()).unwrap();

    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    sm.init_connection_with_log(1, move |_, line| sink.lock().push(line.to_owned()))
        .unwrap();
    sm.close().unwrap();

    let lines = lines.lock();
    assert_eq!(
        lines.first().map(String::as_str),
        Some("Connected to dummy phone on /dev/ttyUSB0 (at)")
    );
    assert_eq!(lines.last().map(String::as_str), Some("Disconnected"));
    assert_eq!(device.replay_stale_callbacks(), 1);
    assert_eq!(lines.len(), 2);
}

#[test]
fn terminate_then_reconnect() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);
    sm.terminate_connection().unwrap();
    assert!(!sm.is_connected());

    let err = sm.terminate_connection().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotConnected));

    sm.init_connection(1).unwrap();
    assert!(sm.is_connected());
}

#[test]
fn machines_are_independent() {
    let (gammu, device) = common::dummy();
    let a = common::connected(&gammu);
    let b = gammu.state_machine().unwrap();
    assert_ne!(a.id(), b.id());

    b.close().unwrap();
    assert!(a.is_connected());
    assert_eq!(device.live_state_machines(), 1);
}

#[test]
fn machines_outlive_cloned_context() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu.clone());
    drop(gammu);
    assert_eq!(sm.manufacturer().unwrap(), "Gammu");
    drop(sm);
    assert_eq!(device.frees(), 1);
}
