#![allow(clippy::unwrap_used)]

mod common;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gammu::{Call, CallStatus, ErrorCode, MachineId, SmsMessage};
use parking_lot::Mutex;

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn hits(c: &Arc<AtomicUsize>) -> usize {
    c.load(Ordering::SeqCst)
}

fn incoming(text: &str) -> SmsMessage {
    SmsMessage::text_message("+15550100", text)
}

#[test]
fn replacement_routes_only_to_newest() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let (a, b) = (counter(), counter());

    let sink = Arc::clone(&a);
    sm.on_incoming_sms(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    let sink = Arc::clone(&b);
    sm.on_incoming_sms(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    device.queue_incoming_sms(&incoming("one")).unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 1);
    assert_eq!((hits(&a), hits(&b)), (0, 1));

    device.replay_stale_callbacks();
    assert_eq!((hits(&a), hits(&b)), (0, 2));
}

#[test]
fn listener_sees_message_and_machine() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let seen: Arc<Mutex<Vec<(MachineId, String, String)>>> = Arc::default();

    let sink = Arc::clone(&seen);
    sm.on_incoming_sms(move |id, sms| {
        sink.lock()
            .push((id, sms.number.clone(), sms.text().unwrap_or_default().to_owned()));
    })
    .unwrap();
    device.queue_incoming_sms(&incoming("ping")).unwrap();
    sm.read_device(true).unwrap();

    assert_eq!(
        *seen.lock(),
        vec![(sm.id(), "+15550100".to_owned(), "ping".to_owned())]
    );
}

#[test]
fn disabled_listener_never_runs() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let c = counter();
    let sink = Arc::clone(&c);
    sm.on_incoming_sms(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    sm.disable_incoming_sms().unwrap();

    device.queue_incoming_sms(&incoming("late")).unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 0);
    assert!(device.replay_stale_callbacks() >= 1);
    assert_eq!(hits(&c), 0);
}

#[test]
fn closed_machine_gets_no_events() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let (sms, call) = (counter(), counter());
    let sink = Arc::clone(&sms);
    sm.on_incoming_sms(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    let sink = Arc::clone(&call);
    sm.on_incoming_call(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    sm.close().unwrap();
    assert_eq!(device.replay_stale_callbacks(), 3);
    drop(sm);
    device.replay_stale_callbacks();

    assert_eq!((hits(&sms), hits(&call)), (0, 0));
    assert_eq!(device.frees(), 1);
}

#[test]
fn replaced_then_closed_runs_neither_listener() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let (a, b) = (counter(), counter());
    for c in [&a, &b] {
        let sink = Arc::clone(c);
        sm.on_incoming_sms(move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    device.queue_incoming_sms(&incoming("late")).unwrap();
    sm.close().unwrap();
    device.replay_stale_callbacks();
    drop(sm);
    device.replay_stale_callbacks();

    assert_eq!((hits(&a), hits(&b)), (0, 0));
    assert_eq!(device.frees(), 1);
    assert_eq!(device.invalid_frees(), 0);
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn close_logs_failed_notification_teardown() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    sm.on_incoming_sms(|_, _| {}).unwrap();
    device.reject_notification_changes();

    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || sm.close().unwrap());

    let text = String::from_utf8(log.0.lock().clone()).unwrap();
    assert!(text.contains("could not disable notifications"), "{text}");
    assert_eq!(device.frees(), 1);
}

#[test]
fn registration_needs_connection() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let c = counter();
    let sink = Arc::clone(&c);
    let err = sm
        .on_incoming_sms(move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotConnected));

    sm.push_config(&common::at_config()).unwrap();
    sm.init_connection(1).unwrap();
    device.queue_incoming_sms(&incoming("after")).unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 0);
    device.replay_stale_callbacks();
    assert_eq!(hits(&c), 0);
}

#[test]
fn failed_replacement_keeps_previous() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let (kept, rejected) = (counter(), counter());
    let sink = Arc::clone(&kept);
    sm.on_incoming_sms(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    sm.terminate_connection().unwrap();
    let sink = Arc::clone(&rejected);
    let err = sm
        .on_incoming_sms(move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotConnected));

    sm.init_connection(1).unwrap();
    device.queue_incoming_sms(&incoming("back")).unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 1);
    assert_eq!((hits(&kept), hits(&rejected)), (1, 0));
}

#[test]
fn listeners_survive_reconnect() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let c = counter();
    let sink = Arc::clone(&c);
    sm.on_incoming_sms(move |_, _| {
        sink.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    sm.terminate_connection().unwrap();
    device.queue_incoming_sms(&incoming("queued while offline")).unwrap();
    sm.init_connection(1).unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 1);
    assert_eq!(hits(&c), 1);
}

#[test]
fn call_events() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let seen: Arc<Mutex<Vec<Call>>> = Arc::default();
    let sink = Arc::clone(&seen);
    sm.on_incoming_call(move |_, call| sink.lock().push(call.clone()))
        .unwrap();

    let ring = Call {
        status: CallStatus::Incoming,
        call_id: Some(7),
        phone_number: "+15550199".into(),
    };
    let hangup = Call {
        status: CallStatus::RemoteEnded(16),
        ..ring.clone()
    };
    device.queue_incoming_call(&ring).unwrap();
    device.queue_incoming_call(&hangup).unwrap();
    device.queue_incoming_sms(&incoming("no sms listener")).unwrap();

    assert_eq!(sm.read_device(false).unwrap(), 2);
    assert_eq!(*seen.lock(), vec![ring, hangup]);

    sm.disable_incoming_call().unwrap();
    device.queue_incoming_call(&Call {
        status: CallStatus::Incoming,
        call_id: None,
        phone_number: "+15550198".into(),
    })
    .unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 0);
    assert_eq!(seen.lock().len(), 2);
}

#[test]
fn log_listener_sees_reads() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&common::at_config()).unwrap();
    let lines: Arc<Mutex<Vec<(MachineId, String)>>> = Arc::default();
    let sink = Arc::clone(&lines);
    sm.init_connection_with_log(1, move |id, line| sink.lock().push((id, line.to_owned())))
        .unwrap();

    device.queue_incoming_sms(&incoming("unobserved")).unwrap();
    sm.read_device(false).unwrap();
    sm.terminate_connection().unwrap();

    let lines = lines.lock();
    let texts: Vec<&str> = lines.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Connected to dummy phone on /dev/ttyUSB0 (at)",
            "read_device: 0 notifications",
            "Disconnected",
        ]
    );
    assert!(lines.iter().all(|(id, _)| *id == sm.id()));
}

#[test]
fn failed_connect_drops_log_listener() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let c = counter();
    let sink = Arc::clone(&c);
    let err = sm
        .init_connection_with_log(1, move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::Unconfigured));
    device.replay_stale_callbacks();
    assert_eq!(hits(&c), 0);
}

#[test]
fn panicking_listener_is_contained() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    sm.on_incoming_sms(|_, sms| {
        assert_ne!(sms.text(), Some("boom"), "listener refused message");
    })
    .unwrap();

    device.queue_incoming_sms(&incoming("boom")).unwrap();
    device.queue_incoming_sms(&incoming("fine")).unwrap();
    assert_eq!(sm.read_device(false).unwrap(), 2);
    assert!(sm.is_connected());
}

#[test]
fn events_are_per_machine() {
    let (gammu, device) = common::dummy();
    let a = common::connected(&gammu);
    let b = common::connected(&gammu);
    let seen: Arc<Mutex<Vec<MachineId>>> = Arc::default();
    for sm in [&a, &b] {
        let sink = Arc::clone(&seen);
        sm.on_incoming_sms(move |id, _| sink.lock().push(id)).unwrap();
    }

    device.queue_incoming_sms(&incoming("for whoever reads")).unwrap();
    b.read_device(false).unwrap();
    assert_eq!(*seen.lock(), vec![b.id()]);
}
