#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use gammu::{Config, DummyBackend, Gammu, StateMachine, TruncationPolicy};

/// A context on a fresh dummy device, plus a handle for inspecting it.
pub fn dummy() -> (Gammu, DummyBackend) {
    dummy_with(TruncationPolicy::Reject)
}

pub fn dummy_with(policy: TruncationPolicy) -> (Gammu, DummyBackend) {
    let device = DummyBackend::new();
    let gammu = Gammu::builder()
        .backend(Arc::new(device.clone()))
        .truncation(policy)
        .build()
        .unwrap();
    (gammu, device)
}

pub fn at_config() -> Config {
    Config::new("/dev/ttyUSB0", "at")
}

/// A state machine with one AT config, connected.
pub fn connected(gammu: &Gammu) -> StateMachine {
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&at_config()).unwrap();
    sm.init_connection(1).unwrap();
    sm
}
