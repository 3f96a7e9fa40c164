#![allow(unsafe_code)]
//! Callback registration table and the `extern "C"` trampolines.
//!
//! The native library only ever sees a registration key as `user_data`.
//! Trampolines resolve `key -> table -> current listener` through a
//! process-wide registry; a key whose table is gone, or a slot that has been
//! cleared, turns the call into a no-op.

use std::collections::HashMap;
use std::ffi::{CStr, c_char, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Weak};
use std::{fmt, mem, ptr};

use gammu_sys::{GSM_Call, GSM_SMSMessage, GSM_StateMachine};
use parking_lot::RwLock;

use crate::call::Call;
use crate::sms::SmsMessage;

/// Identifies the state machine an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MachineId(usize);

impl MachineId {
    /// Numeric value, unique per process.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sm#{}", self.0)
    }
}

/// The kinds of native events a state machine can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `GSM_SetIncomingSMSCallback`.
    IncomingSms,
    /// `GSM_SetIncomingCallCallback`.
    IncomingCall,
    /// The log function given to `GSM_InitConnection_Log`.
    Log,
}

impl EventKind {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        match self {
            Self::IncomingSms => 0,
            Self::IncomingCall => 1,
            Self::Log => 2,
        }
    }
}

pub(crate) type SmsListener = dyn Fn(MachineId, &SmsMessage) + Send + Sync;
pub(crate) type CallListener = dyn Fn(MachineId, &Call) + Send + Sync;
pub(crate) type LogListener = dyn Fn(MachineId, &str) + Send + Sync;

/// A registered user callback.
#[derive(Clone)]
pub(crate) enum Listener {
    Sms(Arc<SmsListener>),
    Call(Arc<CallListener>),
    Log(Arc<LogListener>),
}

impl Listener {
    pub(crate) const fn kind(&self) -> EventKind {
        match self {
            Self::Sms(_) => EventKind::IncomingSms,
            Self::Call(_) => EventKind::IncomingCall,
            Self::Log(_) => EventKind::Log,
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.kind()).finish()
    }
}

struct TableInner {
    id: MachineId,
    slots: RwLock<[Option<Listener>; EventKind::COUNT]>,
    installed: [AtomicBool; EventKind::COUNT],
}

impl Drop for TableInner {
    fn drop(&mut self) {
        REGISTRY.write().remove(&self.id.0);
        tracing::debug!(machine = %self.id, "callback table dropped");
    }
}

static REGISTRY: LazyLock<RwLock<HashMap<usize, Weak<TableInner>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));
static NEXT_KEY: AtomicUsize = AtomicUsize::new(1);

/// Per state machine listener slots, one per [`EventKind`].
pub(crate) struct CallbackTable {
    inner: Arc<TableInner>,
}

impl CallbackTable {
    pub(crate) fn new() -> Self {
        let id = MachineId(NEXT_KEY.fetch_add(1, Ordering::Relaxed));
        let inner = Arc::new(TableInner {
            id,
            slots: RwLock::new([None, None, None]),
            installed: [AtomicBool::new(false), AtomicBool::new(false), AtomicBool::new(false)],
        });
        REGISTRY.write().insert(id.0, Arc::downgrade(&inner));
        Self { inner }
    }

    pub(crate) fn id(&self) -> MachineId {
        self.inner.id
    }

    /// The value native code gets as `user_data`: the key, not an address.
    pub(crate) fn user_data(&self) -> *mut c_void {
        ptr::without_provenance_mut(self.inner.id.0)
    }

    /// Make `listener` current for its kind and return the previous one.
    /// The caller drops the previous listener after the lock is released.
    pub(crate) fn replace(&self, listener: Listener) -> Option<Listener> {
        let kind = listener.kind();
        let previous = mem::replace(&mut self.inner.slots.write()[kind.index()], Some(listener));
        tracing::debug!(
            machine = %self.inner.id,
            ?kind,
            replaced = previous.is_some(),
            "listener registered"
        );
        previous
    }

    /// Put back what [`replace`](Self::replace) returned.
    pub(crate) fn restore(&self, kind: EventKind, previous: Option<Listener>) -> Option<Listener> {
        mem::replace(&mut self.inner.slots.write()[kind.index()], previous)
    }

    pub(crate) fn take(&self, kind: EventKind) -> Option<Listener> {
        let taken = self.inner.slots.write()[kind.index()].take();
        if taken.is_some() {
            tracing::debug!(machine = %self.inner.id, ?kind, "listener unregistered");
        }
        taken
    }

    pub(crate) fn is_registered(&self, kind: EventKind) -> bool {
        self.inner.slots.read()[kind.index()].is_some()
    }

    /// Record whether the trampoline for `kind` is installed natively.
    /// Returns the previous state.
    pub(crate) fn set_installed(&self, kind: EventKind, installed: bool) -> bool {
        self.inner.installed[kind.index()].swap(installed, Ordering::AcqRel)
    }

    pub(crate) fn is_installed(&self, kind: EventKind) -> bool {
        self.inner.installed[kind.index()].load(Ordering::Acquire)
    }
}

impl fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackTable")
            .field("id", &self.inner.id)
            .field("slots", &*self.inner.slots.read())
            .finish_non_exhaustive()
    }
}

fn resolve(user_data: *mut c_void) -> Option<Arc<TableInner>> {
    let weak = REGISTRY.read().get(&user_data.addr()).cloned()?;
    weak.upgrade()
}

fn current(table: &TableInner, kind: EventKind) -> Option<Listener> {
    table.slots.read()[kind.index()].clone()
}

fn dispatch(id: MachineId, kind: EventKind, f: impl FnOnce()) {
    if panic::catch_unwind(AssertUnwindSafe(f)).is_err() {
        tracing::error!(machine = %id, ?kind, "listener panicked; event dropped");
    }
}

pub(crate) unsafe extern "C" fn sms_trampoline(
    _sm: *mut GSM_StateMachine,
    sms: *mut GSM_SMSMessage,
    user_data: *mut c_void,
) {
    let Some(table) = resolve(user_data) else {
        return;
    };
    let Some(Listener::Sms(listener)) = current(&table, EventKind::IncomingSms) else {
        return;
    };
    if sms.is_null() {
        return;
    }
    let raw = unsafe { &*sms };
    let id = table.id;
    dispatch(id, EventKind::IncomingSms, || match SmsMessage::from_native(raw) {
        Ok(message) => listener(id, &message),
        Err(err) => tracing::warn!(machine = %id, %err, "undecodable incoming SMS dropped"),
    });
}

pub(crate) unsafe extern "C" fn call_trampoline(
    _sm: *mut GSM_StateMachine,
    call: *mut GSM_Call,
    user_data: *mut c_void,
) {
    let Some(table) = resolve(user_data) else {
        return;
    };
    let Some(Listener::Call(listener)) = current(&table, EventKind::IncomingCall) else {
        return;
    };
    if call.is_null() {
        return;
    }
    let raw = unsafe { &*call };
    let id = table.id;
    dispatch(id, EventKind::IncomingCall, || match Call::from_native(raw) {
        Ok(call) => listener(id, &call),
        Err(err) => tracing::warn!(machine = %id, %err, "undecodable call event dropped"),
    });
}

pub(crate) unsafe extern "C" fn log_trampoline(text: *const c_char, user_data: *mut c_void) {
    let Some(table) = resolve(user_data) else {
        return;
    };
    if text.is_null() {
        return;
    }
    let text = unsafe { CStr::from_ptr(text) }.to_string_lossy();
    let line = text.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return;
    }
    let id = table.id;
    match current(&table, EventKind::Log) {
        Some(Listener::Log(listener)) => dispatch(id, EventKind::Log, || listener(id, line)),
        _ => tracing::trace!(target: "gammu::native", machine = %id, "{line}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counting_sms(counter: &Arc<AtomicUsize>) -> Listener {
        let counter = Arc::clone(counter);
        Listener::Sms(Arc::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
    }

    fn fire_sms(table: &CallbackTable) {
        let mut raw = SmsMessage::text_message("+15550100", "hi").to_native().unwrap().value;
        unsafe { sms_trampoline(ptr::null_mut(), &raw mut raw, table.user_data()) };
    }

    #[test]
    fn replacement_routes_to_newest() {
        let table = CallbackTable::new();
        let (a, b) = (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)));
        assert!(table.replace(counting_sms(&a)).is_none());
        assert!(table.replace(counting_sms(&b)).is_some());
        fire_sms(&table);
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cleared_slot_is_a_no_op() {
        let table = CallbackTable::new();
        let hits = Arc::new(AtomicUsize::new(0));
        table.replace(counting_sms(&hits));
        table.take(EventKind::IncomingSms);
        fire_sms(&table);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(!table.is_registered(EventKind::IncomingSms));
    }

    #[test]
    fn dropped_table_leaves_registry() {
        let table = CallbackTable::new();
        let user_data = table.user_data();
        assert!(resolve(user_data).is_some());
        drop(table);
        assert!(resolve(user_data).is_none());
        let mut raw = SmsMessage::default().to_native().unwrap().value;
        unsafe { sms_trampoline(ptr::null_mut(), &raw mut raw, user_data) };
    }

    #[test]
    fn panics_stay_on_the_rust_side() {
        let table = CallbackTable::new();
        table.replace(Listener::Sms(Arc::new(|_, _| panic!("listener bug"))));
        fire_sms(&table);
    }

    #[test]
    fn log_lines_reach_listener_trimmed() {
        let table = CallbackTable::new();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        table.replace(Listener::Log(Arc::new(move |id, line| {
            sink.lock().push((id, line.to_owned()));
        })));
        unsafe { log_trampoline(c"AT+CPIN?\r\n".as_ptr(), table.user_data()) };
        unsafe { log_trampoline(c"\n".as_ptr(), table.user_data()) };
        assert_eq!(*seen.lock(), vec![(table.id(), "AT+CPIN?".to_owned())]);
    }

    #[test]
    fn keys_are_unique() {
        let (a, b) = (CallbackTable::new(), CallbackTable::new());
        assert_ne!(a.id(), b.id());
        assert_ne!(a.user_data(), b.user_data());
        assert!(!a.set_installed(EventKind::Log, true));
        assert!(a.is_installed(EventKind::Log) && !b.is_installed(EventKind::Log));
    }
}
