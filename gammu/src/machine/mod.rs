#![allow(unsafe_code)]
//! `GSM_StateMachine` ownership, configuration stack and connection control.
//!
//! Phone queries live in `info`, SMS storage in `sms` and asynchronous event
//! registration in `events`.

mod events;
mod info;
mod sms;

use std::cell::RefCell;
use std::ffi::c_int;
use std::fmt;
use std::sync::Arc;

use gammu_sys::GSM_StateMachine;

use crate::callback::{self, CallbackTable, EventKind, Listener, MachineId};
use crate::capabilities::Capabilities;
use crate::config::{self, Config, NativeConfig};
use crate::context::Library;
use crate::debug::DebugInfo;
use crate::error::{Error, ErrorCode, Result};
use crate::ffi::OwnedHandle;
use crate::types::ConnectionType;

/// Number of configuration slots a state machine has.
pub const MAX_CONFIGS: usize = 6;

fn slot_exhausted() -> Error {
    Error::binding(ErrorCode::ConfigSlotExhausted)
}

/// One phone connection.
///
/// Owns the native state machine and every callback registered on it.
/// Operations take `&self` but the type is not `Sync`: one owner drives it,
/// so at most one command is in flight. Dropping it closes it.
pub struct StateMachine {
    lib: Arc<Library>,
    handle: OwnedHandle<GSM_StateMachine>,
    callbacks: CallbackTable,
    configs: RefCell<Vec<NativeConfig>>,
}

impl StateMachine {
    pub(crate) fn new(lib: &Arc<Library>) -> Result<Self> {
        let raw = lib.backend.alloc_state_machine();
        if raw.is_null() {
            return Err(Error::OutOfMemory);
        }
        let callbacks = CallbackTable::new();
        tracing::debug!(machine = %callbacks.id(), "state machine allocated");
        Ok(Self {
            lib: Arc::clone(lib),
            handle: OwnedHandle::new(raw, &lib.backend)?,
            callbacks,
            configs: RefCell::new(Vec::new()),
        })
    }

    #[inline]
    fn ptr(&self) -> Result<*mut GSM_StateMachine> {
        self.handle.as_ptr()
    }

    /// Identifier passed to this machine's event listeners.
    #[must_use]
    pub fn id(&self) -> MachineId {
        self.callbacks.id()
    }

    /// Capability set of the owning context.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.lib.capabilities()
    }

    /// Whether [`close`](Self::close) has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.handle.is_released()
    }

    /// This machine's own debug sink. It stops working when the machine is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`Error::Released`] after close.
    pub fn debug_info(&self) -> Result<DebugInfo<'_>> {
        let sm = self.ptr()?;
        let di = unsafe { self.lib.backend.state_machine_debug(sm) };
        DebugInfo::machine(&self.lib, &self.handle, di)
    }

    // Configuration stack

    /// Number of configuration slots in use.
    ///
    /// # Errors
    ///
    /// [`Error::Released`] after close.
    pub fn config_count(&self) -> Result<usize> {
        let sm = self.ptr()?;
        let n = unsafe { self.lib.backend.config_num(sm) };
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Append `config` to the slots tried by
    /// [`init_connection`](Self::init_connection). The strings it references
    /// are kept alive until the slot is removed or the machine is closed.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::ConfigSlotExhausted`] when all [`MAX_CONFIGS`] slots are
    /// used; marshalling errors leave the stack unchanged.
    pub fn push_config(&self, config: &Config) -> Result<()> {
        let sm = self.ptr()?;
        let native = self.lib.marshalled(config.to_native(self.lib.capabilities())?)?;
        let count = self.config_count()?;
        if count >= MAX_CONFIGS {
            return Err(slot_exhausted());
        }
        let index = slot_index(count)?;
        let backend = &self.lib.backend;
        let slot = unsafe { backend.config(sm, index) };
        if slot.is_null() {
            return Err(slot_exhausted());
        }
        unsafe {
            slot.write(*native.raw());
            backend.set_config_num(sm, index + 1);
        }
        self.configs.borrow_mut().push(native);
        tracing::debug!(
            machine = %self.id(),
            slot = count,
            device = %config.device,
            "config pushed"
        );
        Ok(())
    }

    /// Read back slot `n`.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::ConfigSlotExhausted`] if `n` is not in use.
    pub fn config(&self, n: usize) -> Result<Config> {
        let sm = self.ptr()?;
        if n >= self.config_count()? {
            return Err(slot_exhausted());
        }
        let slot = unsafe { self.lib.backend.config(sm, slot_index(n)?) };
        if slot.is_null() {
            return Err(slot_exhausted());
        }
        unsafe { Config::from_native(&*slot, self.lib.capabilities()) }
    }

    /// Pop the last slot and return what it held.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::ConfigSlotExhausted`] if no slot is in use.
    pub fn remove_config(&self) -> Result<Config> {
        let sm = self.ptr()?;
        let count = self.config_count()?;
        let Some(last) = count.checked_sub(1) else {
            return Err(slot_exhausted());
        };
        let index = slot_index(last)?;
        let backend = &self.lib.backend;
        let slot = unsafe { backend.config(sm, index) };
        if slot.is_null() {
            return Err(slot_exhausted());
        }
        let config = unsafe { Config::from_native(&*slot, self.lib.capabilities()) }?;
        unsafe {
            config::detach_strings(&mut *slot);
            backend.set_config_num(sm, index);
        }
        self.configs.borrow_mut().pop();
        tracing::debug!(machine = %self.id(), slot = last, "config removed");
        Ok(config)
    }

    // Connection

    /// Connect using the configured slots, trying each in turn. Library log
    /// output goes to `tracing` at trace level under the `gammu::native`
    /// target.
    ///
    /// # Errors
    ///
    /// The native status of the last slot tried.
    pub fn init_connection(&self, replies: i32) -> Result<()> {
        let sm = self.ptr()?;
        let rc = unsafe {
            self.lib.backend.init_connection(
                sm,
                replies,
                Some(callback::log_trampoline),
                self.callbacks.user_data(),
            )
        };
        self.lib.check(rc)?;
        self.callbacks.set_installed(EventKind::Log, true);
        tracing::debug!(machine = %self.id(), "connected");
        self.resume_events(sm);
        Ok(())
    }

    /// Like [`init_connection`](Self::init_connection), with library log
    /// lines passed to `log` until
    /// [`terminate_connection`](Self::terminate_connection).
    ///
    /// # Errors
    ///
    /// As [`init_connection`](Self::init_connection); `log` is dropped.
    pub fn init_connection_with_log<F>(&self, replies: i32, log: F) -> Result<()>
    where
        F: Fn(MachineId, &str) + Send + Sync + 'static,
    {
        drop(self.callbacks.replace(Listener::Log(Arc::new(log))));
        let result = self.init_connection(replies);
        if result.is_err() {
            drop(self.callbacks.take(EventKind::Log));
        }
        result
    }

    /// Disconnect. Incoming SMS and call listeners stay registered and are
    /// re-enabled by the next successful connect; the log listener is
    /// dropped.
    ///
    /// # Errors
    ///
    /// The native status, e.g. `NotConnected`.
    pub fn terminate_connection(&self) -> Result<()> {
        let sm = self.ptr()?;
        let rc = unsafe { self.lib.backend.terminate_connection(sm) };
        self.callbacks.set_installed(EventKind::Log, false);
        drop(self.callbacks.take(EventKind::Log));
        self.lib.check(rc)?;
        tracing::debug!(machine = %self.id(), "disconnected");
        Ok(())
    }

    /// Whether a connection is up. Always `false` after close.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.ptr()
            .is_ok_and(|sm| unsafe { self.lib.backend.is_connected(sm) })
    }

    /// Connection type of the current connection.
    ///
    /// # Errors
    ///
    /// `NotConnected` when disconnected.
    pub fn used_connection(&self) -> Result<ConnectionType> {
        let sm = self.ptr()?;
        if !self.is_connected() {
            return Err(self.lib.not_connected());
        }
        ConnectionType::require(unsafe { self.lib.backend.used_connection(sm) })
    }

    /// Process pending input from the phone, running any event listeners.
    /// Blocks up to the library timeout when `wait_for_reply` is set.
    /// Returns the amount of data the library processed.
    ///
    /// # Errors
    ///
    /// `NotConnected` when disconnected; the library is not called.
    pub fn read_device(&self, wait_for_reply: bool) -> Result<usize> {
        let sm = self.ptr()?;
        if !self.is_connected() {
            return Err(self.lib.not_connected());
        }
        let n = unsafe { self.lib.backend.read_device(sm, wait_for_reply) };
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Tear down every registration, disconnect and free the native state
    /// machine. Idempotent; later calls return `Ok(())`.
    ///
    /// # Errors
    ///
    /// The status of the implicit disconnect. The machine is freed anyway.
    pub fn close(&self) -> Result<()> {
        let mut outcome = Ok(());
        if self.handle.release_with(|sm| outcome = self.teardown(sm)) {
            tracing::debug!(machine = %self.id(), "state machine closed");
        }
        outcome
    }

    fn teardown(&self, sm: *mut GSM_StateMachine) -> Result<()> {
        let backend = &self.lib.backend;
        let connected = unsafe { backend.is_connected(sm) };
        for kind in [EventKind::IncomingSms, EventKind::IncomingCall] {
            if self.callbacks.set_installed(kind, false) {
                let disabled = if connected {
                    self.lib.check(unsafe { self.set_delivery(sm, kind, false) })
                } else {
                    Ok(())
                };
                if let Err(err) = disabled {
                    tracing::debug!(
                        machine = %self.id(),
                        ?kind,
                        %err,
                        "could not disable notifications"
                    );
                }
                unsafe { self.set_native_callback(sm, kind, false) };
            }
            drop(self.callbacks.take(kind));
        }

        let disconnected = if connected {
            self.lib.check(unsafe { backend.terminate_connection(sm) })
        } else {
            Ok(())
        };
        self.callbacks.set_installed(EventKind::Log, false);
        drop(self.callbacks.take(EventKind::Log));

        let mut configs = self.configs.borrow_mut();
        for n in 0..configs.len() {
            let Ok(index) = slot_index(n) else { break };
            let slot = unsafe { backend.config(sm, index) };
            if !slot.is_null() {
                config::detach_strings(unsafe { &mut *slot });
            }
        }
        configs.clear();
        disconnected
    }
}

fn slot_index(n: usize) -> Result<c_int> {
    c_int::try_from(n).map_err(|_| slot_exhausted())
}

impl Drop for StateMachine {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(machine = %self.id(), %err, "error while closing state machine");
        }
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id())
            .field("handle", &self.handle)
            .field("callbacks", &self.callbacks)
            .field("configs", &self.configs.borrow().len())
            .finish_non_exhaustive()
    }
}
