#![allow(unsafe_code)]
//! Incoming SMS and call notifications.

use std::sync::Arc;

use gammu_sys::{GSM_Error, GSM_StateMachine, IncomingCallCallback, IncomingSMSCallback};

use super::StateMachine;
use crate::call::Call;
use crate::callback::{EventKind, Listener, MachineId, call_trampoline, sms_trampoline};
use crate::error::Result;
use crate::sms::SmsMessage;

impl StateMachine {
    /// Run `f` for every SMS the phone reports. Replaces any previous
    /// listener; the previous one gets no events once this returns.
    ///
    /// Listeners run on the thread calling [`read_device`](Self::read_device)
    /// or whichever operation made the library read from the phone. A
    /// panicking listener is logged and the event dropped.
    ///
    /// # Errors
    ///
    /// The native status of enabling notifications (e.g. `NotConnected`,
    /// `NotSupported`). The previous listener is then kept.
    pub fn on_incoming_sms<F>(&self, f: F) -> Result<()>
    where
        F: Fn(MachineId, &SmsMessage) + Send + Sync + 'static,
    {
        self.register(Listener::Sms(Arc::new(f)))
    }

    /// Run `f` for every call event. Same rules as
    /// [`on_incoming_sms`](Self::on_incoming_sms).
    ///
    /// # Errors
    ///
    /// The native status of enabling notifications.
    pub fn on_incoming_call<F>(&self, f: F) -> Result<()>
    where
        F: Fn(MachineId, &Call) + Send + Sync + 'static,
    {
        self.register(Listener::Call(Arc::new(f)))
    }

    /// Stop SMS notifications and drop the listener.
    ///
    /// # Errors
    ///
    /// The native status of disabling notifications. The listener is
    /// dropped regardless.
    pub fn disable_incoming_sms(&self) -> Result<()> {
        self.unregister(EventKind::IncomingSms)
    }

    /// Stop call notifications and drop the listener.
    ///
    /// # Errors
    ///
    /// The native status of disabling notifications. The listener is
    /// dropped regardless.
    pub fn disable_incoming_call(&self) -> Result<()> {
        self.unregister(EventKind::IncomingCall)
    }

    fn register(&self, listener: Listener) -> Result<()> {
        let sm = self.ptr()?;
        let kind = listener.kind();
        let previous = self.callbacks.replace(listener);
        if !self.callbacks.set_installed(kind, true) {
            unsafe { self.set_native_callback(sm, kind, true) };
        }
        match self.lib.check(unsafe { self.set_delivery(sm, kind, true) }) {
            Ok(()) => {
                drop(previous);
                Ok(())
            }
            Err(err) => {
                let had_previous = previous.is_some();
                drop(self.callbacks.restore(kind, previous));
                if !had_previous {
                    self.callbacks.set_installed(kind, false);
                    unsafe { self.set_native_callback(sm, kind, false) };
                }
                tracing::debug!(machine = %self.id(), ?kind, %err, "listener rolled back");
                Err(err)
            }
        }
    }

    fn unregister(&self, kind: EventKind) -> Result<()> {
        let sm = self.ptr()?;
        let mut result = Ok(());
        if self.callbacks.set_installed(kind, false) {
            if self.is_connected() {
                result = self.lib.check(unsafe { self.set_delivery(sm, kind, false) });
            }
            unsafe { self.set_native_callback(sm, kind, false) };
        }
        drop(self.callbacks.take(kind));
        result
    }

    /// Re-enable delivery for listeners that survived a reconnect.
    pub(super) fn resume_events(&self, sm: *mut GSM_StateMachine) {
        for kind in [EventKind::IncomingSms, EventKind::IncomingCall] {
            if !self.callbacks.is_registered(kind) || !self.callbacks.is_installed(kind) {
                continue;
            }
            if let Err(err) = self.lib.check(unsafe { self.set_delivery(sm, kind, true) }) {
                tracing::warn!(
                    machine = %self.id(),
                    ?kind,
                    %err,
                    "could not re-enable notifications"
                );
            }
        }
    }

    /// `GSM_SetIncomingSMS` / `GSM_SetIncomingCall`.
    pub(super) unsafe fn set_delivery(
        &self,
        sm: *mut GSM_StateMachine,
        kind: EventKind,
        enable: bool,
    ) -> GSM_Error {
        let backend = &self.lib.backend;
        match kind {
            EventKind::IncomingSms => unsafe { backend.set_incoming_sms(sm, enable) },
            EventKind::IncomingCall => unsafe { backend.set_incoming_call(sm, enable) },
            EventKind::Log => gammu_sys::ERR_NONE,
        }
    }

    /// Install or null the trampoline for `kind`.
    pub(super) unsafe fn set_native_callback(
        &self,
        sm: *mut GSM_StateMachine,
        kind: EventKind,
        install: bool,
    ) {
        let backend = &self.lib.backend;
        let user_data = if install {
            self.callbacks.user_data()
        } else {
            std::ptr::null_mut()
        };
        match kind {
            EventKind::IncomingSms => {
                let callback: IncomingSMSCallback = if install {
                    Some(sms_trampoline)
                } else {
                    None
                };
                unsafe { backend.set_incoming_sms_callback(sm, callback, user_data) };
            }
            EventKind::IncomingCall => {
                let callback: IncomingCallCallback = if install {
                    Some(call_trampoline)
                } else {
                    None
                };
                unsafe { backend.set_incoming_call_callback(sm, callback, user_data) };
            }
            EventKind::Log => {}
        }
    }
}
