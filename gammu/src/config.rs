#![allow(unsafe_code)]
//! Phone connection configuration (`GSM_Config`).

use std::ffi::CString;
use std::ptr;

use gammu_sys::GSM_Config;

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::ffi::{borrowed_c_string, to_c_string};
use crate::marshal::{Marshalled, Writer, from_gboolean, read_c_str, to_gboolean};

/// One configuration section, as found in a gammurc `[gammu]` /
/// `[gammuN]` group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Forced phone model; empty for autodetection.
    pub model: String,
    /// Debug level name, e.g. `"textall"`.
    pub debug_level: String,
    /// Device path or address, e.g. `"/dev/ttyUSB0"`.
    pub device: String,
    /// Connection type name, e.g. `"at"`.
    pub connection: String,
    /// Set the phone clock on connect.
    pub sync_time: bool,
    /// Lock the device while in use.
    pub lock_device: bool,
    /// Debug log path; empty for none.
    pub debug_file: String,
    /// Show "connected" info on the phone display.
    pub start_info: bool,
    /// Send debug output to the global debug file.
    pub use_global_debug_file: bool,
    /// Localised label for reminders.
    pub text_reminder: String,
    /// Localised label for meetings.
    pub text_meeting: String,
    /// Localised label for calls.
    pub text_call: String,
    /// Localised label for birthdays.
    pub text_birthday: String,
    /// Localised label for memos.
    pub text_memo: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: String::new(),
            debug_level: String::new(),
            device: String::new(),
            connection: String::new(),
            sync_time: false,
            lock_device: false,
            debug_file: String::new(),
            start_info: false,
            use_global_debug_file: true,
            text_reminder: "Reminder".into(),
            text_meeting: "Meeting".into(),
            text_call: "Call".into(),
            text_birthday: "Birthday".into(),
            text_memo: "Memo".into(),
        }
    }
}

impl Config {
    /// Configuration for `device` using `connection`, defaults elsewhere.
    #[must_use]
    pub fn new(device: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            connection: connection.into(),
            ..Self::default()
        }
    }

    /// Produce the native record. The returned value owns the strings the
    /// native pointers reference.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if the linked library predates boolean config
    /// flags; [`Error::InvalidArgument`] for strings containing NUL.
    pub(crate) fn to_native(&self, caps: Capabilities) -> Result<Marshalled<NativeConfig>> {
        if !caps.boolean_config_flags {
            return Err(Error::Unsupported(
                "configuration layout of libGammu before 1.27.92".into(),
            ));
        }
        let device = to_c_string(&self.device)?;
        let connection = to_c_string(&self.connection)?;
        let debug_file = to_c_string(&self.debug_file)?;

        // SAFETY: GSM_Config is plain data; all-zero is a valid (empty) value.
        let mut raw: GSM_Config = unsafe { std::mem::zeroed() };
        let mut w = Writer::new();
        w.c_str("config.model", &mut raw.Model, &self.model)?;
        w.c_str("config.debug_level", &mut raw.DebugLevel, &self.debug_level)?;
        raw.Device = device.as_ptr().cast_mut();
        raw.Connection = connection.as_ptr().cast_mut();
        raw.SyncTime = to_gboolean(self.sync_time);
        raw.LockDevice = to_gboolean(self.lock_device);
        raw.DebugFile = debug_file.as_ptr().cast_mut();
        raw.StartInfo = to_gboolean(self.start_info);
        raw.UseGlobalDebugFile = to_gboolean(self.use_global_debug_file);
        w.c_str("config.text_reminder", &mut raw.TextReminder, &self.text_reminder)?;
        w.c_str("config.text_meeting", &mut raw.TextMeeting, &self.text_meeting)?;
        w.c_str("config.text_call", &mut raw.TextCall, &self.text_call)?;
        w.c_str("config.text_birthday", &mut raw.TextBirthday, &self.text_birthday)?;
        w.c_str("config.text_memo", &mut raw.TextMemo, &self.text_memo)?;

        Ok(w.finish(NativeConfig {
            raw,
            _strings: [device, connection, debug_file],
        }))
    }

    /// Read a native record.
    ///
    /// # Safety
    ///
    /// The string pointers in `raw` must be null or valid C strings.
    pub(crate) unsafe fn from_native(raw: &GSM_Config, caps: Capabilities) -> Result<Self> {
        if !caps.boolean_config_flags {
            return Err(Error::Unsupported(
                "configuration layout of libGammu before 1.27.92".into(),
            ));
        }
        let owned = |p: *mut std::ffi::c_char| -> Result<String> {
            Ok(unsafe { borrowed_c_string(p) }?.unwrap_or_default())
        };
        Ok(Self {
            model: read_c_str(&raw.Model)?,
            debug_level: read_c_str(&raw.DebugLevel)?,
            device: owned(raw.Device)?,
            connection: owned(raw.Connection)?,
            sync_time: from_gboolean(raw.SyncTime),
            lock_device: from_gboolean(raw.LockDevice),
            debug_file: owned(raw.DebugFile)?,
            start_info: from_gboolean(raw.StartInfo),
            use_global_debug_file: from_gboolean(raw.UseGlobalDebugFile),
            text_reminder: read_c_str(&raw.TextReminder)?,
            text_meeting: read_c_str(&raw.TextMeeting)?,
            text_call: read_c_str(&raw.TextCall)?,
            text_birthday: read_c_str(&raw.TextBirthday)?,
            text_memo: read_c_str(&raw.TextMemo)?,
        })
    }
}

/// A `GSM_Config` together with the strings its pointers borrow.
#[derive(Debug)]
pub(crate) struct NativeConfig {
    raw: GSM_Config,
    _strings: [CString; 3],
}

// SAFETY: the raw pointers only reference the owned CStrings.
unsafe impl Send for NativeConfig {}

impl NativeConfig {
    pub(crate) const fn raw(&self) -> &GSM_Config {
        &self.raw
    }
}

/// Clear the pointer fields of a slot whose strings are owned elsewhere, so
/// the native free never sees them.
pub(crate) fn detach_strings(slot: &mut GSM_Config) {
    slot.Device = ptr::null_mut();
    slot.Connection = ptr::null_mut();
    slot.DebugFile = ptr::null_mut();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::LibraryVersion;

    fn sample() -> Config {
        Config {
            model: "at".into(),
            debug_level: "textall".into(),
            sync_time: true,
            debug_file: "/tmp/gammu.log".into(),
            ..Config::new("/dev/ttyUSB0", "at115200")
        }
    }

    #[test]
    fn round_trip() {
        let caps = Capabilities::current();
        let native = sample().to_native(caps).unwrap().exact().unwrap();
        let back = unsafe { Config::from_native(native.raw(), caps) }.unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn long_model_is_reported() {
        let cfg = Config {
            model: "m".repeat(80),
            ..sample()
        };
        let m = cfg.to_native(Capabilities::current()).unwrap();
        assert_eq!(m.truncations[0].field, "config.model");
        assert_eq!(m.truncations[0].capacity, 49);
        assert!(matches!(m.exact(), Err(Error::Truncated(_))));
    }

    #[test]
    fn old_layout_is_refused() {
        let caps = Capabilities::for_version(LibraryVersion::new(1, 24, 0));
        assert!(matches!(sample().to_native(caps), Err(Error::Unsupported(_))));
    }

    #[test]
    fn detached_slot_has_no_pointers() {
        let native = sample().to_native(Capabilities::current()).unwrap().value;
        let mut raw = *native.raw();
        detach_strings(&mut raw);
        assert!(raw.Device.is_null() && raw.Connection.is_null() && raw.DebugFile.is_null());
    }
}
