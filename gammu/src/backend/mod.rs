#![allow(unsafe_code)]
//! The seam between the safe API and libGammu.
//!
//! Every native call the crate makes goes through [`Backend`]. The
//! [`NativeBackend`] forwards to `gammu-sys` (feature `native`);
//! [`DummyBackend`] is an in-process phone used by the tests and by
//! `gammu-rs --backend dummy`.

use std::ffi::{CStr, c_char, c_int, c_void};
use std::fmt;

use gammu_sys::{
    GSM_BatteryCharge, GSM_Config, GSM_ConnectionType, GSM_DateTime, GSM_Debug_Info,
    GSM_Error, GSM_Log_Function, GSM_MultiPartSMSInfo, GSM_MultiSMSMessage, GSM_NetworkInfo,
    GSM_PhoneModel, GSM_SMSFolders, GSM_SMSMemoryStatus, GSM_SMSMessage, GSM_SecurityCode,
    GSM_SecurityCodeType, GSM_SignalQuality, GSM_StateMachine, INI_Section, IncomingCallCallback,
    IncomingSMSCallback,
};

mod dummy;
#[cfg(feature = "native")]
mod native;

pub use dummy::{DummyBackend, INBOX_FOLDER, OUTBOX_FOLDER};
#[cfg(feature = "native")]
pub use native::NativeBackend;

/// Size of the version buffer `GSM_GetFirmware` writes.
pub const FIRMWARE_VERSION_LEN: usize = gammu_sys::GSM_MAX_VERSION_LENGTH as usize + 1;
/// Size of the date buffer `GSM_GetFirmware` writes.
pub const FIRMWARE_DATE_LEN: usize = gammu_sys::GSM_MAX_VERSION_DATE_LENGTH as usize + 1;

/// Which single-string phone query to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneString {
    /// `GSM_GetHardware`.
    Hardware,
    /// `GSM_GetIMEI`.
    Imei,
    /// `GSM_GetManufactureMonth`.
    ManufactureMonth,
    /// `GSM_GetManufacturer`.
    Manufacturer,
    /// `GSM_GetModel`.
    Model,
    /// `GSM_GetProductCode`.
    ProductCode,
}

impl PhoneString {
    /// Bytes the caller must provide for the result, terminator included.
    #[must_use]
    pub const fn buffer_len(self) -> usize {
        match self {
            Self::Imei => gammu_sys::GSM_MAX_IMEI_LENGTH as usize + 1,
            Self::Manufacturer => gammu_sys::GSM_MAX_MANUFACTURER_LENGTH as usize + 1,
            Self::Model => gammu_sys::GSM_MAX_MODEL_LENGTH as usize + 1,
            Self::Hardware | Self::ManufactureMonth | Self::ProductCode => {
                gammu_sys::BUFFER_LENGTH as usize
            }
        }
    }
}

/// The libGammu call surface used by this crate.
///
/// Methods mirror the C functions one to one; pointer arguments follow the
/// C contracts. Status-returning methods hand back the raw `GSM_Error`,
/// which the caller translates.
///
/// # Safety
///
/// Unsafe methods require pointers obtained from the same backend (or
/// valid, writable buffers of the documented size) that have not been
/// freed.
#[allow(clippy::missing_safety_doc)]
pub trait Backend: Send + Sync + fmt::Debug + 'static {
    /// `GetGammuVersion`.
    fn version(&self) -> String;
    /// `GSM_InitLocales`.
    fn init_locales(&self, path: Option<&CStr>);
    /// `GSM_ErrorString`. `None` when the library has no text.
    fn error_string(&self, code: GSM_Error) -> Option<String>;

    /// `GSM_GetGlobalDebug`.
    fn global_debug(&self) -> *mut GSM_Debug_Info;
    /// `GSM_GetDebug`.
    unsafe fn state_machine_debug(&self, sm: *mut GSM_StateMachine) -> *mut GSM_Debug_Info;
    /// `GSM_SetDebugGlobal`.
    unsafe fn set_debug_global(&self, di: *mut GSM_Debug_Info, enable: bool);
    /// `GSM_SetDebugFile`; `None` closes the current file.
    unsafe fn set_debug_file(&self, di: *mut GSM_Debug_Info, path: Option<&CStr>) -> GSM_Error;
    /// `GSM_SetDebugLevel`. `false` for an unknown level name.
    unsafe fn set_debug_level(&self, di: *mut GSM_Debug_Info, level: &CStr) -> bool;

    /// `INI_ReadFile`.
    fn ini_read_file(&self, path: &CStr, unicode: bool, out: &mut *mut INI_Section) -> GSM_Error;
    /// `INI_GetValue`. Section and key are encoded the way the file was
    /// read (UCS-2 when `unicode`). The result borrows from `ini`.
    unsafe fn ini_get_value(
        &self,
        ini: *mut INI_Section,
        section: *const u8,
        key: *const u8,
        unicode: bool,
    ) -> *const u8;
    /// `INI_Free`.
    unsafe fn ini_free(&self, ini: *mut INI_Section);
    /// `GSM_FindGammuRC`.
    fn find_gammurc(&self, force: Option<&CStr>, out: &mut *mut INI_Section) -> GSM_Error;
    /// `GSM_ReadConfig`.
    unsafe fn read_config(
        &self,
        ini: *mut INI_Section,
        cfg: *mut GSM_Config,
        num: c_int,
    ) -> GSM_Error;

    /// `GSM_AllocStateMachine`. Null on allocation failure.
    fn alloc_state_machine(&self) -> *mut GSM_StateMachine;
    /// `GSM_FreeStateMachine`.
    unsafe fn free_state_machine(&self, sm: *mut GSM_StateMachine);
    /// `GSM_GetConfig`. Null for an index past the last slot.
    unsafe fn config(&self, sm: *mut GSM_StateMachine, num: c_int) -> *mut GSM_Config;
    /// `GSM_GetConfigNum`.
    unsafe fn config_num(&self, sm: *mut GSM_StateMachine) -> c_int;
    /// `GSM_SetConfigNum`.
    unsafe fn set_config_num(&self, sm: *mut GSM_StateMachine, sections: c_int);

    /// `GSM_InitConnection_Log`, or `GSM_InitConnection` when `log` is `None`.
    unsafe fn init_connection(
        &self,
        sm: *mut GSM_StateMachine,
        replies: c_int,
        log: GSM_Log_Function,
        user_data: *mut c_void,
    ) -> GSM_Error;
    /// `GSM_TerminateConnection`.
    unsafe fn terminate_connection(&self, sm: *mut GSM_StateMachine) -> GSM_Error;
    /// `GSM_IsConnected`.
    unsafe fn is_connected(&self, sm: *mut GSM_StateMachine) -> bool;
    /// `GSM_GetUsedConnection`.
    unsafe fn used_connection(&self, sm: *mut GSM_StateMachine) -> GSM_ConnectionType;
    /// `GSM_ReadDevice`. Returns a byte count, not a status.
    unsafe fn read_device(&self, sm: *mut GSM_StateMachine, wait_for_reply: bool) -> c_int;

    /// `GSM_EnterSecurityCode`.
    unsafe fn enter_security_code(
        &self,
        sm: *mut GSM_StateMachine,
        code: *mut GSM_SecurityCode,
    ) -> GSM_Error;
    /// `GSM_GetSecurityStatus`.
    unsafe fn security_status(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SecurityCodeType,
    ) -> GSM_Error;

    /// `GSM_GetBatteryCharge`.
    unsafe fn battery_charge(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_BatteryCharge,
    ) -> GSM_Error;
    /// `GSM_GetFirmware`. `value` holds [`FIRMWARE_VERSION_LEN`] bytes,
    /// `date` [`FIRMWARE_DATE_LEN`].
    unsafe fn firmware(
        &self,
        sm: *mut GSM_StateMachine,
        value: *mut c_char,
        date: *mut c_char,
        num: *mut f64,
    ) -> GSM_Error;
    /// One of the single-string queries; `out` holds
    /// [`PhoneString::buffer_len`] bytes.
    unsafe fn phone_string(
        &self,
        sm: *mut GSM_StateMachine,
        which: PhoneString,
        out: *mut c_char,
    ) -> GSM_Error;
    /// `GSM_GetModelInfo`. Borrowed from the state machine.
    unsafe fn model_info(&self, sm: *mut GSM_StateMachine) -> *mut GSM_PhoneModel;
    /// `GSM_GetNetworkInfo`.
    unsafe fn network_info(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_NetworkInfo,
    ) -> GSM_Error;
    /// `GSM_GetSignalQuality`.
    unsafe fn signal_quality(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SignalQuality,
    ) -> GSM_Error;

    /// `GSM_GetNetworkName`, decoded.
    fn network_name(&self, code: &CStr) -> Option<String>;
    /// `GSM_GetCountryName`, decoded.
    fn country_name(&self, code: &CStr) -> Option<String>;
    /// `CheckDate`.
    fn check_date(&self, dt: &GSM_DateTime) -> bool;
    /// `CheckTime`.
    fn check_time(&self, dt: &GSM_DateTime) -> bool;
    /// `OSDate`.
    fn os_date(&self, dt: &GSM_DateTime) -> Option<String>;
    /// `OSDateTime`.
    fn os_date_time(&self, dt: &GSM_DateTime, timezone: bool) -> Option<String>;

    /// `GSM_GetSMS`. Location and folder are read from `SMS[0]`.
    unsafe fn get_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_MultiSMSMessage) -> GSM_Error;
    /// `GSM_GetNextSMS`.
    unsafe fn get_next_sms(
        &self,
        sm: *mut GSM_StateMachine,
        sms: *mut GSM_MultiSMSMessage,
        start: bool,
    ) -> GSM_Error;
    /// `GSM_SetSMS`.
    unsafe fn set_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error;
    /// `GSM_AddSMS`. Writes the assigned folder and location back.
    unsafe fn add_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error;
    /// `GSM_DeleteSMS`.
    unsafe fn delete_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error;
    /// `GSM_GetSMSFolders`.
    unsafe fn sms_folders(&self, sm: *mut GSM_StateMachine, out: *mut GSM_SMSFolders) -> GSM_Error;
    /// `GSM_GetSMSStatus`.
    unsafe fn sms_status(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SMSMemoryStatus,
    ) -> GSM_Error;
    /// `GSM_SetDefaultSMSData`.
    unsafe fn set_default_sms_data(&self, sms: *mut GSM_SMSMessage);

    /// `GSM_DecodeMultiPartSMS`. On `false` the info may still hold
    /// allocations and must be freed.
    unsafe fn decode_multipart_sms(
        &self,
        di: *mut GSM_Debug_Info,
        info: *mut GSM_MultiPartSMSInfo,
        sms: *mut GSM_MultiSMSMessage,
        ems: bool,
    ) -> bool;
    /// `GSM_FreeMultiPartSMSInfo`.
    unsafe fn free_multipart_sms_info(&self, info: *mut GSM_MultiPartSMSInfo);

    /// `GSM_SetIncomingSMS`.
    unsafe fn set_incoming_sms(&self, sm: *mut GSM_StateMachine, enable: bool) -> GSM_Error;
    /// `GSM_SetIncomingCall`.
    unsafe fn set_incoming_call(&self, sm: *mut GSM_StateMachine, enable: bool) -> GSM_Error;
    /// `GSM_SetIncomingSMSCallback`.
    unsafe fn set_incoming_sms_callback(
        &self,
        sm: *mut GSM_StateMachine,
        callback: IncomingSMSCallback,
        user_data: *mut c_void,
    );
    /// `GSM_SetIncomingCallCallback`.
    unsafe fn set_incoming_call_callback(
        &self,
        sm: *mut GSM_StateMachine,
        callback: IncomingCallCallback,
        user_data: *mut c_void,
    );
}
