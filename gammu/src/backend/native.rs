#![allow(unsafe_code)]
//! [`Backend`] over the linked libGammu.

use std::ffi::{CStr, c_char, c_int, c_void};
use std::ptr;

use gammu_sys as sys;
use sys::{
    GSM_BatteryCharge, GSM_Config, GSM_ConnectionType, GSM_DateTime, GSM_Debug_Info, GSM_Error,
    GSM_Log_Function, GSM_MultiPartSMSInfo, GSM_MultiSMSMessage, GSM_NetworkInfo, GSM_PhoneModel,
    GSM_SMSFolders, GSM_SMSMemoryStatus, GSM_SMSMessage, GSM_SecurityCode, GSM_SecurityCodeType,
    GSM_SignalQuality, GSM_StateMachine, INI_Section, IncomingCallCallback, IncomingSMSCallback,
};

use super::{Backend, PhoneString};
use crate::ffi::{borrowed_c_string, borrowed_ucs2_string};
use crate::marshal::{from_gboolean, to_gboolean};

/// Forwards every call to the system libGammu.
///
/// libGammu keeps process-wide state (locales, the global debug sink), so
/// [`Gammu::native`](crate::Gammu::native) shares one instance per process.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

fn opt_ptr(s: Option<&CStr>) -> *const c_char {
    s.map_or(ptr::null(), CStr::as_ptr)
}

impl Backend for NativeBackend {
    fn version(&self) -> String {
        unsafe { borrowed_c_string(sys::GetGammuVersion()) }
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn init_locales(&self, path: Option<&CStr>) {
        unsafe { sys::GSM_InitLocales(opt_ptr(path)) };
    }

    fn error_string(&self, code: GSM_Error) -> Option<String> {
        unsafe { borrowed_c_string(sys::GSM_ErrorString(code)) }.ok().flatten()
    }

    fn global_debug(&self) -> *mut GSM_Debug_Info {
        unsafe { sys::GSM_GetGlobalDebug() }
    }

    unsafe fn state_machine_debug(&self, sm: *mut GSM_StateMachine) -> *mut GSM_Debug_Info {
        unsafe { sys::GSM_GetDebug(sm) }
    }

    unsafe fn set_debug_global(&self, di: *mut GSM_Debug_Info, enable: bool) {
        unsafe { sys::GSM_SetDebugGlobal(to_gboolean(enable), di) };
    }

    unsafe fn set_debug_file(&self, di: *mut GSM_Debug_Info, path: Option<&CStr>) -> GSM_Error {
        unsafe { sys::GSM_SetDebugFile(opt_ptr(path), di) }
    }

    unsafe fn set_debug_level(&self, di: *mut GSM_Debug_Info, level: &CStr) -> bool {
        from_gboolean(unsafe { sys::GSM_SetDebugLevel(level.as_ptr(), di) })
    }

    fn ini_read_file(&self, path: &CStr, unicode: bool, out: &mut *mut INI_Section) -> GSM_Error {
        unsafe { sys::INI_ReadFile(path.as_ptr(), to_gboolean(unicode), out) }
    }

    unsafe fn ini_get_value(
        &self,
        ini: *mut INI_Section,
        section: *const u8,
        key: *const u8,
        unicode: bool,
    ) -> *const u8 {
        unsafe { sys::INI_GetValue(ini, section, key, to_gboolean(unicode)) }.cast_const()
    }

    unsafe fn ini_free(&self, ini: *mut INI_Section) {
        unsafe { sys::INI_Free(ini) };
    }

    fn find_gammurc(&self, force: Option<&CStr>, out: &mut *mut INI_Section) -> GSM_Error {
        unsafe { sys::GSM_FindGammuRC(out, opt_ptr(force)) }
    }

    unsafe fn read_config(
        &self,
        ini: *mut INI_Section,
        cfg: *mut GSM_Config,
        num: c_int,
    ) -> GSM_Error {
        unsafe { sys::GSM_ReadConfig(ini, cfg, num) }
    }

    fn alloc_state_machine(&self) -> *mut GSM_StateMachine {
        unsafe { sys::GSM_AllocStateMachine() }
    }

    unsafe fn free_state_machine(&self, sm: *mut GSM_StateMachine) {
        unsafe { sys::GSM_FreeStateMachine(sm) };
    }

    unsafe fn config(&self, sm: *mut GSM_StateMachine, num: c_int) -> *mut GSM_Config {
        unsafe { sys::GSM_GetConfig(sm, num) }
    }

    unsafe fn config_num(&self, sm: *mut GSM_StateMachine) -> c_int {
        unsafe { sys::GSM_GetConfigNum(sm) }
    }

    unsafe fn set_config_num(&self, sm: *mut GSM_StateMachine, sections: c_int) {
        unsafe { sys::GSM_SetConfigNum(sm, sections) };
    }

    unsafe fn init_connection(
        &self,
        sm: *mut GSM_StateMachine,
        replies: c_int,
        log: GSM_Log_Function,
        user_data: *mut c_void,
    ) -> GSM_Error {
        if log.is_some() {
            unsafe { sys::GSM_InitConnection_Log(sm, replies, log, user_data) }
        } else {
            unsafe { sys::GSM_InitConnection(sm, replies) }
        }
    }

    unsafe fn terminate_connection(&self, sm: *mut GSM_StateMachine) -> GSM_Error {
        unsafe { sys::GSM_TerminateConnection(sm) }
    }

    unsafe fn is_connected(&self, sm: *mut GSM_StateMachine) -> bool {
        from_gboolean(unsafe { sys::GSM_IsConnected(sm) })
    }

    unsafe fn used_connection(&self, sm: *mut GSM_StateMachine) -> GSM_ConnectionType {
        unsafe { sys::GSM_GetUsedConnection(sm) }
    }

    unsafe fn read_device(&self, sm: *mut GSM_StateMachine, wait_for_reply: bool) -> c_int {
        unsafe { sys::GSM_ReadDevice(sm, to_gboolean(wait_for_reply)) }
    }

    unsafe fn enter_security_code(
        &self,
        sm: *mut GSM_StateMachine,
        code: *mut GSM_SecurityCode,
    ) -> GSM_Error {
        unsafe { sys::GSM_EnterSecurityCode(sm, code) }
    }

    unsafe fn security_status(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SecurityCodeType,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetSecurityStatus(sm, out) }
    }

    unsafe fn battery_charge(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_BatteryCharge,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetBatteryCharge(sm, out) }
    }

    unsafe fn firmware(
        &self,
        sm: *mut GSM_StateMachine,
        value: *mut c_char,
        date: *mut c_char,
        num: *mut f64,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetFirmware(sm, value, date, num) }
    }

    unsafe fn phone_string(
        &self,
        sm: *mut GSM_StateMachine,
        which: PhoneString,
        out: *mut c_char,
    ) -> GSM_Error {
        unsafe {
            match which {
                PhoneString::Hardware => sys::GSM_GetHardware(sm, out),
                PhoneString::Imei => sys::GSM_GetIMEI(sm, out),
                PhoneString::ManufactureMonth => sys::GSM_GetManufactureMonth(sm, out),
                PhoneString::Manufacturer => sys::GSM_GetManufacturer(sm, out),
                PhoneString::Model => sys::GSM_GetModel(sm, out),
                PhoneString::ProductCode => sys::GSM_GetProductCode(sm, out),
            }
        }
    }

    unsafe fn model_info(&self, sm: *mut GSM_StateMachine) -> *mut GSM_PhoneModel {
        unsafe { sys::GSM_GetModelInfo(sm) }
    }

    unsafe fn network_info(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_NetworkInfo,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetNetworkInfo(sm, out) }
    }

    unsafe fn signal_quality(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SignalQuality,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetSignalQuality(sm, out) }
    }

    fn network_name(&self, code: &CStr) -> Option<String> {
        unsafe { borrowed_ucs2_string(sys::GSM_GetNetworkName(code.as_ptr())) }
    }

    fn country_name(&self, code: &CStr) -> Option<String> {
        unsafe { borrowed_ucs2_string(sys::GSM_GetCountryName(code.as_ptr())) }
    }

    fn check_date(&self, dt: &GSM_DateTime) -> bool {
        let mut copy = *dt;
        from_gboolean(unsafe { sys::CheckDate(&raw mut copy) })
    }

    fn check_time(&self, dt: &GSM_DateTime) -> bool {
        let mut copy = *dt;
        from_gboolean(unsafe { sys::CheckTime(&raw mut copy) })
    }

    fn os_date(&self, dt: &GSM_DateTime) -> Option<String> {
        unsafe { borrowed_c_string(sys::OSDate(*dt)) }.ok().flatten()
    }

    fn os_date_time(&self, dt: &GSM_DateTime, timezone: bool) -> Option<String> {
        unsafe { borrowed_c_string(sys::OSDateTime(*dt, to_gboolean(timezone))) }
            .ok()
            .flatten()
    }

    unsafe fn get_sms(
        &self,
        sm: *mut GSM_StateMachine,
        sms: *mut GSM_MultiSMSMessage,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetSMS(sm, sms) }
    }

    unsafe fn get_next_sms(
        &self,
        sm: *mut GSM_StateMachine,
        sms: *mut GSM_MultiSMSMessage,
        start: bool,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetNextSMS(sm, sms, to_gboolean(start)) }
    }

    unsafe fn set_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error {
        unsafe { sys::GSM_SetSMS(sm, sms) }
    }

    unsafe fn add_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error {
        unsafe { sys::GSM_AddSMS(sm, sms) }
    }

    unsafe fn delete_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error {
        unsafe { sys::GSM_DeleteSMS(sm, sms) }
    }

    unsafe fn sms_folders(&self, sm: *mut GSM_StateMachine, out: *mut GSM_SMSFolders) -> GSM_Error {
        unsafe { sys::GSM_GetSMSFolders(sm, out) }
    }

    unsafe fn sms_status(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SMSMemoryStatus,
    ) -> GSM_Error {
        unsafe { sys::GSM_GetSMSStatus(sm, out) }
    }

    unsafe fn set_default_sms_data(&self, sms: *mut GSM_SMSMessage) {
        unsafe { sys::GSM_SetDefaultSMSData(sms) };
    }

    unsafe fn decode_multipart_sms(
        &self,
        di: *mut GSM_Debug_Info,
        info: *mut GSM_MultiPartSMSInfo,
        sms: *mut GSM_MultiSMSMessage,
        ems: bool,
    ) -> bool {
        from_gboolean(unsafe { sys::GSM_DecodeMultiPartSMS(di, info, sms, to_gboolean(ems)) })
    }

    unsafe fn free_multipart_sms_info(&self, info: *mut GSM_MultiPartSMSInfo) {
        unsafe { sys::GSM_FreeMultiPartSMSInfo(info) };
    }

    unsafe fn set_incoming_sms(&self, sm: *mut GSM_StateMachine, enable: bool) -> GSM_Error {
        unsafe { sys::GSM_SetIncomingSMS(sm, to_gboolean(enable)) }
    }

    unsafe fn set_incoming_call(&self, sm: *mut GSM_StateMachine, enable: bool) -> GSM_Error {
        unsafe { sys::GSM_SetIncomingCall(sm, to_gboolean(enable)) }
    }

    unsafe fn set_incoming_sms_callback(
        &self,
        sm: *mut GSM_StateMachine,
        callback: IncomingSMSCallback,
        user_data: *mut c_void,
    ) {
        unsafe { sys::GSM_SetIncomingSMSCallback(sm, callback, user_data) };
    }

    unsafe fn set_incoming_call_callback(
        &self,
        sm: *mut GSM_StateMachine,
        callback: IncomingCallCallback,
        user_data: *mut c_void,
    ) {
        unsafe { sys::GSM_SetIncomingCallCallback(sm, callback, user_data) };
    }
}
