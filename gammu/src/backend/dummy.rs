#![allow(unsafe_code)]
//! An in-process phone behind the [`Backend`] trait.
//!
//! Handles are opaque tokens tracked in tables, so double frees, leaked
//! config strings and late callbacks are counted instead of crashing.
//! Every handle talks to the same simulated device: one message store, one
//! queue of pending network events.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::ops::Bound;
use std::path::PathBuf;
use std::sync::Arc;
use std::{fs, mem, ptr};

use gammu_sys::{
    ERR_CANTOPENFILE, ERR_DEVICENOTEXIST, ERR_EMPTY, ERR_FILENOTEXIST, ERR_FULL,
    ERR_INVALIDLOCATION, ERR_NONE, ERR_NONE_SECTION, ERR_NOTCONNECTED, ERR_NOTSUPPORTED,
    ERR_SECURITYERROR, ERR_UNCONFIGURED, ERR_UNKNOWN, ERR_UNKNOWNCONNECTIONTYPESTRING,
    GSM_BatteryCharge, GSM_Call, GSM_Config, GSM_ConnectionType, GSM_DateTime, GSM_Debug_Info,
    GSM_Error, GSM_Log_Function, GSM_MultiPartSMSInfo, GSM_MultiSMSMessage, GSM_NetworkInfo,
    GSM_PhoneModel, GSM_SMSFolders, GSM_SMSMemoryStatus, GSM_SMSMessage, GSM_SecurityCode,
    GSM_SecurityCodeType, GSM_SignalQuality, GSM_StateMachine, INI_Section, IncomingCallCallback,
    IncomingSMSCallback,
};
use parking_lot::{Mutex, MutexGuard};

use super::{Backend, FIRMWARE_DATE_LEN, FIRMWARE_VERSION_LEN, PhoneString};
use crate::call::{Call, CallStatus};
use crate::capabilities::{Capabilities, LibraryVersion};
use crate::datetime::DateTime;
use crate::error::{ErrorCode, Result};
use crate::ffi::{borrowed_c_string, borrowed_ucs2_string};
use crate::info::{BatteryCharge, NetworkInfo, SignalQuality};
use crate::marshal::{encode_ucs2, read_ucs2, to_gboolean};
use crate::sms::{MAX_MULTI_SMS, SmsMessage};
use crate::types::{
    BatteryType, ChargeState, GprsState, Manufacturer, MemoryType, NetworkState, SecurityCodeType,
    SmsCoding, SmsPduType, SmsState, UdhType,
};

const CONFIG_SLOTS: usize = gammu_sys::GSM_MAX_CONFIG_NUM as usize + 1;
const PHONE_SIZE: usize = 100;
const PIN: &str = "1234";
const DEBUG_LEVELS: &[&str] = &[
    "nothing",
    "text",
    "textall",
    "textalldate",
    "textdate",
    "errors",
    "errorsdate",
    "binary",
];

/// Folder numbers as used in `GSM_SMSMessage::Folder`.
pub const INBOX_FOLDER: i32 = 1;
/// See [`INBOX_FOLDER`].
pub const OUTBOX_FOLDER: i32 = 2;

const NETWORKS: &[(&str, &str)] = &[
    ("999 99", "GammuTel"),
    ("246 01", "Omnitel"),
    ("262 01", "Telekom.de"),
];
const COUNTRIES: &[(&str, &str)] = &[
    ("999", "Dummyland"),
    ("246", "Lithuania"),
    ("262", "Germany"),
];

type SmsFn = unsafe extern "C" fn(*mut GSM_StateMachine, *mut GSM_SMSMessage, *mut c_void);
type CallFn = unsafe extern "C" fn(*mut GSM_StateMachine, *mut GSM_Call, *mut c_void);
type LogFn = unsafe extern "C" fn(*const c_char, *mut c_void);

/// Every callback/user-data pair ever handed to the dummy.
#[derive(Debug, Clone, Copy)]
enum Installed {
    Sms(SmsFn, *mut c_void),
    Call(CallFn, *mut c_void),
    Log(LogFn, *mut c_void),
}

#[derive(Debug)]
enum Pending {
    Sms(Box<GSM_SMSMessage>),
    Call(GSM_Call),
}

#[derive(Debug, Default)]
struct DebugSlot {
    use_global: bool,
    file: Option<String>,
    level: String,
}

#[derive(Debug)]
struct Phone {
    configs: Box<[GSM_Config; CONFIG_SLOTS]>,
    config_num: c_int,
    connected: bool,
    connection: GSM_ConnectionType,
    debug: usize,
    log: GSM_Log_Function,
    log_data: *mut c_void,
    sms_cb: IncomingSMSCallback,
    sms_data: *mut c_void,
    sms_enabled: bool,
    call_cb: IncomingCallCallback,
    call_data: *mut c_void,
    call_enabled: bool,
}

impl Phone {
    fn new(debug: usize) -> Self {
        Self {
            // SAFETY: plain data with null pointers.
            configs: Box::new([unsafe { mem::zeroed() }; CONFIG_SLOTS]),
            config_num: 0,
            connected: false,
            connection: 0,
            debug,
            log: None,
            log_data: ptr::null_mut(),
            sms_cb: None,
            sms_data: ptr::null_mut(),
            sms_enabled: false,
            call_cb: None,
            call_data: ptr::null_mut(),
            call_enabled: false,
        }
    }
}

#[derive(Debug)]
struct IniEntry {
    key: String,
    value: String,
    encoded: Vec<u8>,
}

#[derive(Debug)]
struct IniGroup {
    name: String,
    entries: Vec<IniEntry>,
}

#[derive(Debug)]
struct IniData {
    groups: Vec<IniGroup>,
    /// Strings handed out through `GSM_Config` pointers by `read_config`.
    config_strings: Vec<CString>,
}

impl IniData {
    fn parse(text: &str, unicode: bool) -> Self {
        let mut groups: Vec<IniGroup> = Vec::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                groups.push(IniGroup {
                    name: name.trim().to_owned(),
                    entries: Vec::new(),
                });
                continue;
            }
            let (Some(group), Some((key, value))) = (groups.last_mut(), line.split_once('=')) else {
                continue;
            };
            let value = value.trim().to_owned();
            let encoded = if unicode {
                encode_ucs2(&value)
            } else {
                let mut bytes = value.clone().into_bytes();
                bytes.retain(|b| *b != 0);
                bytes.push(0);
                bytes
            };
            group.entries.push(IniEntry {
                key: key.trim().to_owned(),
                value,
                encoded,
            });
        }
        Self {
            groups,
            config_strings: Vec::new(),
        }
    }

    fn entry(&self, section: &str, key: &str) -> Option<&IniEntry> {
        self.groups
            .iter()
            .filter(|g| g.name.eq_ignore_ascii_case(section))
            .flat_map(|g| &g.entries)
            .find(|e| e.key.eq_ignore_ascii_case(key))
    }

    fn has_group(&self, section: &str) -> bool {
        self.groups.iter().any(|g| g.name.eq_ignore_ascii_case(section))
    }
}

#[derive(Debug)]
struct DummyState {
    version: String,
    gammurc: Option<PathBuf>,
    locales: Option<Option<String>>,
    next_token: usize,
    phones: HashMap<usize, Phone>,
    inis: HashMap<usize, IniData>,
    debug: HashMap<usize, DebugSlot>,
    global_debug: usize,
    multipart_buffers: HashMap<usize, Box<[u8]>>,
    model: Box<GSM_PhoneModel>,
    sms: BTreeMap<(c_int, c_int), GSM_SMSMessage>,
    pending: VecDeque<Pending>,
    security_required: GSM_SecurityCodeType,
    installed: Vec<Installed>,
    fail_next_allocation: bool,
    reject_notifications: bool,
    allocations: usize,
    frees: usize,
    invalid_frees: usize,
    dangling_config_strings: usize,
    ini_frees: usize,
    multipart_frees: usize,
}

// SAFETY: the raw pointers are opaque user-data values handed back to the
// callbacks they came with; the dummy never dereferences them.
unsafe impl Send for DummyState {}

impl DummyState {
    fn new() -> Self {
        let mut state = Self {
            version: LibraryVersion::BUNDLED.to_string(),
            gammurc: None,
            locales: None,
            next_token: 0x1000,
            phones: HashMap::new(),
            inis: HashMap::new(),
            debug: HashMap::new(),
            global_debug: 0,
            multipart_buffers: HashMap::new(),
            model: Box::new(GSM_PhoneModel {
                manufacturer: Manufacturer::Nokia.to_ffi(),
                model: c"Dummy".as_ptr(),
                number: c"DUMMY-1".as_ptr(),
                irdamodel: c"DummyIR".as_ptr(),
                features: [0; 21],
            }),
            sms: BTreeMap::new(),
            pending: VecDeque::new(),
            security_required: SecurityCodeType::None.to_ffi(),
            installed: Vec::new(),
            fail_next_allocation: false,
            reject_notifications: false,
            allocations: 0,
            frees: 0,
            invalid_frees: 0,
            dangling_config_strings: 0,
            ini_frees: 0,
            multipart_frees: 0,
        };
        let global = state.token();
        state.debug.insert(global, DebugSlot::default());
        state.global_debug = global;
        state
    }

    fn token(&mut self) -> usize {
        self.next_token += 0x10;
        self.next_token
    }

    fn caps(&self) -> Capabilities {
        self.version
            .parse::<LibraryVersion>()
            .map_or_else(|_| Capabilities::current(), Capabilities::for_version)
    }
}

fn handle<T>(token: usize) -> *mut T {
    ptr::without_provenance_mut(token)
}

fn valid_folder(folder: c_int) -> bool {
    folder == INBOX_FOLDER || folder == OUTBOX_FOLDER
}

fn put_c(dst: &mut [c_char], src: &str) {
    let n = src.len().min(dst.len().saturating_sub(1));
    for (d, s) in dst.iter_mut().zip(&src.as_bytes()[..n]) {
        *d = c_char::from_ne_bytes([*s]);
    }
    if let Some(end) = dst.get_mut(n) {
        *end = 0;
    }
}

unsafe fn put_c_raw(dst: *mut c_char, capacity: usize, src: &str) {
    let buf = unsafe { std::slice::from_raw_parts_mut(dst, capacity) };
    put_c(buf, src);
}

fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        ["yes", "true", "on", "1"]
            .iter()
            .any(|t| v.eq_ignore_ascii_case(t))
    })
}

fn connection_type(name: &str) -> Option<GSM_ConnectionType> {
    let name = name.to_ascii_lowercase();
    Some(match name.as_str() {
        "" => gammu_sys::GCT_AT,
        n if n.starts_with("at") => gammu_sys::GCT_AT,
        "fbus" => gammu_sys::GCT_FBUS2,
        "mbus" => gammu_sys::GCT_MBUS2,
        "blueat" | "bluerfat" => gammu_sys::GCT_BLUEAT,
        "irdaat" => gammu_sys::GCT_IRDAAT,
        "none" => gammu_sys::GCT_NONE,
        _ => return None,
    })
}

fn emit_log(log: GSM_Log_Function, data: *mut c_void, line: &str) {
    if let (Some(f), Ok(text)) = (log, CString::new(line)) {
        unsafe { f(text.as_ptr(), data) };
    }
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// In-process [`Backend`] that behaves like a small AT phone.
///
/// Clones share the same device. The inspection methods (`frees`,
/// `invalid_frees`, ...) exist for tests.
#[derive(Debug, Clone)]
pub struct DummyBackend {
    state: Arc<Mutex<DummyState>>,
}

impl Default for DummyBackend {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! online {
    ($self:ident, $sm:expr) => {
        match $self.online($sm) {
            Ok(state) => state,
            Err(rc) => return rc,
        }
    };
}

impl DummyBackend {
    /// A fresh device reporting the bundled library version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DummyState::new())),
        }
    }

    /// Report `version` from [`Backend::version`], e.g. `"1.27.0"`.
    #[must_use]
    pub fn with_version(self, version: impl Into<String>) -> Self {
        self.state.lock().version = version.into();
        self
    }

    /// File returned by `find_gammurc` when no path is forced.
    #[must_use]
    pub fn with_gammurc(self, path: impl Into<PathBuf>) -> Self {
        self.state.lock().gammurc = Some(path.into());
        self
    }

    /// Make the next state machine allocation return null.
    pub fn fail_next_allocation(&self) {
        self.state.lock().fail_next_allocation = true;
    }

    /// Make `GSM_SetIncomingSMS` / `GSM_SetIncomingCall` fail with
    /// `NotSupported` from now on.
    pub fn reject_notification_changes(&self) {
        self.state.lock().reject_notifications = true;
    }

    /// Require `kind` to be entered before the phone is unlocked.
    pub fn require_security_code(&self, kind: SecurityCodeType) {
        self.state.lock().security_required = kind.to_ffi();
    }

    /// Put a message straight into the store. Returns its location.
    ///
    /// # Errors
    ///
    /// Marshalling errors, or [`ErrorCode::InvalidLocation`] for an unknown
    /// folder.
    pub fn store_sms(&self, folder: i32, message: &SmsMessage) -> Result<i32> {
        let mut raw = message.to_native()?.exact()?;
        let mut st = self.state.lock();
        if !valid_folder(folder) {
            return Err(crate::Error::binding(ErrorCode::InvalidLocation));
        }
        let location = next_location(&st.sms, folder);
        raw.Folder = folder;
        raw.Location = location;
        raw.InboxFolder = to_gboolean(folder == INBOX_FOLDER);
        st.sms.insert((folder, location), raw);
        Ok(location)
    }

    /// Messages currently stored.
    #[must_use]
    pub fn stored_sms(&self) -> usize {
        self.state.lock().sms.len()
    }

    /// Queue a message for delivery on the next `read_device`.
    ///
    /// # Errors
    ///
    /// Marshalling errors.
    pub fn queue_incoming_sms(&self, message: &SmsMessage) -> Result<()> {
        let raw = message.to_native()?.exact()?;
        self.state.lock().pending.push_back(Pending::Sms(Box::new(raw)));
        Ok(())
    }

    /// Queue a call event for delivery on the next `read_device`.
    ///
    /// # Errors
    ///
    /// Marshalling errors.
    pub fn queue_incoming_call(&self, call: &Call) -> Result<()> {
        let raw = call.to_native()?.exact()?;
        self.state.lock().pending.push_back(Pending::Call(raw));
        Ok(())
    }

    /// Invoke every callback ever installed, with its original user data,
    /// as a library that kept stale pointers would. Returns the number of
    /// invocations.
    pub fn replay_stale_callbacks(&self) -> usize {
        let installed = self.state.lock().installed.clone();
        let sms = SmsMessage::text_message("+10000000000", "stale")
            .to_native()
            .map(|m| m.value)
            .ok();
        let call = Call {
            status: CallStatus::Incoming,
            call_id: None,
            phone_number: "+10000000000".into(),
        }
        .to_native()
        .map(|m| m.value)
        .ok();
        let mut count = 0;
        for entry in installed {
            match (entry, sms, call) {
                (Installed::Sms(f, data), Some(mut sms), _) => {
                    unsafe { f(ptr::null_mut(), &raw mut sms, data) };
                }
                (Installed::Call(f, data), _, Some(mut call)) => {
                    unsafe { f(ptr::null_mut(), &raw mut call, data) };
                }
                (Installed::Log(f, data), _, _) => unsafe { f(c"stale log line\n".as_ptr(), data) },
                _ => continue,
            }
            count += 1;
        }
        count
    }

    /// State machines allocated so far.
    #[must_use]
    pub fn allocations(&self) -> usize {
        self.state.lock().allocations
    }

    /// Successful state machine frees.
    #[must_use]
    pub fn frees(&self) -> usize {
        self.state.lock().frees
    }

    /// Frees of handles that were unknown or already freed.
    #[must_use]
    pub fn invalid_frees(&self) -> usize {
        self.state.lock().invalid_frees
    }

    /// State machines not yet freed.
    #[must_use]
    pub fn live_state_machines(&self) -> usize {
        self.state.lock().phones.len()
    }

    /// Config string pointers still set when their state machine was freed;
    /// the real library would have passed each to `free()`.
    #[must_use]
    pub fn dangling_config_strings(&self) -> usize {
        self.state.lock().dangling_config_strings
    }

    /// `INI_Free` calls on live sections.
    #[must_use]
    pub fn ini_frees(&self) -> usize {
        self.state.lock().ini_frees
    }

    /// Parsed INI files not yet freed.
    #[must_use]
    pub fn live_ini_sections(&self) -> usize {
        self.state.lock().inis.len()
    }

    /// `GSM_FreeMultiPartSMSInfo` calls.
    #[must_use]
    pub fn multipart_frees(&self) -> usize {
        self.state.lock().multipart_frees
    }

    /// Decoder buffers not yet freed.
    #[must_use]
    pub fn live_multipart_buffers(&self) -> usize {
        self.state.lock().multipart_buffers.len()
    }

    /// Path passed to `init_locales`; outer `None` if never called.
    #[must_use]
    pub fn locales(&self) -> Option<Option<String>> {
        self.state.lock().locales.clone()
    }

    /// Current file of the global debug sink.
    #[must_use]
    pub fn global_debug_file(&self) -> Option<String> {
        let st = self.state.lock();
        st.debug.get(&st.global_debug).and_then(|d| d.file.clone())
    }

    /// Current level of the global debug sink.
    #[must_use]
    pub fn global_debug_level(&self) -> String {
        let st = self.state.lock();
        st.debug
            .get(&st.global_debug)
            .map(|d| d.level.clone())
            .unwrap_or_default()
    }

    /// Debug sinks (global one excluded) that forward to the global sink.
    #[must_use]
    pub fn debug_sinks_using_global(&self) -> usize {
        let st = self.state.lock();
        st.debug
            .iter()
            .filter(|(token, slot)| **token != st.global_debug && slot.use_global)
            .count()
    }

    fn online(
        &self,
        sm: *mut GSM_StateMachine,
    ) -> std::result::Result<MutexGuard<'_, DummyState>, GSM_Error> {
        let st = self.state.lock();
        match st.phones.get(&sm.addr()) {
            Some(phone) if phone.connected => Ok(st),
            _ => Err(ERR_NOTCONNECTED),
        }
    }

    fn read_ini(&self, path: &CStr, unicode: bool, out: &mut *mut INI_Section) -> GSM_Error {
        let Ok(path) = path.to_str() else {
            return ERR_CANTOPENFILE;
        };
        let Ok(bytes) = fs::read(path) else {
            return ERR_CANTOPENFILE;
        };
        let text = match bytes.as_slice() {
            [0xFF, 0xFE, rest @ ..] if unicode => {
                let units: Vec<u16> = rest
                    .chunks_exact(2)
                    .map(|p| u16::from_le_bytes([p[0], p[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            _ => String::from_utf8_lossy(&bytes).into_owned(),
        };
        let mut st = self.state.lock();
        let token = st.token();
        st.inis.insert(token, IniData::parse(&text, unicode));
        *out = handle(token);
        ERR_NONE
    }
}

fn next_location(store: &BTreeMap<(c_int, c_int), GSM_SMSMessage>, folder: c_int) -> c_int {
    store
        .range((folder, c_int::MIN)..=(folder, c_int::MAX))
        .next_back()
        .map_or(1, |((_, loc), _)| loc + 1)
}

impl Backend for DummyBackend {
    fn version(&self) -> String {
        self.state.lock().version.clone()
    }

    fn init_locales(&self, path: Option<&CStr>) {
        self.state.lock().locales = Some(path.map(|p| p.to_string_lossy().into_owned()));
    }

    fn error_string(&self, code: GSM_Error) -> Option<String> {
        ErrorCode::from_raw(code)
            .filter(|c| !c.is_binding())
            .map(|c| c.description().to_owned())
    }

    fn global_debug(&self) -> *mut GSM_Debug_Info {
        handle(self.state.lock().global_debug)
    }

    unsafe fn state_machine_debug(&self, sm: *mut GSM_StateMachine) -> *mut GSM_Debug_Info {
        self.state
            .lock()
            .phones
            .get(&sm.addr())
            .map_or(ptr::null_mut(), |p| handle(p.debug))
    }

    unsafe fn set_debug_global(&self, di: *mut GSM_Debug_Info, enable: bool) {
        if let Some(slot) = self.state.lock().debug.get_mut(&di.addr()) {
            slot.use_global = enable;
        }
    }

    unsafe fn set_debug_file(&self, di: *mut GSM_Debug_Info, path: Option<&CStr>) -> GSM_Error {
        let file = match path.map(CStr::to_str) {
            None => None,
            Some(Ok(p)) if !p.is_empty() => {
                let opened = fs::OpenOptions::new().create(true).append(true).open(p);
                if opened.is_err() {
                    return ERR_CANTOPENFILE;
                }
                Some(p.to_owned())
            }
            Some(_) => return ERR_CANTOPENFILE,
        };
        match self.state.lock().debug.get_mut(&di.addr()) {
            Some(slot) => {
                slot.file = file;
                ERR_NONE
            }
            None => ERR_UNKNOWN,
        }
    }

    unsafe fn set_debug_level(&self, di: *mut GSM_Debug_Info, level: &CStr) -> bool {
        let Ok(level) = level.to_str() else {
            return false;
        };
        if !DEBUG_LEVELS.contains(&level) {
            return false;
        }
        self.state
            .lock()
            .debug
            .get_mut(&di.addr())
            .map(|slot| slot.level = level.to_owned())
            .is_some()
    }

    fn ini_read_file(&self, path: &CStr, unicode: bool, out: &mut *mut INI_Section) -> GSM_Error {
        self.read_ini(path, unicode, out)
    }

    unsafe fn ini_get_value(
        &self,
        ini: *mut INI_Section,
        section: *const u8,
        key: *const u8,
        unicode: bool,
    ) -> *const u8 {
        let decode = |p: *const u8| -> Option<String> {
            if unicode {
                unsafe { borrowed_ucs2_string(p) }
            } else {
                unsafe { borrowed_c_string(p.cast()) }.ok().flatten()
            }
        };
        let (Some(section), Some(key)) = (decode(section), decode(key)) else {
            return ptr::null();
        };
        let st = self.state.lock();
        st.inis
            .get(&ini.addr())
            .and_then(|data| data.entry(&section, &key))
            .map_or(ptr::null(), |e| e.encoded.as_ptr())
    }

    unsafe fn ini_free(&self, ini: *mut INI_Section) {
        let mut st = self.state.lock();
        if st.inis.remove(&ini.addr()).is_some() {
            st.ini_frees += 1;
        } else {
            st.invalid_frees += 1;
        }
    }

    fn find_gammurc(&self, force: Option<&CStr>, out: &mut *mut INI_Section) -> GSM_Error {
        if let Some(path) = force {
            return self.read_ini(path, false, out);
        }
        let configured = self.state.lock().gammurc.clone();
        let Some(path) =
            configured.and_then(|p| CString::new(p.to_string_lossy().into_owned()).ok())
        else {
            return ERR_FILENOTEXIST;
        };
        self.read_ini(&path, false, out)
    }

    unsafe fn read_config(
        &self,
        ini: *mut INI_Section,
        cfg: *mut GSM_Config,
        num: c_int,
    ) -> GSM_Error {
        let mut st = self.state.lock();
        let Some(data) = st.inis.get_mut(&ini.addr()) else {
            return ERR_UNKNOWN;
        };
        let section = if num == 0 {
            "gammu".to_owned()
        } else {
            format!("gammu{num}")
        };
        if !data.has_group(&section) {
            return ERR_NONE_SECTION;
        }
        let value = |key: &str| data.entry(&section, key).map(|e| e.value.clone());
        let device = value("device")
            .or_else(|| value("port"))
            .unwrap_or_else(|| "/dev/ttyUSB0".into());
        let connection = value("connection").unwrap_or_else(|| "at".into());
        let debug_file = value("logfile").unwrap_or_default();
        let model = value("model").unwrap_or_default();
        let level = value("logformat").unwrap_or_default();
        let sync_time = parse_bool(value("synchronizetime").as_deref());
        let lock_device = parse_bool(value("use_locking").as_deref());
        let start_info = parse_bool(value("startinfo").as_deref());

        let mut strings = [device, connection, debug_file]
            .map(|s| CString::new(s.replace('\0', "")).unwrap_or_default());
        let [dev_ptr, conn_ptr, file_ptr] = strings.each_mut().map(|s| s.as_ptr().cast_mut());
        data.config_strings.extend(strings);

        let cfg = unsafe { &mut *cfg };
        // SAFETY: plain data with null pointers.
        *cfg = unsafe { mem::zeroed() };
        put_c(&mut cfg.Model, &model);
        put_c(&mut cfg.DebugLevel, &level);
        cfg.Device = dev_ptr;
        cfg.Connection = conn_ptr;
        cfg.DebugFile = file_ptr;
        cfg.SyncTime = to_gboolean(sync_time);
        cfg.LockDevice = to_gboolean(lock_device);
        cfg.StartInfo = to_gboolean(start_info);
        cfg.UseGlobalDebugFile = to_gboolean(true);
        put_c(&mut cfg.TextReminder, "Reminder");
        put_c(&mut cfg.TextMeeting, "Meeting");
        put_c(&mut cfg.TextCall, "Call");
        put_c(&mut cfg.TextBirthday, "Birthday");
        put_c(&mut cfg.TextMemo, "Memo");
        ERR_NONE
    }

    fn alloc_state_machine(&self) -> *mut GSM_StateMachine {
        let mut st = self.state.lock();
        if mem::take(&mut st.fail_next_allocation) {
            return ptr::null_mut();
        }
        let token = st.token();
        let debug = st.token();
        st.debug.insert(
            debug,
            DebugSlot {
                use_global: true,
                ..DebugSlot::default()
            },
        );
        st.phones.insert(token, Phone::new(debug));
        st.allocations += 1;
        handle(token)
    }

    unsafe fn free_state_machine(&self, sm: *mut GSM_StateMachine) {
        let mut st = self.state.lock();
        let Some(phone) = st.phones.remove(&sm.addr()) else {
            st.invalid_frees += 1;
            return;
        };
        let dangling = phone
            .configs
            .iter()
            .flat_map(|c| [c.Device, c.Connection, c.DebugFile])
            .filter(|p| !p.is_null())
            .count();
        st.dangling_config_strings += dangling;
        st.debug.remove(&phone.debug);
        st.frees += 1;
    }

    unsafe fn config(&self, sm: *mut GSM_StateMachine, num: c_int) -> *mut GSM_Config {
        let mut st = self.state.lock();
        let Some(phone) = st.phones.get_mut(&sm.addr()) else {
            return ptr::null_mut();
        };
        let Ok(index) = usize::try_from(num) else {
            return ptr::null_mut();
        };
        phone
            .configs
            .get_mut(index)
            .map_or(ptr::null_mut(), ptr::from_mut)
    }

    unsafe fn config_num(&self, sm: *mut GSM_StateMachine) -> c_int {
        self.state
            .lock()
            .phones
            .get(&sm.addr())
            .map_or(0, |p| p.config_num)
    }

    unsafe fn set_config_num(&self, sm: *mut GSM_StateMachine, sections: c_int) {
        if let Some(phone) = self.state.lock().phones.get_mut(&sm.addr()) {
            phone.config_num = sections;
        }
    }

    unsafe fn init_connection(
        &self,
        sm: *mut GSM_StateMachine,
        _replies: c_int,
        log: GSM_Log_Function,
        user_data: *mut c_void,
    ) -> GSM_Error {
        let line = {
            let mut st = self.state.lock();
            let st = &mut *st;
            let Some(phone) = st.phones.get_mut(&sm.addr()) else {
                return ERR_UNKNOWN;
            };
            if phone.config_num < 1 {
                return ERR_UNCONFIGURED;
            }
            let tried = usize::try_from(phone.config_num).unwrap_or(0).min(CONFIG_SLOTS);
            let mut outcome = Err(ERR_UNCONFIGURED);
            for cfg in &phone.configs[..tried] {
                let text = |p: *mut c_char| {
                    unsafe { borrowed_c_string(p) }
                        .ok()
                        .flatten()
                        .unwrap_or_default()
                };
                let (device, connection) = (text(cfg.Device), text(cfg.Connection));
                outcome = if device.is_empty() || device.contains("nonexistent") {
                    Err(ERR_DEVICENOTEXIST)
                } else {
                    connection_type(&connection)
                        .map(|kind| (kind, device, connection))
                        .ok_or(ERR_UNKNOWNCONNECTIONTYPESTRING)
                };
                if outcome.is_ok() {
                    break;
                }
            }
            let (kind, device, connection) = match outcome {
                Ok(found) => found,
                Err(rc) => return rc,
            };
            phone.connected = true;
            phone.connection = kind;
            phone.log = log;
            phone.log_data = user_data;
            if let Some(f) = log {
                st.installed.push(Installed::Log(f, user_data));
            }
            format!("Connected to dummy phone on {device} ({connection})\n")
        };
        emit_log(log, user_data, &line);
        ERR_NONE
    }

    unsafe fn terminate_connection(&self, sm: *mut GSM_StateMachine) -> GSM_Error {
        let (log, data) = {
            let mut st = self.state.lock();
            match st.phones.get_mut(&sm.addr()) {
                Some(phone) if phone.connected => {
                    phone.connected = false;
                    phone.sms_enabled = false;
                    phone.call_enabled = false;
                    (phone.log.take(), mem::replace(&mut phone.log_data, ptr::null_mut()))
                }
                _ => return ERR_NOTCONNECTED,
            }
        };
        emit_log(log, data, "Disconnected\n");
        ERR_NONE
    }

    unsafe fn is_connected(&self, sm: *mut GSM_StateMachine) -> bool {
        self.state
            .lock()
            .phones
            .get(&sm.addr())
            .is_some_and(|p| p.connected)
    }

    unsafe fn used_connection(&self, sm: *mut GSM_StateMachine) -> GSM_ConnectionType {
        self.state
            .lock()
            .phones
            .get(&sm.addr())
            .map_or(0, |p| p.connection)
    }

    unsafe fn read_device(&self, sm: *mut GSM_StateMachine, _wait_for_reply: bool) -> c_int {
        let (phone, events) = {
            let mut st = self.state.lock();
            let Some(phone) = st.phones.get(&sm.addr()).filter(|p| p.connected) else {
                return c_int::try_from(ERR_NOTCONNECTED).unwrap_or(c_int::MAX);
            };
            let snapshot = (
                phone.log,
                phone.log_data,
                phone.sms_enabled.then_some(phone.sms_cb).flatten().map(|f| (f, phone.sms_data)),
                phone.call_enabled.then_some(phone.call_cb).flatten().map(|f| (f, phone.call_data)),
            );
            (snapshot, st.pending.drain(..).collect::<Vec<_>>())
        };
        let (log, log_data, sms_cb, call_cb) = phone;
        let mut delivered: c_int = 0;
        for event in events {
            match (event, sms_cb, call_cb) {
                (Pending::Sms(mut sms), Some((f, data)), _) => unsafe {
                    f(sm, &raw mut *sms, data);
                },
                (Pending::Call(mut call), _, Some((f, data))) => unsafe {
                    f(sm, &raw mut call, data);
                },
                _ => continue,
            }
            delivered += 1;
        }
        emit_log(log, log_data, &format!("read_device: {delivered} notifications\n"));
        delivered
    }

    unsafe fn enter_security_code(
        &self,
        sm: *mut GSM_StateMachine,
        code: *mut GSM_SecurityCode,
    ) -> GSM_Error {
        let mut st = online!(self, sm);
        let code = unsafe { &*code };
        let entered: String = code
            .Code
            .iter()
            .map(|c| c.to_ne_bytes()[0])
            .take_while(|b| *b != 0)
            .map(char::from)
            .collect();
        if code.Type != st.security_required || entered != PIN {
            return ERR_SECURITYERROR;
        }
        st.security_required = SecurityCodeType::None.to_ffi();
        ERR_NONE
    }

    unsafe fn security_status(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SecurityCodeType,
    ) -> GSM_Error {
        let st = online!(self, sm);
        unsafe { *out = st.security_required };
        ERR_NONE
    }

    unsafe fn battery_charge(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_BatteryCharge,
    ) -> GSM_Error {
        let _st = online!(self, sm);
        let charge = BatteryCharge {
            battery_type: BatteryType::LiIon,
            capacity: 1500,
            percent: 73,
            charge_state: Some(ChargeState::BatteryPowered),
            battery_voltage: 3900,
            charge_voltage: 0,
            charge_current: 0,
            phone_current: 120,
            battery_temperature: 27,
            phone_temperature: 31,
        };
        unsafe { *out = charge.to_native() };
        ERR_NONE
    }

    unsafe fn firmware(
        &self,
        sm: *mut GSM_StateMachine,
        value: *mut c_char,
        date: *mut c_char,
        num: *mut f64,
    ) -> GSM_Error {
        let _st = online!(self, sm);
        unsafe {
            put_c_raw(value, FIRMWARE_VERSION_LEN, "1.42.0");
            put_c_raw(date, FIRMWARE_DATE_LEN, "20231120");
            *num = 1.42;
        }
        ERR_NONE
    }

    unsafe fn phone_string(
        &self,
        sm: *mut GSM_StateMachine,
        which: PhoneString,
        out: *mut c_char,
    ) -> GSM_Error {
        let _st = online!(self, sm);
        let text = match which {
            PhoneString::Hardware => "DUMMY-HW-1",
            PhoneString::Imei => "999999999999999",
            PhoneString::ManufactureMonth => "11/2023",
            PhoneString::Manufacturer => "Gammu",
            PhoneString::Model => "Dummy",
            PhoneString::ProductCode => "DUMMY-0001",
        };
        unsafe { put_c_raw(out, which.buffer_len(), text) };
        ERR_NONE
    }

    unsafe fn model_info(&self, sm: *mut GSM_StateMachine) -> *mut GSM_PhoneModel {
        let mut st = self.state.lock();
        if st.phones.contains_key(&sm.addr()) {
            ptr::from_mut(&mut *st.model)
        } else {
            ptr::null_mut()
        }
    }

    unsafe fn network_info(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_NetworkInfo,
    ) -> GSM_Error {
        let st = online!(self, sm);
        let info = NetworkInfo {
            cid: "FACE".into(),
            network_code: "999 99".into(),
            state: NetworkState::HomeNetwork,
            lac: "B00B".into(),
            network_name: "GammuTel".into(),
            gprs: GprsState::Attached,
            packet_cid: Some("BEEF".into()),
            packet_state: NetworkState::HomeNetwork,
            packet_lac: Some("CAFE".into()),
        };
        match info.to_native(st.caps()) {
            Ok(m) => {
                unsafe { *out = m.value };
                ERR_NONE
            }
            Err(_) => ERR_UNKNOWN,
        }
    }

    unsafe fn signal_quality(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SignalQuality,
    ) -> GSM_Error {
        let _st = online!(self, sm);
        let quality = SignalQuality {
            strength: -63,
            percent: 70,
            bit_error_rate: 0,
        };
        unsafe { *out = quality.into() };
        ERR_NONE
    }

    fn network_name(&self, code: &CStr) -> Option<String> {
        let code = code.to_str().ok()?;
        let name = NETWORKS.iter().find(|(c, _)| *c == code).map_or("unknown", |(_, n)| n);
        Some(name.to_owned())
    }

    fn country_name(&self, code: &CStr) -> Option<String> {
        let code = code.to_str().ok()?;
        let prefix = code.get(..3).unwrap_or(code);
        let name = COUNTRIES.iter().find(|(c, _)| *c == prefix).map_or("unknown", |(_, n)| n);
        Some(name.to_owned())
    }

    fn check_date(&self, dt: &GSM_DateTime) -> bool {
        dt.Year != 0 && dt.Day >= 1 && dt.Day <= days_in_month(dt.Year, dt.Month)
    }

    fn check_time(&self, dt: &GSM_DateTime) -> bool {
        (0..24).contains(&dt.Hour) && (0..60).contains(&dt.Minute) && (0..60).contains(&dt.Second)
    }

    fn os_date(&self, dt: &GSM_DateTime) -> Option<String> {
        let dt = DateTime::from(*dt);
        Some(format!("{:04}-{:02}-{:02}", dt.year, dt.month, dt.day))
    }

    fn os_date_time(&self, dt: &GSM_DateTime, timezone: bool) -> Option<String> {
        let dt = DateTime::from(*dt);
        let dt = if timezone { dt } else { dt.with_timezone(0) };
        Some(dt.to_string())
    }

    unsafe fn get_sms(
        &self,
        sm: *mut GSM_StateMachine,
        sms: *mut GSM_MultiSMSMessage,
    ) -> GSM_Error {
        let st = online!(self, sm);
        let multi = unsafe { &mut *sms };
        let key = (multi.SMS[0].Folder, multi.SMS[0].Location);
        if !valid_folder(key.0) {
            return ERR_INVALIDLOCATION;
        }
        match st.sms.get(&key) {
            Some(stored) => {
                multi.SMS[0] = *stored;
                multi.Number = 1;
                ERR_NONE
            }
            None => ERR_EMPTY,
        }
    }

    unsafe fn get_next_sms(
        &self,
        sm: *mut GSM_StateMachine,
        sms: *mut GSM_MultiSMSMessage,
        start: bool,
    ) -> GSM_Error {
        let st = online!(self, sm);
        let multi = unsafe { &mut *sms };
        let found = if start {
            st.sms.values().next()
        } else {
            let key = (multi.SMS[0].Folder, multi.SMS[0].Location);
            st.sms.range((Bound::Excluded(key), Bound::Unbounded)).next().map(|(_, v)| v)
        };
        match found {
            Some(stored) => {
                multi.SMS[0] = *stored;
                multi.Number = 1;
                ERR_NONE
            }
            None => ERR_EMPTY,
        }
    }

    unsafe fn set_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error {
        let mut st = online!(self, sm);
        let sms = unsafe { &mut *sms };
        if !valid_folder(sms.Folder) || sms.Location < 1 {
            return ERR_INVALIDLOCATION;
        }
        sms.Memory = MemoryType::Me.to_ffi();
        st.sms.insert((sms.Folder, sms.Location), *sms);
        ERR_NONE
    }

    unsafe fn add_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error {
        let mut st = online!(self, sm);
        let sms = unsafe { &mut *sms };
        if sms.Folder == 0 {
            sms.Folder = if sms.PDU == SmsPduType::Submit.to_ffi() {
                OUTBOX_FOLDER
            } else {
                INBOX_FOLDER
            };
        }
        if !valid_folder(sms.Folder) {
            return ERR_INVALIDLOCATION;
        }
        if st.sms.len() >= PHONE_SIZE {
            return ERR_FULL;
        }
        sms.Location = next_location(&st.sms, sms.Folder);
        sms.Memory = MemoryType::Me.to_ffi();
        sms.InboxFolder = to_gboolean(sms.Folder == INBOX_FOLDER);
        st.sms.insert((sms.Folder, sms.Location), *sms);
        ERR_NONE
    }

    unsafe fn delete_sms(&self, sm: *mut GSM_StateMachine, sms: *mut GSM_SMSMessage) -> GSM_Error {
        let mut st = online!(self, sm);
        let sms = unsafe { &*sms };
        if !valid_folder(sms.Folder) {
            return ERR_INVALIDLOCATION;
        }
        if st.sms.remove(&(sms.Folder, sms.Location)).is_some() {
            ERR_NONE
        } else {
            ERR_EMPTY
        }
    }

    unsafe fn sms_folders(&self, sm: *mut GSM_StateMachine, out: *mut GSM_SMSFolders) -> GSM_Error {
        let _st = online!(self, sm);
        let out = unsafe { &mut *out };
        let folders = [("Inbox", true), ("Outbox", false)];
        for (slot, (name, inbox)) in out.Folder.iter_mut().zip(folders) {
            slot.InboxFolder = to_gboolean(inbox);
            slot.OutboxFolder = to_gboolean(!inbox);
            slot.Memory = MemoryType::Me.to_ffi();
            slot.Name = [0; 42];
            let encoded = encode_ucs2(name);
            let n = encoded.len().min(slot.Name.len() - 2);
            slot.Name[..n].copy_from_slice(&encoded[..n]);
        }
        out.Number = 2;
        ERR_NONE
    }

    unsafe fn sms_status(
        &self,
        sm: *mut GSM_StateMachine,
        out: *mut GSM_SMSMemoryStatus,
    ) -> GSM_Error {
        let st = online!(self, sm);
        let unread = st
            .sms
            .values()
            .filter(|m| m.State == SmsState::UnRead.to_ffi())
            .count();
        let as_int = |n: usize| c_int::try_from(n).unwrap_or(c_int::MAX);
        unsafe {
            *out = GSM_SMSMemoryStatus {
                SIMUnRead: 0,
                SIMUsed: 0,
                SIMSize: 0,
                TemplatesUsed: 0,
                PhoneUnRead: as_int(unread),
                PhoneUsed: as_int(st.sms.len()),
                PhoneSize: as_int(PHONE_SIZE),
            };
        }
        ERR_NONE
    }

    unsafe fn set_default_sms_data(&self, sms: *mut GSM_SMSMessage) {
        if let Ok(defaults) = SmsMessage::default().to_native() {
            unsafe { *sms = defaults.value };
        }
    }

    unsafe fn decode_multipart_sms(
        &self,
        _di: *mut GSM_Debug_Info,
        info: *mut GSM_MultiPartSMSInfo,
        sms: *mut GSM_MultiSMSMessage,
        _ems: bool,
    ) -> bool {
        let multi = unsafe { &*sms };
        let info = unsafe { &mut *info };
        let n = usize::try_from(multi.Number).unwrap_or(0).min(MAX_MULTI_SMS);
        let mut parts: Vec<&GSM_SMSMessage> = multi.SMS[..n].iter().collect();
        parts.sort_by_key(|p| p.UDH.PartNumber);
        let Some(first) = parts.first() else {
            return false;
        };
        let concatenated = parts.iter().any(|p| {
            p.UDH.Type == UdhType::ConcatenatedMessages.to_ffi()
                || p.UDH.Type == UdhType::ConcatenatedMessages16bit.to_ffi()
        });
        info.UnicodeCoding = to_gboolean(parts.iter().any(|p| {
            p.Coding == SmsCoding::UnicodeNoCompression.to_ffi()
                || p.Coding == SmsCoding::UnicodeCompression.to_ffi()
        }));
        info.Class = c_int::from(first.Class);
        info.ReplaceMessage = first.ReplaceMessage;
        info.EntriesNum = 1;
        info.Entries[0].ID = if concatenated {
            gammu_sys::SMS_ConcatenatedTextLong
        } else {
            gammu_sys::SMS_Text
        };

        let mut text = String::new();
        let mut ok = true;
        for part in &parts {
            if part.Coding == SmsCoding::EightBit.to_ffi() {
                ok = false;
                break;
            }
            text.push_str(&read_ucs2(&part.Text));
        }

        let mut buffer = encode_ucs2(&text).into_boxed_slice();
        let data = buffer.as_mut_ptr();
        self.state.lock().multipart_buffers.insert(data.addr(), buffer);
        info.Entries[0].Buffer = data;
        ok
    }

    unsafe fn free_multipart_sms_info(&self, info: *mut GSM_MultiPartSMSInfo) {
        let info = unsafe { &mut *info };
        let mut st = self.state.lock();
        for entry in &mut info.Entries {
            if entry.Buffer.is_null() {
                continue;
            }
            if st.multipart_buffers.remove(&entry.Buffer.addr()).is_none() {
                st.invalid_frees += 1;
            }
            entry.Buffer = ptr::null_mut();
        }
        st.multipart_frees += 1;
    }

    unsafe fn set_incoming_sms(&self, sm: *mut GSM_StateMachine, enable: bool) -> GSM_Error {
        let mut st = online!(self, sm);
        if st.reject_notifications {
            return ERR_NOTSUPPORTED;
        }
        if let Some(phone) = st.phones.get_mut(&sm.addr()) {
            phone.sms_enabled = enable;
        }
        ERR_NONE
    }

    unsafe fn set_incoming_call(&self, sm: *mut GSM_StateMachine, enable: bool) -> GSM_Error {
        let mut st = online!(self, sm);
        if st.reject_notifications {
            return ERR_NOTSUPPORTED;
        }
        if let Some(phone) = st.phones.get_mut(&sm.addr()) {
            phone.call_enabled = enable;
        }
        ERR_NONE
    }

    unsafe fn set_incoming_sms_callback(
        &self,
        sm: *mut GSM_StateMachine,
        callback: IncomingSMSCallback,
        user_data: *mut c_void,
    ) {
        let mut st = self.state.lock();
        let st = &mut *st;
        if let Some(phone) = st.phones.get_mut(&sm.addr()) {
            phone.sms_cb = callback;
            phone.sms_data = user_data;
            if let Some(f) = callback {
                st.installed.push(Installed::Sms(f, user_data));
            }
        }
    }

    unsafe fn set_incoming_call_callback(
        &self,
        sm: *mut GSM_StateMachine,
        callback: IncomingCallCallback,
        user_data: *mut c_void,
    ) {
        let mut st = self.state.lock();
        let st = &mut *st;
        if let Some(phone) = st.phones.get_mut(&sm.addr()) {
            phone.call_cb = callback;
            phone.call_data = user_data;
            if let Some(f) = callback {
                st.installed.push(Installed::Call(f, user_data));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ini_lookup_ignores_case_and_comments() {
        let data = IniData::parse(
            "; comment\n[Gammu]\nDevice = /dev/ttyACM0\n# other\nconnection=at\n[gammu1]\ndevice=x\n",
            false,
        );
        assert_eq!(data.entry("gammu", "DEVICE").map(|e| e.value.as_str()), Some("/dev/ttyACM0"));
        assert_eq!(data.entry("GAMMU1", "device").map(|e| e.value.as_str()), Some("x"));
        assert!(data.entry("gammu", "model").is_none());
        assert!(data.has_group("gammu1") && !data.has_group("gammu2"));
    }

    #[test]
    fn calendar_rules() {
        let b = DummyBackend::new();
        let date = |y, m, d| GSM_DateTime::from(DateTime::date(y, m, d));
        assert!(b.check_date(&date(2000, 2, 29)));
        assert!(!b.check_date(&date(1900, 2, 29)));
        assert!(!b.check_date(&date(2001, 13, 1)));
        assert!(!b.check_time(&GSM_DateTime::from(DateTime::date(2001, 1, 1).at(24, 0, 0))));
    }

    #[test]
    fn connection_names() {
        assert_eq!(connection_type("at115200"), Some(gammu_sys::GCT_AT));
        assert_eq!(connection_type("BlueRFAT"), Some(gammu_sys::GCT_BLUEAT));
        assert_eq!(connection_type("carrier-pigeon"), None);
    }

    #[test]
    fn next_location_per_folder() {
        let b = DummyBackend::new();
        let msg = SmsMessage::text_message("+1", "a");
        assert_eq!(b.store_sms(INBOX_FOLDER, &msg).unwrap(), 1);
        assert_eq!(b.store_sms(INBOX_FOLDER, &msg).unwrap(), 2);
        assert_eq!(b.store_sms(OUTBOX_FOLDER, &msg).unwrap(), 1);
        assert_eq!(b.stored_sms(), 3);
    }
}
