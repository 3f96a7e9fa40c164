#![allow(unsafe_code)]
//! Error translation: native `GSM_Error` codes, binding-added codes and the
//! crate-wide [`Error`] type.
//!
//! Native codes are the `ERR_*` values of `gammu.h` (1..=80, `ERR_NONE` = 1 is
//! success). Codes raised by this crate itself live in the reserved range
//! [`BINDING_CODE_MIN`]..=[`BINDING_CODE_MAX`], far above anything the native
//! enumeration has ever used, so they never collide across library versions.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::backend::Backend;
use crate::marshal::Truncation;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// First code of the range reserved for binding-added errors.
pub const BINDING_CODE_MIN: u32 = 1000;
/// Last code of the range reserved for binding-added errors.
pub const BINDING_CODE_MAX: u32 = 1099;

macro_rules! error_codes {
    (
        native { $($(#[$nm:meta])* $nv:ident = $nval:path => $nmsg:literal,)* }
        binding { $($(#[$bm:meta])* $bv:ident = $bval:literal => $bmsg:literal,)* }
    ) => {
        /// Every result code this crate can produce.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u32)]
        pub enum ErrorCode {
            $($(#[$nm])* $nv = $nval,)*
            $($(#[$bm])* $bv = $bval,)*
        }

        impl ErrorCode {
            /// All codes, native first, in numeric order.
            pub const ALL: &'static [Self] = &[$(Self::$nv,)* $(Self::$bv,)*];

            /// Look up a raw code. Returns `None` for values outside the table.
            #[must_use]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match raw {
                    $($nval => Some(Self::$nv),)*
                    $($bval => Some(Self::$bv),)*
                    _ => None,
                }
            }

            /// Built-in English description, used when the native lookup
            /// has nothing better.
            #[must_use]
            pub const fn description(self) -> &'static str {
                match self {
                    $(Self::$nv => $nmsg,)*
                    $(Self::$bv => $bmsg,)*
                }
            }

            /// Variant name, e.g. `"NotConnected"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$nv => stringify!($nv),)*
                    $(Self::$bv => stringify!($bv),)*
                }
            }
        }
    };
}

error_codes! {
    native {
        /// No error.
        None = gammu_sys::ERR_NONE => "No error.",
        /// Error opening device. Unknown, busy or no permissions.
        DeviceOpenError = gammu_sys::ERR_DEVICEOPENERROR => "Error opening device. Unknown, busy or no permissions.",
        /// Error opening device, it is locked.
        DeviceLocked = gammu_sys::ERR_DEVICELOCKED => "Error opening device, it is locked.",
        /// Error opening device, it doesn't exist.
        DeviceNotExist = gammu_sys::ERR_DEVICENOTEXIST => "Error opening device, it doesn't exist.",
        /// Error opening device, it is already opened by other application.
        DeviceBusy = gammu_sys::ERR_DEVICEBUSY => "Error opening device, it is already opened by other application.",
        /// Error opening device, you don't have permissions.
        DeviceNoPermission = gammu_sys::ERR_DEVICENOPERMISSION => "Error opening device, you don't have permissions.",
        /// Error opening device. No required driver in operating system.
        DeviceNoDriver = gammu_sys::ERR_DEVICENODRIVER => "Error opening device. No required driver in operating system.",
        /// Error opening device. Some hardware not connected/wrongly configured.
        DeviceNotWork = gammu_sys::ERR_DEVICENOTWORK => "Error opening device. Some hardware not connected/wrongly configured.",
        /// Error setting device DTR or RTS.
        DeviceDtrRtsError = gammu_sys::ERR_DEVICEDTRRTSERROR => "Error setting device DTR or RTS.",
        /// Error setting device speed. Maybe speed not supported.
        DeviceChangeSpeedError = gammu_sys::ERR_DEVICECHANGESPEEDERROR => "Error setting device speed. Maybe speed not supported.",
        /// Error writing to the device.
        DeviceWriteError = gammu_sys::ERR_DEVICEWRITEERROR => "Error writing to the device.",
        /// Error during reading from the device.
        DeviceReadError = gammu_sys::ERR_DEVICEREADERROR => "Error during reading from the device.",
        /// Can't set parity on the device.
        DeviceParityError = gammu_sys::ERR_DEVICEPARITYERROR => "Can't set parity on the device.",
        /// No response in specified timeout. Probably phone not connected.
        Timeout = gammu_sys::ERR_TIMEOUT => "No response in specified timeout. Probably phone not connected.",
        /// Frame not requested right now.
        FrameNotRequested = gammu_sys::ERR_FRAMENOTREQUESTED => "Frame not requested right now.",
        /// Unknown response from phone.
        UnknownResponse = gammu_sys::ERR_UNKNOWNRESPONSE => "Unknown response from phone.",
        /// Unknown frame.
        UnknownFrame = gammu_sys::ERR_UNKNOWNFRAME => "Unknown frame.",
        /// Unknown connection type string. Check config file.
        UnknownConnectionTypeString = gammu_sys::ERR_UNKNOWNCONNECTIONTYPESTRING => "Unknown connection type string. Check config file.",
        /// Unknown model type string. Check config file.
        UnknownModelString = gammu_sys::ERR_UNKNOWNMODELSTRING => "Unknown model type string. Check config file.",
        /// Some functions not available for your system (disabled in config or not implemented).
        SourceNotAvailable = gammu_sys::ERR_SOURCENOTAVAILABLE => "Some functions not available for your system (disabled in config or not implemented).",
        /// Function not supported by phone.
        NotSupported = gammu_sys::ERR_NOTSUPPORTED => "Function not supported by phone.",
        /// Entry is empty.
        Empty = gammu_sys::ERR_EMPTY => "Entry is empty.",
        /// Security error. Maybe no PIN?
        SecurityError = gammu_sys::ERR_SECURITYERROR => "Security error. Maybe no PIN?",
        /// Invalid location. Maybe too high?
        InvalidLocation = gammu_sys::ERR_INVALIDLOCATION => "Invalid location. Maybe too high?",
        /// Functionality not implemented.
        NotImplemented = gammu_sys::ERR_NOTIMPLEMENTED => "Functionality not implemented.",
        /// Memory full.
        Full = gammu_sys::ERR_FULL => "Memory full.",
        /// Unknown error.
        Unknown = gammu_sys::ERR_UNKNOWN => "Unknown error.",
        /// Can not open specified file.
        CantOpenFile = gammu_sys::ERR_CANTOPENFILE => "Can not open specified file.",
        /// More memory required.
        MoreMemory = gammu_sys::ERR_MOREMEMORY => "More memory required.",
        /// Operation not allowed by phone.
        Permission = gammu_sys::ERR_PERMISSION => "Operation not allowed by phone.",
        /// No SMSC number given. Provide it manually or use the one configured in phone.
        EmptySmsc = gammu_sys::ERR_EMPTYSMSC => "No SMSC number given. Provide it manually or use the one configured in phone.",
        /// You're inside phone menu (maybe editing?). Leave it and try again.
        InsidePhoneMenu = gammu_sys::ERR_INSIDEPHONEMENU => "You're inside phone menu (maybe editing?). Leave it and try again.",
        /// Phone is not connected.
        NotConnected = gammu_sys::ERR_NOTCONNECTED => "Phone is not connected.",
        /// Function is currently being implemented.
        WorkInProgress = gammu_sys::ERR_WORKINPROGRESS => "Function is currently being implemented.",
        /// Phone is disabled and connected to charger.
        PhoneOff = gammu_sys::ERR_PHONEOFF => "Phone is disabled and connected to charger.",
        /// File format not supported by Gammu.
        FileNotSupported = gammu_sys::ERR_FILENOTSUPPORTED => "File format not supported by Gammu.",
        /// Nobody is perfect, some bug appeared in protocol implementation.
        Bug = gammu_sys::ERR_BUG => "Nobody is perfect, some bug appeared in protocol implementation.",
        /// Transfer was canceled by phone.
        Canceled = gammu_sys::ERR_CANCELED => "Transfer was canceled by phone.",
        /// Phone module need to send another answer frame.
        NeedAnotherAnswer = gammu_sys::ERR_NEEDANOTHERANSWER => "Phone module need to send another answer frame.",
        /// Current connection type doesn't support called function.
        OtherConnectionRequired = gammu_sys::ERR_OTHERCONNECTIONREQUIRED => "Current connection type doesn't support called function.",
        /// CRC error.
        WrongCrc = gammu_sys::ERR_WRONGCRC => "CRC error.",
        /// Invalid date or time specified.
        InvalidDateTime = gammu_sys::ERR_INVALIDDATETIME => "Invalid date or time specified.",
        /// Phone memory error, maybe it is read only.
        Memory = gammu_sys::ERR_MEMORY => "Phone memory error, maybe it is read only.",
        /// Invalid data given to phone.
        InvalidData = gammu_sys::ERR_INVALIDDATA => "Invalid data given to phone.",
        /// File with specified name already exists.
        FileAlreadyExist = gammu_sys::ERR_FILEALREADYEXIST => "File with specified name already exists.",
        /// File with specified name doesn't exist.
        FileNotExist = gammu_sys::ERR_FILENOTEXIST => "File with specified name doesn't exist.",
        /// You have to give folder name and not file name.
        ShouldBeFolder = gammu_sys::ERR_SHOULDBEFOLDER => "You have to give folder name and not file name.",
        /// You have to give file name and not folder name.
        ShouldBeFile = gammu_sys::ERR_SHOULDBEFILE => "You have to give file name and not folder name.",
        /// Can not access SIM card.
        NoSim = gammu_sys::ERR_NOSIM => "Can not access SIM card.",
        /// Wrong GNAPPLET version in phone. Use version from currently used Gammu.
        GnappletWrong = gammu_sys::ERR_GNAPPLETWRONG => "Wrong GNAPPLET version in phone. Use version from currently used Gammu.",
        /// Only part of folder has been listed.
        FolderPart = gammu_sys::ERR_FOLDERPART => "Only part of folder has been listed.",
        /// Folder must be empty.
        FolderNotEmpty = gammu_sys::ERR_FOLDERNOTEMPTY => "Folder must be empty.",
        /// Data were converted.
        DataConverted = gammu_sys::ERR_DATACONVERTED => "Data were converted.",
        /// Gammu is not configured.
        Unconfigured = gammu_sys::ERR_UNCONFIGURED => "Gammu is not configured.",
        /// Wrong folder used.
        WrongFolder = gammu_sys::ERR_WRONGFOLDER => "Wrong folder used.",
        /// Internal phone error.
        PhoneInternal = gammu_sys::ERR_PHONE_INTERNAL => "Internal phone error.",
        /// Error writing file to disk.
        WritingFile = gammu_sys::ERR_WRITING_FILE => "Error writing file to disk.",
        /// No such section exists.
        NoneSection = gammu_sys::ERR_NONE_SECTION => "No such section exists.",
        /// Using default values.
        UsingDefaults = gammu_sys::ERR_USING_DEFAULTS => "Using default values.",
        /// Corrupted data returned by phone.
        Corrupted = gammu_sys::ERR_CORRUPTED => "Corrupted data returned by phone.",
        /// Bad feature string in configuration.
        BadFeature = gammu_sys::ERR_BADFEATURE => "Bad feature string in configuration.",
        /// Desired functionality has been disabled on compile time.
        Disabled = gammu_sys::ERR_DISABLED => "Desired functionality has been disabled on compile time.",
        /// Bluetooth configuration requires channel option.
        SpecifyChannel = gammu_sys::ERR_SPECIFYCHANNEL => "Bluetooth configuration requires channel option.",
        /// Service is not running.
        NotRunning = gammu_sys::ERR_NOTRUNNING => "Service is not running.",
        /// Service configuration is missing.
        NoService = gammu_sys::ERR_NOSERVICE => "Service configuration is missing.",
        /// Command rejected because device was busy. Wait and restart.
        Busy = gammu_sys::ERR_BUSY => "Command rejected because device was busy. Wait and restart.",
        /// Could not connect to the server.
        CouldntConnect = gammu_sys::ERR_COULDNT_CONNECT => "Could not connect to the server.",
        /// Could not resolve the host name.
        CouldntResolve = gammu_sys::ERR_COULDNT_RESOLVE => "Could not resolve the host name.",
        /// Failed to get SMSC number from phone.
        GettingSmsc = gammu_sys::ERR_GETTING_SMSC => "Failed to get SMSC number from phone.",
        /// Operation aborted.
        Aborted = gammu_sys::ERR_ABORTED => "Operation aborted.",
        /// Installation data not found.
        InstallNotFound = gammu_sys::ERR_INSTALL_NOT_FOUND => "Installation data not found.",
        /// Entry is read only.
        ReadOnly = gammu_sys::ERR_READ_ONLY => "Entry is read only.",
        /// Network error.
        NetworkError = gammu_sys::ERR_NETWORK_ERROR => "Network error.",
        /// Invalid database version.
        DbVersion = gammu_sys::ERR_DB_VERSION => "Invalid database version.",
        /// Failed to initialize DB driver.
        DbDriver = gammu_sys::ERR_DB_DRIVER => "Failed to initialize DB driver.",
        /// Failed to configure DB driver.
        DbConfig = gammu_sys::ERR_DB_CONFIG => "Failed to configure DB driver.",
        /// Failed to connect to database.
        DbConnect = gammu_sys::ERR_DB_CONNECT => "Failed to connect to database.",
        /// Database connection timeout.
        DbTimeout = gammu_sys::ERR_DB_TIMEOUT => "Database connection timeout.",
        /// Error in executing SQL query.
        Sql = gammu_sys::ERR_SQL => "Error in executing SQL query.",
        /// The type of memory is not available or has been disabled.
        MemoryNotAvailable = gammu_sys::ERR_MEMORY_NOT_AVAILABLE => "The type of memory is not available or has been disabled.",
    }
    binding {
        /// A key looked up in an INI section does not exist.
        IniKeyNotFound = 1000 => "INI key not found.",
        /// The native library could not decode a multipart SMS.
        CouldNotDecode = 1001 => "Could not decode multipart SMS.",
        /// The configuration stack is full, empty, or the slot index is invalid.
        ConfigSlotExhausted = 1002 => "Invalid configuration slot or configuration stack exhausted.",
    }
}

impl ErrorCode {
    /// The raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Whether this code was added by the binding rather than the native library.
    #[must_use]
    pub const fn is_binding(self) -> bool {
        let raw = self.raw();
        raw >= BINDING_CODE_MIN && raw <= BINDING_CODE_MAX
    }

    /// Whether this is the success code.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed native (or binding-level) status code.
///
/// The human-readable message is not computed until [`message`](Self::message)
/// or `Display` asks for it.
#[derive(Clone)]
pub struct GsmError {
    code: ErrorCode,
    raw: u32,
    lookup: Option<Arc<dyn Backend>>,
}

impl GsmError {
    /// A binding-added error; its message comes from the built-in table.
    #[must_use]
    pub const fn binding(code: ErrorCode) -> Self {
        Self {
            code,
            raw: code.raw(),
            lookup: None,
        }
    }

    pub(crate) fn native(raw: u32, backend: &Arc<dyn Backend>) -> Self {
        Self {
            code: ErrorCode::from_raw(raw).unwrap_or(ErrorCode::Unknown),
            raw,
            lookup: Some(Arc::clone(backend)),
        }
    }

    /// The translated code. Raw values unknown to this crate map to
    /// [`ErrorCode::Unknown`]; [`raw`](Self::raw) keeps the original number.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// The raw numeric code as reported.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Human-readable message. Never empty.
    #[must_use]
    pub fn message(&self) -> Cow<'static, str> {
        if self.code.is_binding() {
            return Cow::Borrowed(self.code.description());
        }
        self.lookup
            .as_ref()
            .and_then(|backend| backend.error_string(self.raw))
            .filter(|s| !s.trim().is_empty())
            .map_or(Cow::Borrowed(self.code.description()), Cow::Owned)
    }
}

impl fmt::Debug for GsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GsmError")
            .field("code", &self.code)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for GsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} ({})]", self.message(), self.code, self.raw)
    }
}

impl std::error::Error for GsmError {}

/// Top-level error type for the Gammu bindings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A non-success status from the native library or a binding-added code.
    #[error("gammu: {0}")]
    Gsm(#[from] GsmError),

    /// The native allocator returned null.
    #[error("native allocation failed")]
    OutOfMemory,

    /// A value did not fit a fixed-size native buffer.
    #[error("truncated: {0}")]
    Truncated(Truncation),

    /// A returned pointer was unexpectedly null.
    #[error("unexpected null pointer from FFI")]
    NullPointer,

    /// A string received from FFI contained invalid UTF-8.
    #[error("invalid UTF-8 in FFI string")]
    InvalidUtf8,

    /// An argument passed to the bindings was invalid.
    #[error("{0}")]
    InvalidArgument(String),

    /// The handle was already closed.
    #[error("handle already released")]
    Released,

    /// The linked native library cannot represent the request.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A native enum field held a value outside the known set.
    #[error("unknown {what} value {value}")]
    UnknownValue {
        /// Which field.
        what: &'static str,
        /// The raw value.
        value: i64,
    },
}

impl Error {
    /// The Gammu code carried by this error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Gsm(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Shorthand for a binding-added error.
    #[must_use]
    pub const fn binding(code: ErrorCode) -> Self {
        Self::Gsm(GsmError::binding(code))
    }
}

/// Check a native status code. `ERR_NONE` = success.
#[inline]
pub(crate) fn check(backend: &Arc<dyn Backend>, rc: gammu_sys::GSM_Error) -> Result<()> {
    if rc == gammu_sys::ERR_NONE {
        Ok(())
    } else {
        Err(Error::Gsm(GsmError::native(rc, backend)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyBackend;

    fn backend() -> Arc<dyn Backend> {
        Arc::new(DummyBackend::new())
    }

    #[test]
    fn success_is_ok() {
        assert!(check(&backend(), gammu_sys::ERR_NONE).is_ok());
        assert!(ErrorCode::None.is_success());
    }

    #[test]
    fn every_failure_code_has_a_message() {
        let backend = backend();
        for code in ErrorCode::ALL.iter().copied().filter(|c| !c.is_success()) {
            let err = if code.is_binding() {
                GsmError::binding(code)
            } else {
                GsmError::native(code.raw(), &backend)
            };
            assert!(!err.message().is_empty(), "{code:?} has no message");
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn native_failure_carries_code() {
        let err = check(&backend(), gammu_sys::ERR_NOTCONNECTED).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NotConnected));
        assert!(err.to_string().contains("NotConnected"));
    }

    #[test]
    fn unknown_raw_code_keeps_number_and_message() {
        let err = GsmError::native(4242, &backend());
        assert_eq!(err.code(), ErrorCode::Unknown);
        assert_eq!(err.raw(), 4242);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn binding_codes_stay_in_reserved_range() {
        for code in ErrorCode::ALL {
            if code.is_binding() {
                assert!((BINDING_CODE_MIN..=BINDING_CODE_MAX).contains(&code.raw()));
            } else {
                assert!(code.raw() < BINDING_CODE_MIN);
                assert!(code.raw() < gammu_sys::ERR_LAST_VALUE);
            }
        }
    }

    #[test]
    fn from_raw_round_trips() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_raw(code.raw()), Some(*code));
        }
        assert_eq!(ErrorCode::from_raw(0), None);
    }
}
