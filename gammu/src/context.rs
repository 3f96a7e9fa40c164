#![allow(unsafe_code)]
//! The library context: backend, capability set and library-wide helpers.

use std::path::{Path, PathBuf};
use std::ptr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gammu_sys::{GSM_Config, GSM_DateTime};

use crate::backend::Backend;
use crate::capabilities::{Capabilities, LibraryVersion};
use crate::config::Config;
use crate::datetime::DateTime;
use crate::debug::DebugInfo;
use crate::error::{self, Error, ErrorCode, GsmError, Result};
use crate::ffi::to_c_string;
use crate::ini::IniSection;
use crate::machine::StateMachine;
use crate::marshal::{Marshalled, TruncationPolicy};
use crate::sms::{self, MultiPartSmsInfo, SmsMessage};

/// State shared by a context and every object created from it.
#[derive(Debug)]
pub(crate) struct Library {
    pub(crate) backend: Arc<dyn Backend>,
    version: LibraryVersion,
    version_string: String,
    caps: Capabilities,
    truncation: TruncationPolicy,
    global_file_set: AtomicBool,
}

impl Library {
    fn new(
        backend: Arc<dyn Backend>,
        caps: Option<Capabilities>,
        truncation: TruncationPolicy,
    ) -> Self {
        let version_string = backend.version();
        let version = version_string.parse::<LibraryVersion>().unwrap_or_else(|err| {
            tracing::warn!(%err, "assuming bundled library version {}", LibraryVersion::BUNDLED);
            LibraryVersion::BUNDLED
        });
        let caps = caps.unwrap_or_else(|| Capabilities::for_version(version));
        tracing::debug!(%version, ?caps, "gammu context created");
        Self {
            backend,
            version,
            version_string,
            caps,
            truncation,
            global_file_set: AtomicBool::new(false),
        }
    }

    pub(crate) fn check(&self, rc: gammu_sys::GSM_Error) -> Result<()> {
        error::check(&self.backend, rc)
    }

    /// Apply the context's truncation policy.
    pub(crate) fn marshalled<T>(&self, m: Marshalled<T>) -> Result<T> {
        m.apply(self.truncation)
    }

    pub(crate) const fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub(crate) fn not_connected(&self) -> Error {
        Error::Gsm(GsmError::native(gammu_sys::ERR_NOTCONNECTED, &self.backend))
    }

    pub(crate) fn note_global_debug_file(&self) {
        self.global_file_set.store(true, Ordering::Release);
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if self.global_file_set.load(Ordering::Acquire) {
            let di = self.backend.global_debug();
            if !di.is_null() {
                unsafe { self.backend.set_debug_file(di, None) };
            }
        }
    }
}

/// Entry point to the bindings.
///
/// Cheap to clone; clones share the backend and settings.
#[derive(Debug, Clone)]
pub struct Gammu {
    lib: Arc<Library>,
}

impl Gammu {
    /// Create a new [`GammuBuilder`].
    #[must_use]
    pub fn builder() -> GammuBuilder {
        GammuBuilder::default()
    }

    /// The process-wide context for the linked libGammu.
    #[cfg(feature = "native")]
    #[must_use]
    pub fn native() -> Self {
        static NATIVE: std::sync::OnceLock<Gammu> = std::sync::OnceLock::new();
        NATIVE
            .get_or_init(|| {
                Self::from_library(Library::new(
                    Arc::new(crate::backend::NativeBackend),
                    None,
                    TruncationPolicy::default(),
                ))
            })
            .clone()
    }

    /// A context over `backend` with default settings.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self::from_library(Library::new(backend, None, TruncationPolicy::default()))
    }

    fn from_library(lib: Library) -> Self {
        Self { lib: Arc::new(lib) }
    }

    /// Parsed library version.
    #[must_use]
    pub fn version(&self) -> LibraryVersion {
        self.lib.version
    }

    /// Library version exactly as reported.
    #[must_use]
    pub fn version_string(&self) -> &str {
        &self.lib.version_string
    }

    /// Version-conditional features in effect.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.lib.caps
    }

    /// Truncation policy applied to records sent to the library.
    #[must_use]
    pub fn truncation_policy(&self) -> TruncationPolicy {
        self.lib.truncation
    }

    /// Human-readable description of `code`. Never empty.
    #[must_use]
    pub fn error_message(&self, code: ErrorCode) -> String {
        let err = if code.is_binding() {
            GsmError::binding(code)
        } else {
            GsmError::native(code.raw(), &self.lib.backend)
        };
        err.message().into_owned()
    }

    /// Translate a raw native status.
    ///
    /// # Errors
    ///
    /// [`Error::Gsm`] for anything but `ERR_NONE`.
    pub fn translate(&self, raw: u32) -> Result<()> {
        self.lib.check(raw)
    }

    /// Load translations from `path`, or the default location.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a path that is not valid UTF-8.
    pub fn init_locales(&self, path: Option<&Path>) -> Result<()> {
        let c_path = path.map(path_to_c).transpose()?;
        self.lib.backend.init_locales(c_path.as_deref());
        Ok(())
    }

    /// The process-wide debug sink.
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] if the library has none.
    pub fn global_debug(&self) -> Result<DebugInfo<'_>> {
        DebugInfo::global(&self.lib, self.lib.backend.global_debug())
    }

    /// Allocate a new state machine.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] if the native allocation fails.
    pub fn state_machine(&self) -> Result<StateMachine> {
        StateMachine::new(&self.lib)
    }

    /// Parse an INI file.
    ///
    /// # Errors
    ///
    /// The native status, typically `CantOpenFile`.
    pub fn read_ini(&self, path: &Path, unicode: bool) -> Result<IniSection> {
        let c_path = path_to_c(path)?;
        let mut raw = ptr::null_mut();
        self.lib
            .check(self.lib.backend.ini_read_file(&c_path, unicode, &mut raw))?;
        IniSection::new(&self.lib, raw, unicode)
    }

    /// Locate and parse the gammurc. `force` overrides the search.
    ///
    /// # Errors
    ///
    /// The native status, typically `FileNotExist` or `CantOpenFile`.
    pub fn find_gammurc(&self, force: Option<&Path>) -> Result<IniSection> {
        let c_force = force.map(path_to_c).transpose()?;
        let mut raw = ptr::null_mut();
        self.lib
            .check(self.lib.backend.find_gammurc(c_force.as_deref(), &mut raw))?;
        tracing::debug!(forced = force.is_some(), "gammurc loaded");
        IniSection::new(&self.lib, raw, false)
    }

    /// Read configuration section `section` (`[gammu]` for 0, `[gammuN]`
    /// otherwise) from a parsed gammurc.
    ///
    /// # Errors
    ///
    /// `NoneSection` if the section is missing, [`Error::Released`] for a
    /// closed `ini`.
    pub fn read_config(&self, ini: &IniSection, section: i32) -> Result<Config> {
        let ini = ini.as_ptr()?;
        // SAFETY: plain data; all-zero is valid.
        let mut raw: GSM_Config = unsafe { std::mem::zeroed() };
        self.lib
            .check(unsafe { self.lib.backend.read_config(ini, &raw mut raw, section) })?;
        unsafe { Config::from_native(&raw, self.lib.caps) }
    }

    /// Operator name for a `"MCC MNC"` code. Unknown codes yield `"unknown"`.
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] if the lookup returned nothing.
    pub fn network_name(&self, code: &str) -> Result<String> {
        let c_code = to_c_string(code)?;
        self.lib.backend.network_name(&c_code).ok_or(Error::NullPointer)
    }

    /// Country name for an MCC.
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] if the lookup returned nothing.
    pub fn country_name(&self, code: &str) -> Result<String> {
        let c_code = to_c_string(code)?;
        self.lib.backend.country_name(&c_code).ok_or(Error::NullPointer)
    }

    /// Whether the date part of `dt` is a real calendar date.
    #[must_use]
    pub fn check_date(&self, dt: &DateTime) -> bool {
        self.lib.backend.check_date(&GSM_DateTime::from(*dt))
    }

    /// Whether the time part of `dt` is valid.
    #[must_use]
    pub fn check_time(&self, dt: &DateTime) -> bool {
        self.lib.backend.check_time(&GSM_DateTime::from(*dt))
    }

    /// Date formatted for the current locale.
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] if the library could not format it.
    pub fn os_date(&self, dt: &DateTime) -> Result<String> {
        self.lib
            .backend
            .os_date(&GSM_DateTime::from(*dt))
            .ok_or(Error::NullPointer)
    }

    /// Date and time formatted for the current locale.
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] if the library could not format it.
    pub fn os_date_time(&self, dt: &DateTime, timezone: bool) -> Result<String> {
        self.lib
            .backend
            .os_date_time(&GSM_DateTime::from(*dt), timezone)
            .ok_or(Error::NullPointer)
    }

    /// Reassemble the parts of a multipart message.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::CouldNotDecode`] if the library rejects the parts;
    /// [`Error::Truncated`] for more parts than fit; [`Error::Released`] if
    /// `debug` belongs to a closed state machine.
    pub fn decode_multipart_sms(
        &self,
        debug: &DebugInfo<'_>,
        parts: &[SmsMessage],
        ems: bool,
    ) -> Result<MultiPartSmsInfo> {
        let di = debug.as_ptr()?;
        let mut multi = self.lib.marshalled(sms::multi_to_native(parts)?)?;
        let mut info = sms::new_multipart_info();
        let backend = &self.lib.backend;
        let decoded =
            unsafe { backend.decode_multipart_sms(di, &raw mut *info, &raw mut *multi, ems) };
        let result = if decoded {
            unsafe { MultiPartSmsInfo::from_native(&info) }
        } else {
            Err(Error::binding(ErrorCode::CouldNotDecode))
        };
        unsafe { backend.free_multipart_sms_info(&raw mut *info) };
        result
    }
}

fn path_to_c(path: &Path) -> Result<std::ffi::CString> {
    let s = path
        .to_str()
        .ok_or_else(|| Error::InvalidArgument(format!("non UTF-8 path {}", path.display())))?;
    to_c_string(s)
}

/// Builder for [`Gammu`].
#[derive(Debug, Default)]
pub struct GammuBuilder {
    backend: Option<Arc<dyn Backend>>,
    truncation: TruncationPolicy,
    locales: Option<PathBuf>,
    capabilities: Option<Capabilities>,
}

impl GammuBuilder {
    /// Backend to call into.
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// What to do with values that do not fit native buffers.
    #[must_use]
    pub const fn truncation(mut self, policy: TruncationPolicy) -> Self {
        self.truncation = policy;
        self
    }

    /// Load translations from this directory on build.
    #[must_use]
    pub fn locales(mut self, path: impl Into<PathBuf>) -> Self {
        self.locales = Some(path.into());
        self
    }

    /// Override the capability set derived from the library version.
    #[must_use]
    pub const fn capabilities(mut self, caps: Capabilities) -> Self {
        self.capabilities = Some(caps);
        self
    }

    /// Build the context. Without an explicit backend the linked native
    /// library is used.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if no backend was given and the crate was
    /// built without the `native` feature, or the locale path is not UTF-8.
    pub fn build(self) -> Result<Gammu> {
        let backend = match self.backend {
            Some(backend) => backend,
            #[cfg(feature = "native")]
            None => Arc::new(crate::backend::NativeBackend),
            #[cfg(not(feature = "native"))]
            None => {
                return Err(Error::InvalidArgument(
                    "no backend given and the native library is not linked".into(),
                ));
            }
        };
        let gammu = Gammu::from_library(Library::new(backend, self.capabilities, self.truncation));
        if let Some(path) = &self.locales {
            gammu.init_locales(Some(path))?;
        }
        Ok(gammu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyBackend;

    #[test]
    fn version_resolves_capabilities() {
        let old = Gammu::with_backend(Arc::new(DummyBackend::new().with_version("1.27.0")));
        assert_eq!(old.version(), LibraryVersion::new(1, 27, 0));
        assert!(!old.capabilities().gprs_state);

        let gammu = Gammu::with_backend(Arc::new(DummyBackend::new()));
        assert_eq!(gammu.capabilities(), Capabilities::current());
    }

    #[test]
    fn unparsable_version_falls_back() {
        let gammu = Gammu::with_backend(Arc::new(DummyBackend::new().with_version("git")));
        assert_eq!(gammu.version(), LibraryVersion::BUNDLED);
        assert_eq!(gammu.version_string(), "git");
    }

    #[test]
    fn builder_overrides() {
        let caps = Capabilities::for_version(LibraryVersion::new(1, 20, 0));
        let gammu = Gammu::builder()
            .backend(Arc::new(DummyBackend::new()))
            .truncation(TruncationPolicy::Warn)
            .capabilities(caps)
            .build()
            .unwrap();
        assert_eq!(gammu.capabilities(), caps);
        assert_eq!(gammu.truncation_policy(), TruncationPolicy::Warn);
    }

    #[test]
    fn messages_are_never_empty() {
        let gammu = Gammu::with_backend(Arc::new(DummyBackend::new()));
        for code in ErrorCode::ALL {
            assert!(!gammu.error_message(*code).is_empty());
        }
        assert!(gammu.translate(gammu_sys::ERR_NONE).is_ok());
        assert_eq!(
            gammu.translate(gammu_sys::ERR_TIMEOUT).unwrap_err().code(),
            Some(ErrorCode::Timeout)
        );
    }
}
