#![allow(unsafe_code)]
//! Parsed INI files (`INI_Section`), as used for gammurc.

use std::fmt;
use std::sync::Arc;

use gammu_sys::INI_Section;

use crate::context::Library;
use crate::error::{Error, ErrorCode, Result};
use crate::ffi::{OwnedHandle, borrowed_c_string, borrowed_ucs2_string, to_c_string};
use crate::marshal::encode_ucs2;

/// An INI file parsed by the native library. Freed on drop.
pub struct IniSection {
    lib: Arc<Library>,
    handle: OwnedHandle<INI_Section>,
    unicode: bool,
}

impl IniSection {
    pub(crate) fn new(lib: &Arc<Library>, raw: *mut INI_Section, unicode: bool) -> Result<Self> {
        Ok(Self {
            lib: Arc::clone(lib),
            handle: OwnedHandle::new(raw, &lib.backend)?,
            unicode,
        })
    }

    pub(crate) fn as_ptr(&self) -> Result<*mut INI_Section> {
        self.handle.as_ptr()
    }

    /// Whether the file was read in unicode mode.
    #[must_use]
    pub const fn is_unicode(&self) -> bool {
        self.unicode
    }

    /// Look up `key` in `section`. Both are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::IniKeyNotFound`] if the key is absent; [`Error::Released`]
    /// after [`close`](Self::close).
    pub fn value(&self, section: &str, key: &str) -> Result<String> {
        let ini = self.as_ptr()?;
        let found = if self.unicode {
            let (section, key) = (encode_ucs2(section), encode_ucs2(key));
            let raw = unsafe {
                self.lib
                    .backend
                    .ini_get_value(ini, section.as_ptr(), key.as_ptr(), true)
            };
            unsafe { borrowed_ucs2_string(raw) }
        } else {
            let (section, key) = (to_c_string(section)?, to_c_string(key)?);
            let raw = unsafe {
                self.lib
                    .backend
                    .ini_get_value(ini, section.as_ptr().cast(), key.as_ptr().cast(), false)
            };
            unsafe { borrowed_c_string(raw.cast()) }?
        };
        found.ok_or(Error::binding(ErrorCode::IniKeyNotFound))
    }

    /// Free the parsed file now. Idempotent.
    pub fn close(&self) {
        self.handle.release_with(|_| ());
    }
}

impl fmt::Debug for IniSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IniSection")
            .field("handle", &self.handle)
            .field("unicode", &self.unicode)
            .finish_non_exhaustive()
    }
}
