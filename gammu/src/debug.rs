#![allow(unsafe_code)]
//! Native debug sinks (`GSM_Debug_Info`).

use std::fmt;
use std::path::Path;
use std::ptr::NonNull;

use gammu_sys::{GSM_Debug_Info, GSM_StateMachine};

use crate::context::Library;
use crate::error::{Error, Result};
use crate::ffi::{OwnedHandle, to_c_string};

/// Borrowed handle to a native debug sink.
///
/// The library owns the sink; this handle cannot outlive the context or
/// state machine it came from. A machine's sink lives inside the machine, so
/// once that machine is closed every call returns [`Error::Released`].
pub struct DebugInfo<'a> {
    lib: &'a Library,
    ptr: NonNull<GSM_Debug_Info>,
    owner: Option<&'a OwnedHandle<GSM_StateMachine>>,
}

impl<'a> DebugInfo<'a> {
    /// The process-wide sink.
    pub(crate) fn global(lib: &'a Library, ptr: *mut GSM_Debug_Info) -> Result<Self> {
        let ptr = NonNull::new(ptr).ok_or(Error::NullPointer)?;
        Ok(Self {
            lib,
            ptr,
            owner: None,
        })
    }

    /// The sink embedded in `owner`.
    pub(crate) fn machine(
        lib: &'a Library,
        owner: &'a OwnedHandle<GSM_StateMachine>,
        ptr: *mut GSM_Debug_Info,
    ) -> Result<Self> {
        let ptr = NonNull::new(ptr).ok_or(Error::NullPointer)?;
        Ok(Self {
            lib,
            ptr,
            owner: Some(owner),
        })
    }

    /// Pointer for FFI calls. Fails once the owning machine is closed.
    pub(crate) fn as_ptr(&self) -> Result<*mut GSM_Debug_Info> {
        match self.owner {
            Some(owner) if owner.is_released() => Err(Error::Released),
            _ => Ok(self.ptr.as_ptr()),
        }
    }

    /// Whether this is the process-wide sink.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.owner.is_none()
    }

    /// Forward this sink's output to the global sink.
    ///
    /// # Errors
    ///
    /// [`Error::Released`] if the owning machine is closed.
    pub fn set_global(&self, enable: bool) -> Result<()> {
        let di = self.as_ptr()?;
        unsafe { self.lib.backend.set_debug_global(di, enable) };
        Ok(())
    }

    /// Write debug output to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a non-UTF-8 path, otherwise the native
    /// status (typically `CantOpenFile`).
    pub fn set_file(&self, path: &Path) -> Result<()> {
        let path = path
            .to_str()
            .ok_or_else(|| Error::InvalidArgument(format!("non UTF-8 path {}", path.display())))?;
        let di = self.as_ptr()?;
        let c_path = to_c_string(path)?;
        self.lib
            .check(unsafe { self.lib.backend.set_debug_file(di, Some(&c_path)) })?;
        if self.is_global() {
            self.lib.note_global_debug_file();
        }
        tracing::debug!(global = self.is_global(), path, "debug file set");
        Ok(())
    }

    /// Close the current debug file, if any.
    ///
    /// # Errors
    ///
    /// [`Error::Released`] if the owning machine is closed, otherwise the
    /// native status.
    pub fn reset_file(&self) -> Result<()> {
        let di = self.as_ptr()?;
        self.lib.check(unsafe { self.lib.backend.set_debug_file(di, None) })
    }

    /// Select a debug level by name (`"textall"`, `"binary"`, ...).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the library does not know the level,
    /// [`Error::Released`] if the owning machine is closed.
    pub fn set_level(&self, level: &str) -> Result<()> {
        let di = self.as_ptr()?;
        let c_level = to_c_string(level)?;
        if unsafe { self.lib.backend.set_debug_level(di, &c_level) } {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!("unknown debug level {level:?}")))
        }
    }
}

impl fmt::Debug for DebugInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugInfo")
            .field("ptr", &self.ptr)
            .field("global", &self.is_global())
            .field("released", &self.as_ptr().is_err())
            .finish_non_exhaustive()
    }
}
