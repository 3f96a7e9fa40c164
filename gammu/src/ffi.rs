#![allow(unsafe_code)]
//! Internal FFI utilities: RAII handle wrapper + C string helpers.

use std::ffi::{CStr, CString, c_char};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gammu_sys::{GSM_StateMachine, INI_Section};

use crate::backend::Backend;
use crate::error::{Error, Result};

/// Which native free function a handle needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// `GSM_StateMachine`, freed with `GSM_FreeStateMachine`.
    StateMachine,
    /// Parsed INI file, freed with `INI_Free`.
    IniSection,
}

/// A native resource type with a matching native free.
pub(crate) trait NativeResource {
    const KIND: HandleKind;

    /// # Safety
    /// `ptr` must come from the matching native allocator and not be freed yet.
    unsafe fn free(backend: &dyn Backend, ptr: *mut Self);
}

impl NativeResource for GSM_StateMachine {
    const KIND: HandleKind = HandleKind::StateMachine;

    unsafe fn free(backend: &dyn Backend, ptr: *mut Self) {
        unsafe { backend.free_state_machine(ptr) };
    }
}

impl NativeResource for INI_Section {
    const KIND: HandleKind = HandleKind::IniSection;

    unsafe fn free(backend: &dyn Backend, ptr: *mut Self) {
        unsafe { backend.ini_free(ptr) };
    }
}

/// RAII wrapper for an opaque FFI pointer. Frees it exactly once, on the
/// first of [`release_with`](Self::release_with) or drop.
pub(crate) struct OwnedHandle<T: NativeResource> {
    ptr: NonNull<T>,
    backend: Arc<dyn Backend>,
    released: AtomicBool,
}

unsafe impl<T: NativeResource> Send for OwnedHandle<T> {}

impl<T: NativeResource> OwnedHandle<T> {
    /// Wrap a raw FFI pointer. Returns [`Error::NullPointer`] if null.
    pub(crate) fn new(ptr: *mut T, backend: &Arc<dyn Backend>) -> Result<Self> {
        let ptr = NonNull::new(ptr).ok_or(Error::NullPointer)?;
        tracing::debug!(kind = ?T::KIND, ptr = ?ptr, "native handle acquired");
        Ok(Self {
            ptr,
            backend: Arc::clone(backend),
            released: AtomicBool::new(false),
        })
    }

    /// Pointer for FFI calls. Fails once the handle has been released.
    #[inline]
    pub(crate) fn as_ptr(&self) -> Result<*mut T> {
        if self.is_released() {
            Err(Error::Released)
        } else {
            Ok(self.ptr.as_ptr())
        }
    }

    #[inline]
    pub(crate) fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Run `teardown` and then the native free, unless another caller got
    /// here first. Returns `true` if this call performed the release.
    pub(crate) fn release_with(&self, teardown: impl FnOnce(*mut T)) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        teardown(self.ptr.as_ptr());
        unsafe { T::free(self.backend.as_ref(), self.ptr.as_ptr()) };
        tracing::debug!(kind = ?T::KIND, ptr = ?self.ptr, "native handle freed");
        true
    }
}

impl<T: NativeResource> Drop for OwnedHandle<T> {
    fn drop(&mut self) {
        self.release_with(|_| ());
    }
}

impl<T: NativeResource> fmt::Debug for OwnedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedHandle")
            .field("kind", &T::KIND)
            .field("ptr", &self.ptr)
            .field("released", &self.is_released())
            .finish()
    }
}

/// Convert `&str` to `CString` for FFI.
pub(crate) fn to_c_string(s: &str) -> Result<CString> {
    CString::new(s).map_err(|_| Error::InvalidArgument("string contains NUL".into()))
}

/// Read a **borrowed**, nullable C string. Does NOT free anything.
pub(crate) unsafe fn borrowed_c_string(ptr: *const c_char) -> Result<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(|s| Some(s.to_owned()))
        .map_err(|_| Error::InvalidUtf8)
}

/// Read a **borrowed**, nullable UCS-2 (UTF-16 big-endian, double-NUL
/// terminated) string, as returned by Gammu's unicode helpers.
pub(crate) unsafe fn borrowed_ucs2_string(ptr: *const u8) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let mut units = Vec::new();
    let mut offset = 0usize;
    loop {
        let (hi, lo) = unsafe { (*ptr.add(offset), *ptr.add(offset + 1)) };
        if hi == 0 && lo == 0 {
            break;
        }
        units.push(u16::from_be_bytes([hi, lo]));
        offset += 2;
    }
    Some(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyBackend;

    #[test]
    fn release_is_idempotent() {
        let dummy = DummyBackend::new();
        let backend: Arc<dyn Backend> = Arc::new(dummy.clone());
        let handle = OwnedHandle::new(backend.alloc_state_machine(), &backend).unwrap();

        let mut teardowns = 0;
        assert!(handle.release_with(|_| teardowns += 1));
        assert!(!handle.release_with(|_| teardowns += 1));
        drop(handle);

        assert_eq!(teardowns, 1);
        assert_eq!(dummy.frees(), 1);
        assert_eq!(dummy.invalid_frees(), 0);
    }

    #[test]
    fn released_handle_refuses_access() {
        let backend: Arc<dyn Backend> = Arc::new(DummyBackend::new());
        let handle = OwnedHandle::new(backend.alloc_state_machine(), &backend).unwrap();
        assert!(handle.as_ptr().is_ok());
        handle.release_with(|_| ());
        assert!(matches!(handle.as_ptr(), Err(Error::Released)));
    }

    #[test]
    fn null_is_rejected() {
        let backend: Arc<dyn Backend> = Arc::new(DummyBackend::new());
        let handle = OwnedHandle::<GSM_StateMachine>::new(std::ptr::null_mut(), &backend);
        assert!(matches!(handle, Err(Error::NullPointer)));
    }

    #[test]
    fn ucs2_pointer_stops_at_double_nul() {
        let buf = [0u8, b'O', 0, b'K', 0, 0, 0, b'X'];
        let s = unsafe { borrowed_ucs2_string(buf.as_ptr()) };
        assert_eq!(s.as_deref(), Some("OK"));
    }
}
