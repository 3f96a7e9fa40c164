//! Shared machinery for converting records to and from fixed-layout native
//! structs.
//!
//! Writing never overflows: text longer than a buffer allows is cut to the
//! buffer's capacity (one unit is always kept for the terminator) and every
//! cut is recorded as a [`Truncation`]. What happens next is decided by the
//! context's [`TruncationPolicy`].

use std::ffi::c_char;
use std::fmt;

use crate::error::{Error, Result};

/// One field that did not fit its native buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Truncation {
    /// Dotted field path, e.g. `"sms.text"`.
    pub field: &'static str,
    /// Units that fit (bytes, UTF-16 units or array elements).
    pub capacity: usize,
    /// Units the caller supplied.
    pub requested: usize,
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} holds {} but {} were given",
            self.field, self.capacity, self.requested
        )
    }
}

/// What to do when a value had to be truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TruncationPolicy {
    /// Fail with [`Error::Truncated`] before anything reaches the library.
    #[default]
    Reject,
    /// Log a warning and send the truncated value.
    Warn,
}

/// A native value plus everything that was cut while producing it.
#[derive(Debug, Clone)]
#[must_use]
pub struct Marshalled<T> {
    /// The native value.
    pub value: T,
    /// Truncations, in field order. Empty when the conversion was lossless.
    pub truncations: Vec<Truncation>,
}

impl<T> Marshalled<T> {
    /// Whether nothing was cut.
    #[must_use]
    pub fn is_lossless(&self) -> bool {
        self.truncations.is_empty()
    }

    /// The value, or the first truncation as an error.
    pub fn exact(self) -> Result<T> {
        self.apply(TruncationPolicy::Reject)
    }

    /// Apply `policy` to the recorded truncations.
    pub fn apply(self, policy: TruncationPolicy) -> Result<T> {
        match (policy, self.truncations.into_iter().next()) {
            (_, None) => Ok(self.value),
            (TruncationPolicy::Reject, Some(first)) => Err(Error::Truncated(first)),
            (TruncationPolicy::Warn, Some(first)) => {
                tracing::warn!(truncation = %first, "value truncated to fit native buffer");
                Ok(self.value)
            }
        }
    }

    /// Map the value, keeping the truncation list.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Marshalled<U> {
        Marshalled {
            value: f(self.value),
            truncations: self.truncations,
        }
    }
}

/// Accumulates truncations while a record is being written.
#[derive(Debug, Default)]
pub(crate) struct Writer {
    truncations: Vec<Truncation>,
}

impl Writer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn finish<T>(self, value: T) -> Marshalled<T> {
        Marshalled {
            value,
            truncations: self.truncations,
        }
    }

    fn note(&mut self, field: &'static str, capacity: usize, requested: usize) {
        self.truncations.push(Truncation {
            field,
            capacity,
            requested,
        });
    }

    /// Clamp an array length to `capacity`.
    pub(crate) fn count(
        &mut self,
        field: &'static str,
        capacity: usize,
        requested: usize,
    ) -> usize {
        if requested > capacity {
            self.note(field, capacity, requested);
            capacity
        } else {
            requested
        }
    }

    /// Write a NUL-terminated C string into `dst`, zero-padding the rest.
    pub(crate) fn c_str(
        &mut self,
        field: &'static str,
        dst: &mut [c_char],
        src: &str,
    ) -> Result<()> {
        reject_nul(field, src)?;
        let capacity = dst.len().saturating_sub(1);
        let mut end = src.len().min(capacity);
        while !src.is_char_boundary(end) {
            end -= 1;
        }
        if end < src.len() {
            self.note(field, capacity, src.len());
        }
        dst.fill(0);
        for (d, s) in dst.iter_mut().zip(&src.as_bytes()[..end]) {
            *d = c_char::from_ne_bytes([*s]);
        }
        Ok(())
    }

    /// Write a UCS-2 string (UTF-16 big-endian, double-NUL terminated) into
    /// `dst`. Returns the number of UTF-16 units written.
    pub(crate) fn ucs2(&mut self, field: &'static str, dst: &mut [u8], src: &str) -> Result<usize> {
        reject_nul(field, src)?;
        let units: Vec<u16> = src.encode_utf16().collect();
        let capacity = (dst.len() / 2).saturating_sub(1);
        let mut end = units.len().min(capacity);
        // Never keep half of a surrogate pair.
        if end < units.len() && end > 0 && is_high_surrogate(units[end - 1]) {
            end -= 1;
        }
        if end < units.len() {
            self.note(field, capacity, units.len());
        }
        dst.fill(0);
        for (chunk, unit) in dst.chunks_exact_mut(2).zip(&units[..end]) {
            chunk.copy_from_slice(&unit.to_be_bytes());
        }
        Ok(end)
    }

    /// Copy raw bytes into `dst`. Returns the number of bytes written.
    pub(crate) fn bytes(&mut self, field: &'static str, dst: &mut [u8], src: &[u8]) -> usize {
        let n = self.count(field, dst.len(), src.len());
        dst.fill(0);
        dst[..n].copy_from_slice(&src[..n]);
        n
    }
}

const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

fn reject_nul(field: &'static str, src: &str) -> Result<()> {
    if src.contains('\0') {
        Err(Error::InvalidArgument(format!("{field} contains NUL")))
    } else {
        Ok(())
    }
}

/// Read a C string from a fixed buffer: up to the first NUL, or the whole
/// buffer if the native side filled it completely.
pub(crate) fn read_c_str(src: &[c_char]) -> Result<String> {
    let bytes: Vec<u8> = src
        .iter()
        .map(|c| c.to_ne_bytes()[0])
        .take_while(|b| *b != 0)
        .collect();
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
}

/// Read a UCS-2 string from a fixed buffer, bounded by the buffer length.
pub(crate) fn read_ucs2(src: &[u8]) -> String {
    let units: Vec<u16> = src
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .take_while(|u| *u != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

/// Encode `src` as a heap UCS-2 buffer with terminator.
pub(crate) fn encode_ucs2(src: &str) -> Vec<u8> {
    let mut out: Vec<u8> = src.encode_utf16().flat_map(u16::to_be_bytes).collect();
    out.extend_from_slice(&[0, 0]);
    out
}

/// Interpret a `gboolean`.
#[inline]
pub(crate) const fn from_gboolean(v: gammu_sys::gboolean) -> bool {
    v != 0
}

/// Produce a `gboolean`.
#[inline]
pub(crate) fn to_gboolean(v: bool) -> gammu_sys::gboolean {
    gammu_sys::gboolean::from(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_buf<const N: usize>() -> [c_char; N] {
        [0; N]
    }

    #[test]
    fn c_str_fits_exactly() {
        let mut w = Writer::new();
        let mut buf = c_buf::<6>();
        w.c_str("t", &mut buf, "hello").unwrap();
        assert_eq!(read_c_str(&buf).unwrap(), "hello");
        assert!(w.finish(()).is_lossless());
    }

    #[test]
    fn c_str_truncates_to_capacity_minus_one() {
        let mut w = Writer::new();
        let mut buf = c_buf::<6>();
        w.c_str("t", &mut buf, "hello world").unwrap();
        assert_eq!(read_c_str(&buf).unwrap(), "hello");
        assert_eq!(buf[5], 0);
        let m = w.finish(());
        assert_eq!(
            m.truncations,
            vec![Truncation {
                field: "t",
                capacity: 5,
                requested: 11
            }]
        );
    }

    #[test]
    fn c_str_cuts_at_char_boundary() {
        let mut w = Writer::new();
        let mut buf = c_buf::<4>();
        // 3 bytes fit; the second 'é' would need bytes 3 and 4.
        w.c_str("t", &mut buf, "aéé").unwrap();
        assert_eq!(read_c_str(&buf).unwrap(), "aé");
        assert!(!w.finish(()).is_lossless());
    }

    #[test]
    fn c_str_rejects_interior_nul() {
        let mut buf = c_buf::<8>();
        assert!(matches!(
            Writer::new().c_str("t", &mut buf, "a\0b"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn ucs2_truncates_and_reports() {
        let mut w = Writer::new();
        let mut buf = [0u8; 8]; // 3 units + terminator
        let written = w.ucs2("t", &mut buf, "abcdef").unwrap();
        assert_eq!(written, 3);
        assert_eq!(read_ucs2(&buf), "abc");
        assert_eq!(&buf[6..], &[0, 0]);
        assert_eq!(w.finish(()).truncations[0].capacity, 3);
    }

    #[test]
    fn ucs2_never_splits_surrogate_pair() {
        let mut w = Writer::new();
        let mut buf = [0u8; 8]; // 3 units
        // 'a', 'b', then U+1F600 as two units.
        let written = w.ucs2("t", &mut buf, "ab\u{1F600}").unwrap();
        assert_eq!(written, 2);
        assert_eq!(read_ucs2(&buf), "ab");
    }

    #[test]
    fn ucs2_round_trips_non_bmp() {
        let mut w = Writer::new();
        let mut buf = [0u8; 16];
        w.ucs2("t", &mut buf, "x\u{1F600}y").unwrap();
        assert_eq!(read_ucs2(&buf), "x\u{1F600}y");
        assert!(w.finish(()).is_lossless());
    }

    #[test]
    fn read_without_terminator_stays_in_bounds() {
        let buf: [c_char; 3] = [b'a' as c_char, b'b' as c_char, b'c' as c_char];
        assert_eq!(read_c_str(&buf).unwrap(), "abc");
        assert_eq!(read_ucs2(&[0, b'h', 0, b'i']), "hi");
    }

    #[test]
    fn arrays_clamp_and_report() {
        let mut w = Writer::new();
        assert_eq!(w.count("parts", 50, 51), 50);
        assert_eq!(w.count("parts", 50, 3), 3);
        assert_eq!(w.finish(()).truncations.len(), 1);
    }

    #[test]
    fn policy_decides() {
        let mut w = Writer::new();
        w.count("x", 1, 2);
        let m = w.finish(7);
        assert!(matches!(m.clone().exact(), Err(Error::Truncated(_))));
        assert_eq!(m.apply(TruncationPolicy::Warn).unwrap(), 7);
    }
}
