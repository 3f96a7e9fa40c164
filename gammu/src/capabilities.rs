//! Runtime feature set of the linked libGammu.
//!
//! Some record layouts changed between Gammu releases. Rather than
//! compiling one layout in, the context resolves a [`Capabilities`] value
//! once from the library's version string and every marshaller consults it
//! per field.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// First version whose `GSM_NetworkInfo` carries a GPRS state, and whose
/// config booleans are real `gboolean`s.
pub const GPRS_STATE_SINCE: u32 = 12792;
/// First version with packet-domain CID/state/LAC in `GSM_NetworkInfo`.
pub const PACKET_NETWORK_INFO_SINCE: u32 = 12796;

/// Parsed `major.minor.micro` version of the linked library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LibraryVersion {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Micro component.
    pub micro: u32,
}

impl LibraryVersion {
    /// Version compiled into `gammu-sys`.
    pub const BUNDLED: Self = Self::from_num(gammu_sys::VERSION_NUM);

    /// Build from components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    /// Inverse of [`num`](Self::num).
    #[must_use]
    pub const fn from_num(num: u32) -> Self {
        Self::new(num / 10000, (num / 100) % 100, num % 100)
    }

    /// `major * 10000 + minor * 100 + micro`, the encoding used by
    /// `VERSION_NUM` in `gammu-config.h`. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn num(self) -> u32 {
        self.major
            .saturating_mul(10000)
            .saturating_add(self.minor.saturating_mul(100))
            .saturating_add(self.micro)
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

impl FromStr for LibraryVersion {
    type Err = Error;

    /// Accepts `"1.42.0"`, `"1.42"` and trailing suffixes such as
    /// `"1.42.0-git"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::InvalidArgument(format!("unparsable library version {s:?}"));
        let mut parts = s.trim().splitn(3, '.');
        let mut next = |required: bool| -> Result<u32, Error> {
            match parts.next() {
                Some(p) => {
                    let digits: String = p.chars().take_while(char::is_ascii_digit).collect();
                    digits.parse().map_err(|_| bad())
                }
                None if required => Err(bad()),
                None => Ok(0),
            }
        };
        let major = next(true)?;
        let minor = next(true)?;
        let micro = next(false)?;
        if minor > 99 || micro > 99 {
            return Err(bad());
        }
        Ok(Self::new(major, minor, micro))
    }
}

/// Version-conditional behaviour, resolved once per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    /// `NetworkInfo::gprs` is reported.
    pub gprs_state: bool,
    /// Packet CID, state and LAC are reported.
    pub packet_network_info: bool,
    /// CID and LAC are UCS-2 encoded (old releases only).
    pub unicode_cell_ids: bool,
    /// `SyncTime`, `LockDevice` and `StartInfo` in `GSM_Config` are booleans.
    pub boolean_config_flags: bool,
}

impl Capabilities {
    /// Derive the capability set for a library version.
    #[must_use]
    pub const fn for_version(version: LibraryVersion) -> Self {
        let n = version.num();
        Self {
            gprs_state: n >= GPRS_STATE_SINCE,
            packet_network_info: n >= PACKET_NETWORK_INFO_SINCE,
            unicode_cell_ids: n < GPRS_STATE_SINCE,
            boolean_config_flags: n >= GPRS_STATE_SINCE,
        }
    }

    /// Everything a current library provides.
    #[must_use]
    pub const fn current() -> Self {
        Self::for_version(LibraryVersion::BUNDLED)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_encoding() {
        let v: LibraryVersion = "1.27.96".parse().unwrap();
        assert_eq!(v.num(), 12796);
        assert_eq!(LibraryVersion::from_num(12796), v);
        assert_eq!(v.to_string(), "1.27.96");
        assert_eq!(LibraryVersion::BUNDLED, LibraryVersion::new(1, 42, 0));
    }

    #[test]
    fn version_parsing_is_lenient_about_suffixes() {
        assert_eq!(
            "1.42.0-git".parse::<LibraryVersion>().unwrap(),
            LibraryVersion::new(1, 42, 0)
        );
        assert_eq!(
            "1.40".parse::<LibraryVersion>().unwrap(),
            LibraryVersion::new(1, 40, 0)
        );
        assert!("gammu".parse::<LibraryVersion>().is_err());
        assert!("1.200.0".parse::<LibraryVersion>().is_err());
    }

    #[test]
    fn huge_major_saturates() {
        let v: LibraryVersion = "999999.1.1".parse().unwrap();
        assert_eq!(v.num(), u32::MAX);
        assert_eq!(LibraryVersion::new(u32::MAX, 99, 99).num(), u32::MAX);
        assert_eq!(LibraryVersion::new(429_496, 72, 95).num(), u32::MAX);
        assert!(Capabilities::for_version(v).packet_network_info);
    }

    #[test]
    fn thresholds() {
        let old = Capabilities::for_version(LibraryVersion::new(1, 27, 91));
        assert!(!old.gprs_state && !old.packet_network_info);
        assert!(old.unicode_cell_ids && !old.boolean_config_flags);

        let mid = Capabilities::for_version(LibraryVersion::new(1, 27, 92));
        assert!(mid.gprs_state && !mid.packet_network_info);
        assert!(!mid.unicode_cell_ids && mid.boolean_config_flags);

        let new = Capabilities::for_version(LibraryVersion::new(1, 27, 96));
        assert!(new.packet_network_info);
        assert_eq!(Capabilities::default(), Capabilities::current());
    }
}
