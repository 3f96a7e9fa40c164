#![allow(unsafe_code)]
//! Phone status records: battery, signal, network, model, firmware and
//! security codes.

use std::ffi::c_char;

use gammu_sys::{
    GSM_BatteryCharge, GSM_NetworkInfo, GSM_PhoneModel, GSM_SecurityCode, GSM_SignalQuality,
};

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::ffi::borrowed_c_string;
use crate::marshal::{Marshalled, Writer, read_c_str, read_ucs2};
use crate::types::{
    BatteryType, ChargeState, GprsState, Manufacturer, NetworkState, SecurityCodeType,
};

/// Battery and power readings (`GSM_BatteryCharge`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryCharge {
    /// Chemistry.
    pub battery_type: BatteryType,
    /// Capacity in mAh.
    pub capacity: i32,
    /// Remaining charge, percent. `-1` when not reported.
    pub percent: i32,
    /// Charger state, `None` when not reported.
    pub charge_state: Option<ChargeState>,
    /// Battery voltage, mV.
    pub battery_voltage: i32,
    /// Charger voltage, mV.
    pub charge_voltage: i32,
    /// Charger current, mA.
    pub charge_current: i32,
    /// Phone current draw, mA.
    pub phone_current: i32,
    /// Battery temperature, degrees Celsius.
    pub battery_temperature: i32,
    /// Phone temperature, degrees Celsius.
    pub phone_temperature: i32,
}

impl BatteryCharge {
    pub(crate) fn from_native(raw: &GSM_BatteryCharge) -> Result<Self> {
        Ok(Self {
            battery_type: BatteryType::require(raw.BatteryType)?,
            capacity: raw.BatteryCapacity,
            percent: raw.BatteryPercent,
            charge_state: ChargeState::optional(raw.ChargeState)?,
            battery_voltage: raw.BatteryVoltage,
            charge_voltage: raw.ChargeVoltage,
            charge_current: raw.ChargeCurrent,
            phone_current: raw.PhoneCurrent,
            battery_temperature: raw.BatteryTemperature,
            phone_temperature: raw.PhoneTemperature,
        })
    }

    pub(crate) fn to_native(&self) -> GSM_BatteryCharge {
        GSM_BatteryCharge {
            BatteryType: self.battery_type.to_ffi(),
            BatteryCapacity: self.capacity,
            BatteryPercent: self.percent,
            ChargeState: self.charge_state.map_or(0, ChargeState::to_ffi),
            BatteryVoltage: self.battery_voltage,
            ChargeVoltage: self.charge_voltage,
            ChargeCurrent: self.charge_current,
            PhoneCurrent: self.phone_current,
            BatteryTemperature: self.battery_temperature,
            PhoneTemperature: self.phone_temperature,
        }
    }
}

/// Radio signal readings (`GSM_SignalQuality`). `-1` means not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalQuality {
    /// Signal strength, dBm.
    pub strength: i32,
    /// Signal strength, percent.
    pub percent: i32,
    /// Bit error rate, percent.
    pub bit_error_rate: i32,
}

impl From<GSM_SignalQuality> for SignalQuality {
    fn from(raw: GSM_SignalQuality) -> Self {
        Self {
            strength: raw.SignalStrength,
            percent: raw.SignalPercent,
            bit_error_rate: raw.BitErrorRate,
        }
    }
}

impl From<SignalQuality> for GSM_SignalQuality {
    fn from(q: SignalQuality) -> Self {
        Self {
            SignalStrength: q.strength,
            SignalPercent: q.percent,
            BitErrorRate: q.bit_error_rate,
        }
    }
}

/// Network registration (`GSM_NetworkInfo`).
///
/// Fields the linked library does not report are [`GprsState::Unknown`],
/// [`NetworkState::Unknown`] or `None`, never an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkInfo {
    /// Cell ID, hexadecimal.
    pub cid: String,
    /// Network code, e.g. `"246 01"`.
    pub network_code: String,
    /// Registration state.
    pub state: NetworkState,
    /// Location area code, hexadecimal.
    pub lac: String,
    /// Network name as reported by the phone.
    pub network_name: String,
    /// GPRS attach state.
    pub gprs: GprsState,
    /// Packet-domain cell ID.
    pub packet_cid: Option<String>,
    /// Packet-domain registration state.
    pub packet_state: NetworkState,
    /// Packet-domain location area code.
    pub packet_lac: Option<String>,
}

fn network_state(raw: u32) -> Result<NetworkState> {
    Ok(NetworkState::optional(raw)?.unwrap_or(NetworkState::Unknown))
}

fn c_chars_to_bytes(src: &[c_char]) -> Vec<u8> {
    src.iter().map(|c| c.to_ne_bytes()[0]).collect()
}

/// Cell IDs are plain C strings, or UCS-2 on old libraries.
fn read_cell_id(src: &[c_char], caps: Capabilities) -> Result<String> {
    if caps.unicode_cell_ids {
        Ok(read_ucs2(&c_chars_to_bytes(src)))
    } else {
        read_c_str(src)
    }
}

fn write_cell_id(
    w: &mut Writer,
    field: &'static str,
    dst: &mut [c_char],
    src: &str,
    caps: Capabilities,
) -> Result<()> {
    if caps.unicode_cell_ids {
        let mut buf = vec![0u8; dst.len()];
        w.ucs2(field, &mut buf, src)?;
        for (d, s) in dst.iter_mut().zip(buf) {
            *d = c_char::from_ne_bytes([s]);
        }
        Ok(())
    } else {
        w.c_str(field, dst, src)
    }
}

impl NetworkInfo {
    pub(crate) fn from_native(raw: &GSM_NetworkInfo, caps: Capabilities) -> Result<Self> {
        let (packet_cid, packet_state, packet_lac) = if caps.packet_network_info {
            (
                Some(read_c_str(&raw.PacketCID)?),
                network_state(raw.PacketState)?,
                Some(read_c_str(&raw.PacketLAC)?),
            )
        } else {
            (None, NetworkState::Unknown, None)
        };
        Ok(Self {
            cid: read_cell_id(&raw.CID, caps)?,
            network_code: read_c_str(&raw.NetworkCode)?,
            state: network_state(raw.State)?,
            lac: read_cell_id(&raw.LAC, caps)?,
            network_name: read_ucs2(&raw.NetworkName),
            gprs: if caps.gprs_state {
                GprsState::require(raw.GPRS)?
            } else {
                GprsState::Unknown
            },
            packet_cid,
            packet_state,
            packet_lac,
        })
    }

    pub(crate) fn to_native(&self, caps: Capabilities) -> Result<Marshalled<GSM_NetworkInfo>> {
        // SAFETY: plain data.
        let mut raw: GSM_NetworkInfo = unsafe { std::mem::zeroed() };
        let mut w = Writer::new();
        write_cell_id(&mut w, "network.cid", &mut raw.CID, &self.cid, caps)?;
        w.c_str("network.network_code", &mut raw.NetworkCode, &self.network_code)?;
        raw.State = self.state.to_ffi();
        write_cell_id(&mut w, "network.lac", &mut raw.LAC, &self.lac, caps)?;
        w.ucs2("network.network_name", &mut raw.NetworkName, &self.network_name)?;
        if caps.gprs_state {
            raw.GPRS = self.gprs.to_ffi();
        }
        if caps.packet_network_info {
            if let Some(cid) = &self.packet_cid {
                w.c_str("network.packet_cid", &mut raw.PacketCID, cid)?;
            }
            raw.PacketState = self.packet_state.to_ffi();
            if let Some(lac) = &self.packet_lac {
                w.c_str("network.packet_lac", &mut raw.PacketLAC, lac)?;
            }
        }
        Ok(w.finish(raw))
    }
}

/// Model description from the library's phone table (`GSM_PhoneModel`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhoneModel {
    /// Manufacturer, if the table names one.
    pub manufacturer: Option<Manufacturer>,
    /// Model name, e.g. `"6310i"`.
    pub model: String,
    /// Model code, e.g. `"NPL-1"`.
    pub number: String,
    /// Name used over infrared.
    pub irda_model: String,
}

impl PhoneModel {
    /// # Safety
    ///
    /// The string pointers in `raw` must be null or valid C strings.
    pub(crate) unsafe fn from_native(raw: &GSM_PhoneModel) -> Result<Self> {
        let text =
            |p| -> Result<String> { Ok(unsafe { borrowed_c_string(p) }?.unwrap_or_default()) };
        Ok(Self {
            manufacturer: Manufacturer::optional(raw.manufacturer)?,
            model: text(raw.model)?,
            number: text(raw.number)?,
            irda_model: text(raw.irdamodel)?,
        })
    }
}

/// Firmware version as reported by `GSM_GetFirmware`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Firmware {
    /// Version string.
    pub version: String,
    /// Build date string; may be empty.
    pub date: String,
    /// Version as a number, e.g. `5.22`.
    pub number: f64,
}

/// A code to enter at the phone's security prompt (`GSM_SecurityCode`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecurityCode {
    /// Which prompt the code answers.
    pub code_type: SecurityCodeType,
    /// The code itself.
    pub code: String,
    /// New PIN, required when answering a PUK prompt.
    pub new_pin: Option<String>,
}

impl SecurityCode {
    /// A code without a new PIN.
    #[must_use]
    pub fn new(code_type: SecurityCodeType, code: impl Into<String>) -> Self {
        Self {
            code_type,
            code: code.into(),
            new_pin: None,
        }
    }

    pub(crate) fn to_native(&self) -> Result<Marshalled<GSM_SecurityCode>> {
        // SAFETY: plain data.
        let mut raw: GSM_SecurityCode = unsafe { std::mem::zeroed() };
        let mut w = Writer::new();
        raw.Type = self.code_type.to_ffi();
        w.c_str("security.code", &mut raw.Code, &self.code)?;
        w.c_str(
            "security.new_pin",
            &mut raw.NewPIN,
            self.new_pin.as_deref().unwrap_or_default(),
        )?;
        Ok(w.finish(raw))
    }

    pub(crate) fn from_native(raw: &GSM_SecurityCode) -> Result<Self> {
        let new_pin = read_c_str(&raw.NewPIN)?;
        Ok(Self {
            code_type: SecurityCodeType::require(raw.Type)?,
            code: read_c_str(&raw.Code)?,
            new_pin: (!new_pin.is_empty()).then_some(new_pin),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::LibraryVersion;

    fn network() -> NetworkInfo {
        NetworkInfo {
            cid: "1A2B".into(),
            network_code: "246 01".into(),
            state: NetworkState::RoamingNetwork,
            lac: "00FF".into(),
            network_name: "Ómnitel".into(),
            gprs: GprsState::Attached,
            packet_cid: Some("1A2C".into()),
            packet_state: NetworkState::HomeNetwork,
            packet_lac: Some("0100".into()),
        }
    }

    #[test]
    fn network_round_trip() {
        let caps = Capabilities::current();
        let raw = network().to_native(caps).unwrap().exact().unwrap();
        assert_eq!(NetworkInfo::from_native(&raw, caps).unwrap(), network());
    }

    #[test]
    fn old_library_reports_unknown_not_empty() {
        let caps = Capabilities::for_version(LibraryVersion::new(1, 27, 0));
        let raw = network().to_native(caps).unwrap().exact().unwrap();
        let back = NetworkInfo::from_native(&raw, caps).unwrap();
        assert_eq!(back.gprs, GprsState::Unknown);
        assert_eq!(back.packet_state, NetworkState::Unknown);
        assert_eq!(back.packet_cid, None);
        assert_eq!(back.packet_lac, None);
        // Cell IDs travel as UCS-2 and still come back intact.
        assert_eq!(back.cid, "1A2B");
        assert_eq!(back.lac, "00FF");
    }

    #[test]
    fn between_gprs_and_packet_support() {
        let caps = Capabilities::for_version(LibraryVersion::new(1, 27, 93));
        let raw = network().to_native(caps).unwrap().exact().unwrap();
        let back = NetworkInfo::from_native(&raw, caps).unwrap();
        assert_eq!(back.gprs, GprsState::Attached);
        assert_eq!(back.packet_cid, None);
    }

    #[test]
    fn zero_state_is_unknown() {
        let raw: GSM_NetworkInfo = unsafe { std::mem::zeroed() };
        let info = NetworkInfo::from_native(&raw, Capabilities::current()).unwrap();
        assert_eq!(info.state, NetworkState::Unknown);
        assert_eq!(info.gprs, GprsState::Unknown);
    }

    #[test]
    fn battery_round_trip() {
        let b = BatteryCharge {
            battery_type: BatteryType::LiIon,
            capacity: 1200,
            percent: 80,
            charge_state: Some(ChargeState::BatteryCharging),
            battery_voltage: 4100,
            charge_voltage: 5000,
            charge_current: 300,
            phone_current: 120,
            battery_temperature: 31,
            phone_temperature: 35,
        };
        assert_eq!(BatteryCharge::from_native(&b.to_native()).unwrap(), b);
    }

    #[test]
    fn battery_rejects_unknown_enum() {
        let mut raw = BatteryCharge {
            battery_type: BatteryType::Unknown,
            capacity: 0,
            percent: -1,
            charge_state: None,
            battery_voltage: -1,
            charge_voltage: -1,
            charge_current: -1,
            phone_current: -1,
            battery_temperature: -1,
            phone_temperature: -1,
        }
        .to_native();
        raw.ChargeState = 42;
        assert!(BatteryCharge::from_native(&raw).is_err());
    }

    #[test]
    fn security_code_bounds() {
        let code = SecurityCode::new(SecurityCodeType::Pin, "1".repeat(20));
        let m = code.to_native().unwrap();
        assert_eq!(m.truncations[0].capacity, 15);

        let puk = SecurityCode {
            new_pin: Some("4321".into()),
            ..SecurityCode::new(SecurityCodeType::Puk, "12345678")
        };
        let raw = puk.to_native().unwrap().exact().unwrap();
        assert_eq!(SecurityCode::from_native(&raw).unwrap(), puk);
    }
}
