#![allow(unsafe_code)]
//! Security and phone information queries.

use std::ffi::c_char;

use gammu_sys::{GSM_BatteryCharge, GSM_NetworkInfo, GSM_SecurityCodeType, GSM_SignalQuality};

use super::StateMachine;
use crate::backend::{FIRMWARE_DATE_LEN, FIRMWARE_VERSION_LEN, PhoneString};
use crate::error::{Error, Result};
use crate::info::{BatteryCharge, Firmware, NetworkInfo, PhoneModel, SecurityCode, SignalQuality};
use crate::marshal::read_c_str;
use crate::types::SecurityCodeType;

impl StateMachine {
    /// Answer the phone's security prompt.
    ///
    /// # Errors
    ///
    /// `SecurityError` for a wrong code; [`Error::Truncated`] for a code too
    /// long for the native record.
    pub fn enter_security_code(&self, code: &SecurityCode) -> Result<()> {
        let sm = self.ptr()?;
        let mut raw = self.lib.marshalled(code.to_native()?)?;
        self.lib
            .check(unsafe { self.lib.backend.enter_security_code(sm, &raw mut raw) })?;
        tracing::debug!(machine = %self.id(), kind = ?code.code_type, "security code accepted");
        Ok(())
    }

    /// Which code, if any, the phone is waiting for.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn security_status(&self) -> Result<SecurityCodeType> {
        let sm = self.ptr()?;
        let mut raw: GSM_SecurityCodeType = 0;
        self.lib
            .check(unsafe { self.lib.backend.security_status(sm, &raw mut raw) })?;
        SecurityCodeType::require(raw)
    }

    /// Battery state.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn battery_charge(&self) -> Result<BatteryCharge> {
        let sm = self.ptr()?;
        // SAFETY: plain data.
        let mut raw: GSM_BatteryCharge = unsafe { std::mem::zeroed() };
        self.lib
            .check(unsafe { self.lib.backend.battery_charge(sm, &raw mut raw) })?;
        BatteryCharge::from_native(&raw)
    }

    /// Firmware version, date and numeric version.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn firmware(&self) -> Result<Firmware> {
        let sm = self.ptr()?;
        let mut version = [0 as c_char; FIRMWARE_VERSION_LEN];
        let mut date = [0 as c_char; FIRMWARE_DATE_LEN];
        let mut number = 0.0;
        self.lib.check(unsafe {
            self.lib
                .backend
                .firmware(sm, version.as_mut_ptr(), date.as_mut_ptr(), &raw mut number)
        })?;
        Ok(Firmware {
            version: read_c_str(&version)?,
            date: read_c_str(&date)?,
            number,
        })
    }

    fn phone_string(&self, which: PhoneString) -> Result<String> {
        let sm = self.ptr()?;
        let mut buf = vec![0 as c_char; which.buffer_len()];
        self.lib
            .check(unsafe { self.lib.backend.phone_string(sm, which, buf.as_mut_ptr()) })?;
        read_c_str(&buf)
    }

    /// Hardware revision.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn hardware(&self) -> Result<String> {
        self.phone_string(PhoneString::Hardware)
    }

    /// IMEI (serial number).
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn imei(&self) -> Result<String> {
        self.phone_string(PhoneString::Imei)
    }

    /// Month of manufacture.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn manufacture_month(&self) -> Result<String> {
        self.phone_string(PhoneString::ManufactureMonth)
    }

    /// Manufacturer name.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn manufacturer(&self) -> Result<String> {
        self.phone_string(PhoneString::Manufacturer)
    }

    /// Model code as reported by the phone.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn model(&self) -> Result<String> {
        self.phone_string(PhoneString::Model)
    }

    /// Product code.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn product_code(&self) -> Result<String> {
        self.phone_string(PhoneString::ProductCode)
    }

    /// Model description from the library's phone database.
    ///
    /// # Errors
    ///
    /// [`Error::NullPointer`] if the library has no model record.
    pub fn model_info(&self) -> Result<PhoneModel> {
        let sm = self.ptr()?;
        let raw = unsafe { self.lib.backend.model_info(sm) };
        if raw.is_null() {
            return Err(Error::NullPointer);
        }
        unsafe { PhoneModel::from_native(&*raw) }
    }

    /// Current network registration.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn network_info(&self) -> Result<NetworkInfo> {
        let sm = self.ptr()?;
        // SAFETY: plain data.
        let mut raw: GSM_NetworkInfo = unsafe { std::mem::zeroed() };
        self.lib
            .check(unsafe { self.lib.backend.network_info(sm, &raw mut raw) })?;
        NetworkInfo::from_native(&raw, self.lib.capabilities())
    }

    /// Signal strength.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn signal_quality(&self) -> Result<SignalQuality> {
        let sm = self.ptr()?;
        // SAFETY: plain data.
        let mut raw: GSM_SignalQuality = unsafe { std::mem::zeroed() };
        self.lib
            .check(unsafe { self.lib.backend.signal_quality(sm, &raw mut raw) })?;
        Ok(SignalQuality::from(raw))
    }
}
