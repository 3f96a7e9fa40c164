#![allow(unsafe_code)]
//! SMS storage on the phone.

use gammu_sys::{GSM_SMSFolders, GSM_SMSMemoryStatus, GSM_SMSMessage};

use super::StateMachine;
use crate::error::Result;
use crate::sms::{self, SmsFolder, SmsMemoryStatus, SmsMessage};

impl StateMachine {
    /// A native message with library defaults, addressed at
    /// `(folder, location)`.
    fn addressed(&self, location: i32, folder: i32) -> GSM_SMSMessage {
        // SAFETY: plain data.
        let mut raw: GSM_SMSMessage = unsafe { std::mem::zeroed() };
        unsafe { self.lib.backend.set_default_sms_data(&raw mut raw) };
        raw.Location = location;
        raw.Folder = folder;
        raw
    }

    /// Read the message at `location` in `folder`. Multipart messages come
    /// back as all their stored parts.
    ///
    /// # Errors
    ///
    /// `Empty` for an unused location, `InvalidLocation` for a bad one.
    pub fn get_sms(&self, location: i32, folder: i32) -> Result<Vec<SmsMessage>> {
        let sm = self.ptr()?;
        let mut multi = sms::new_multi();
        multi.SMS[0] = self.addressed(location, folder);
        self.lib
            .check(unsafe { self.lib.backend.get_sms(sm, &raw mut *multi) })?;
        sms::multi_from_native(&multi)
    }

    /// Iterate stored messages. Pass `start = true` for the first call, then
    /// the location and folder of the previous result.
    ///
    /// # Errors
    ///
    /// `Empty` once there are no more messages.
    pub fn get_next_sms(&self, location: i32, folder: i32, start: bool) -> Result<Vec<SmsMessage>> {
        let sm = self.ptr()?;
        let mut multi = sms::new_multi();
        multi.SMS[0] = self.addressed(location, folder);
        self.lib
            .check(unsafe { self.lib.backend.get_next_sms(sm, &raw mut *multi, start) })?;
        sms::multi_from_native(&multi)
    }

    /// Overwrite the message at `message.location` in `message.folder`.
    /// Returns the `(folder, location)` the phone used.
    ///
    /// # Errors
    ///
    /// `InvalidLocation` for a bad address; marshalling errors.
    pub fn set_sms(&self, message: &SmsMessage) -> Result<(i32, i32)> {
        let sm = self.ptr()?;
        let mut raw = self.lib.marshalled(message.to_native()?)?;
        self.lib
            .check(unsafe { self.lib.backend.set_sms(sm, &raw mut raw) })?;
        Ok((raw.Folder, raw.Location))
    }

    /// Store `message` in the first free location. Returns the
    /// `(folder, location)` it was given.
    ///
    /// # Errors
    ///
    /// `Full` when the phone memory is full; marshalling errors.
    pub fn add_sms(&self, message: &SmsMessage) -> Result<(i32, i32)> {
        let sm = self.ptr()?;
        let mut raw = self.lib.marshalled(message.to_native()?)?;
        self.lib
            .check(unsafe { self.lib.backend.add_sms(sm, &raw mut raw) })?;
        tracing::debug!(
            machine = %self.id(),
            folder = raw.Folder,
            location = raw.Location,
            "sms stored"
        );
        Ok((raw.Folder, raw.Location))
    }

    /// Delete the message at `location` in `folder`.
    ///
    /// # Errors
    ///
    /// `Empty` if nothing is stored there, `InvalidLocation` for a bad
    /// address.
    pub fn delete_sms(&self, location: i32, folder: i32) -> Result<()> {
        let sm = self.ptr()?;
        let mut raw = self.addressed(location, folder);
        self.lib
            .check(unsafe { self.lib.backend.delete_sms(sm, &raw mut raw) })
    }

    /// Folders the phone offers.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn sms_folders(&self) -> Result<Vec<SmsFolder>> {
        let sm = self.ptr()?;
        // SAFETY: plain data.
        let mut raw: GSM_SMSFolders = unsafe { std::mem::zeroed() };
        self.lib
            .check(unsafe { self.lib.backend.sms_folders(sm, &raw mut raw) })?;
        sms::folders_from_native(&raw)
    }

    /// Used and free message slots.
    ///
    /// # Errors
    ///
    /// The native status.
    pub fn sms_status(&self) -> Result<SmsMemoryStatus> {
        let sm = self.ptr()?;
        // SAFETY: plain data.
        let mut raw: GSM_SMSMemoryStatus = unsafe { std::mem::zeroed() };
        self.lib
            .check(unsafe { self.lib.backend.sms_status(sm, &raw mut raw) })?;
        Ok(SmsMemoryStatus::from(raw))
    }
}
