#![allow(unsafe_code)]
//! SMS records: messages, user data headers, SMSC settings, folders and
//! decoded multipart messages.

use gammu_sys::{
    GSM_MAX_8BIT_SMS_LENGTH, GSM_MAX_MULTI_SMS, GSM_MultiPartSMSEntry, GSM_MultiPartSMSInfo,
    GSM_MultiSMSMessage, GSM_SMSC, GSM_SMSFolders, GSM_SMSMemoryStatus, GSM_SMSMessage,
    GSM_UDHHeader,
};

use crate::datetime::DateTime;
use crate::error::{Error, Result};
use crate::ffi::borrowed_ucs2_string;
use crate::marshal::{Marshalled, Writer, from_gboolean, read_ucs2, to_gboolean};
use crate::types::{
    MemoryType, MultiPartId, SmsCoding, SmsFormat, SmsPduType, SmsState, UdhType,
    optional_to_ffi,
};

/// Most parts a multipart message can have.
pub const MAX_MULTI_SMS: usize = GSM_MAX_MULTI_SMS as usize;
/// Most recipients besides the main number.
pub const MAX_OTHER_NUMBERS: usize = gammu_sys::GSM_SMS_OTHER_NUMBERS as usize;
const MAX_DATA: usize = GSM_MAX_8BIT_SMS_LENGTH as usize;
const MAX_UDH: usize = gammu_sys::GSM_MAX_UDH_LENGTH as usize;
const MAX_FOLDERS: usize = gammu_sys::GSM_MAX_SMS_FOLDERS as usize;
/// Relative validity "maximum time" (`SMS_VALID_Max_Time`).
pub const VALIDITY_MAX_TIME: u32 = 255;

fn len_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn clamp_len(n: i32, max: usize) -> usize {
    usize::try_from(n).unwrap_or(0).min(max)
}

/// User data header (`GSM_UDHHeader`). `data` is the raw header bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UdhHeader {
    /// Header kind.
    pub udh_type: UdhType,
    /// Raw header, at most 140 bytes.
    pub data: Vec<u8>,
    /// 8-bit concatenation reference, `-1` if none.
    pub id8: i32,
    /// 16-bit concatenation reference, `-1` if none.
    pub id16: i32,
    /// 1-based part number, `-1` if none.
    pub part_number: i32,
    /// Total parts, `-1` if none.
    pub all_parts: i32,
}

impl Default for UdhHeader {
    fn default() -> Self {
        Self {
            udh_type: UdhType::NoUdh,
            data: Vec::new(),
            id8: -1,
            id16: -1,
            part_number: -1,
            all_parts: -1,
        }
    }
}

impl UdhHeader {
    fn write(&self, w: &mut Writer, raw: &mut GSM_UDHHeader) {
        raw.Type = self.udh_type.to_ffi();
        raw.Length = w.bytes("udh.data", &mut raw.Text, &self.data);
        raw.ID8bit = self.id8;
        raw.ID16bit = self.id16;
        raw.PartNumber = self.part_number;
        raw.AllParts = self.all_parts;
    }

    /// Produce the native record. Data beyond the native buffer is cut and
    /// reported.
    pub fn to_native(&self) -> Marshalled<GSM_UDHHeader> {
        // SAFETY: plain data.
        let mut raw: GSM_UDHHeader = unsafe { std::mem::zeroed() };
        let mut w = Writer::new();
        self.write(&mut w, &mut raw);
        w.finish(raw)
    }

    /// Read a native record.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownValue`] for an unknown header type.
    pub fn from_native(raw: &GSM_UDHHeader) -> Result<Self> {
        let len = raw.Length.min(MAX_UDH);
        Ok(Self {
            udh_type: UdhType::require(raw.Type)?,
            data: raw.Text[..len].to_vec(),
            id8: raw.ID8bit,
            id16: raw.ID16bit,
            part_number: raw.PartNumber,
            all_parts: raw.AllParts,
        })
    }
}

/// How long the SMSC keeps an undelivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmsValidity {
    /// Not specified.
    NotAvailable,
    /// GSM 03.40 relative validity value (0-255).
    Relative(u32),
}

/// Message centre settings (`GSM_SMSC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Smsc {
    /// Location of the SMSC entry in the phone, 1-based.
    pub location: i32,
    /// Display name.
    pub name: String,
    /// SMSC number.
    pub number: String,
    /// Default recipient number.
    pub default_number: String,
    /// Message format, `None` when not reported.
    pub format: Option<SmsFormat>,
    /// Validity period.
    pub validity: SmsValidity,
}

impl Default for Smsc {
    fn default() -> Self {
        Self {
            location: 1,
            name: String::new(),
            number: String::new(),
            default_number: String::new(),
            format: Some(SmsFormat::Text),
            validity: SmsValidity::Relative(VALIDITY_MAX_TIME),
        }
    }
}

impl Smsc {
    fn write(&self, w: &mut Writer, raw: &mut GSM_SMSC) -> Result<()> {
        raw.Location = self.location;
        w.ucs2("smsc.name", &mut raw.Name, &self.name)?;
        w.ucs2("smsc.number", &mut raw.Number, &self.number)?;
        w.ucs2("smsc.default_number", &mut raw.DefaultNumber, &self.default_number)?;
        raw.Format = optional_to_ffi(self.format.map(SmsFormat::to_ffi));
        match self.validity {
            SmsValidity::NotAvailable => {
                raw.Validity.Format = gammu_sys::SMS_Validity_NotAvailable;
                raw.Validity.Relative = 0;
            }
            SmsValidity::Relative(v) => {
                raw.Validity.Format = gammu_sys::SMS_Validity_RelativeFormat;
                raw.Validity.Relative = v;
            }
        }
        Ok(())
    }

    fn from_native(raw: &GSM_SMSC) -> Result<Self> {
        let validity = match raw.Validity.Format {
            gammu_sys::SMS_Validity_RelativeFormat => SmsValidity::Relative(raw.Validity.Relative),
            0 | gammu_sys::SMS_Validity_NotAvailable => SmsValidity::NotAvailable,
            other => {
                return Err(Error::UnknownValue {
                    what: "SmsValidity",
                    value: i64::from(other),
                });
            }
        };
        Ok(Self {
            location: raw.Location,
            name: read_ucs2(&raw.Name),
            number: read_ucs2(&raw.Number),
            default_number: read_ucs2(&raw.DefaultNumber),
            format: SmsFormat::optional(raw.Format)?,
            validity,
        })
    }
}

/// Message payload. Must agree with [`SmsMessage::coding`]:
/// [`SmsCoding::EightBit`] carries `Data`, every other coding `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmsBody {
    /// Decoded text, at most 160 UTF-16 units.
    Text(String),
    /// Binary payload, at most 140 bytes.
    Data(Vec<u8>),
}

impl Default for SmsBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// One SMS (`GSM_SMSMessage`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsMessage {
    /// Replace-short-message type, 0 for none.
    pub replace_message: u8,
    /// Ask the SMSC to reject duplicates.
    pub reject_duplicates: bool,
    /// User data header.
    pub udh: UdhHeader,
    /// Sender or recipient.
    pub number: String,
    /// Additional recipients, at most 5.
    pub other_numbers: Vec<String>,
    /// Message centre.
    pub smsc: Smsc,
    /// Storage the message lives in, `None` when not reported.
    pub memory: Option<MemoryType>,
    /// Location within the folder.
    pub location: i32,
    /// Folder index.
    pub folder: i32,
    /// Whether `folder` is an inbox.
    pub inbox_folder: bool,
    /// Read/sent status, `None` when not reported.
    pub state: Option<SmsState>,
    /// Name (for templates and some phones' folders).
    pub name: String,
    /// Payload.
    pub body: SmsBody,
    /// PDU kind.
    pub pdu: SmsPduType,
    /// Payload coding.
    pub coding: SmsCoding,
    /// Send or receive time.
    pub date_time: DateTime,
    /// SMSC timestamp (status reports).
    pub smsc_time: DateTime,
    /// Delivery status (status reports).
    pub delivery_status: u8,
    /// Ask the recipient to reply through the same SMSC.
    pub reply_via_same_smsc: bool,
    /// Message class 0-3, `None` for no class.
    pub class: Option<u8>,
    /// Message reference.
    pub message_reference: u8,
}

impl Default for SmsMessage {
    /// The same defaults `GSM_SetDefaultSMSData` applies.
    fn default() -> Self {
        Self {
            replace_message: 0,
            reject_duplicates: false,
            udh: UdhHeader::default(),
            number: String::new(),
            other_numbers: Vec::new(),
            smsc: Smsc::default(),
            memory: None,
            location: 0,
            folder: 0,
            inbox_folder: false,
            state: None,
            name: String::new(),
            body: SmsBody::default(),
            pdu: SmsPduType::Submit,
            coding: SmsCoding::DefaultNoCompression,
            date_time: DateTime::default(),
            smsc_time: DateTime::default(),
            delivery_status: 0,
            reply_via_same_smsc: false,
            class: None,
            message_reference: 0,
        }
    }
}

impl SmsMessage {
    /// An outgoing text message.
    #[must_use]
    pub fn text_message(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            body: SmsBody::Text(text.into()),
            ..Self::default()
        }
    }

    /// The text payload, if this is not a binary message.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            SmsBody::Text(t) => Some(t),
            SmsBody::Data(_) => None,
        }
    }

    fn check_body(&self) -> Result<()> {
        let binary = self.coding == SmsCoding::EightBit;
        match (&self.body, binary) {
            (SmsBody::Data(_), true) | (SmsBody::Text(_), false) => Ok(()),
            (SmsBody::Data(_), false) => Err(Error::InvalidArgument(format!(
                "binary body with {:?} coding",
                self.coding
            ))),
            (SmsBody::Text(_), true) => {
                Err(Error::InvalidArgument("text body with 8-bit coding".into()))
            }
        }
    }

    fn write(&self, w: &mut Writer, raw: &mut GSM_SMSMessage) -> Result<()> {
        self.check_body()?;
        raw.ReplaceMessage = self.replace_message;
        raw.RejectDuplicates = to_gboolean(self.reject_duplicates);
        self.udh.write(w, &mut raw.UDH);
        w.ucs2("sms.number", &mut raw.Number, &self.number)?;
        let others = w.count("sms.other_numbers", MAX_OTHER_NUMBERS, self.other_numbers.len());
        for (dst, src) in raw.OtherNumbers.iter_mut().zip(&self.other_numbers[..others]) {
            w.ucs2("sms.other_numbers", dst, src)?;
        }
        raw.OtherNumbersNum = len_i32(others);
        self.smsc.write(w, &mut raw.SMSC)?;
        raw.Memory = optional_to_ffi(self.memory.map(MemoryType::to_ffi));
        raw.Location = self.location;
        raw.Folder = self.folder;
        raw.InboxFolder = to_gboolean(self.inbox_folder);
        raw.State = optional_to_ffi(self.state.map(SmsState::to_ffi));
        w.ucs2("sms.name", &mut raw.Name, &self.name)?;
        let length = match &self.body {
            SmsBody::Text(text) => w.ucs2("sms.text", &mut raw.Text, text)?,
            SmsBody::Data(data) => {
                raw.Text.fill(0);
                w.bytes("sms.data", &mut raw.Text[..MAX_DATA], data)
            }
        };
        raw.Length = len_i32(length);
        raw.PDU = self.pdu.to_ffi();
        raw.Coding = self.coding.to_ffi();
        raw.DateTime = self.date_time.into();
        raw.SMSCTime = self.smsc_time.into();
        raw.DeliveryStatus = self.delivery_status;
        raw.ReplyViaSameSMSC = to_gboolean(self.reply_via_same_smsc);
        raw.Class = match self.class {
            None => -1,
            Some(c) => i8::try_from(c)
                .map_err(|_| Error::InvalidArgument(format!("message class {c}")))?,
        };
        raw.MessageReference = self.message_reference;
        Ok(())
    }

    /// Produce the native record.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the body does not match the coding, a
    /// string contains NUL, or the class does not fit.
    pub fn to_native(&self) -> Result<Marshalled<GSM_SMSMessage>> {
        // SAFETY: plain data.
        let mut raw: GSM_SMSMessage = unsafe { std::mem::zeroed() };
        let mut w = Writer::new();
        self.write(&mut w, &mut raw)?;
        Ok(w.finish(raw))
    }

    /// Read a native record.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownValue`] for enum values this crate does not know.
    pub fn from_native(raw: &GSM_SMSMessage) -> Result<Self> {
        let coding = SmsCoding::require(raw.Coding)?;
        let body = if coding == SmsCoding::EightBit {
            SmsBody::Data(raw.Text[..clamp_len(raw.Length, MAX_DATA)].to_vec())
        } else {
            SmsBody::Text(read_ucs2(&raw.Text))
        };
        let others = clamp_len(raw.OtherNumbersNum, MAX_OTHER_NUMBERS);
        Ok(Self {
            replace_message: raw.ReplaceMessage,
            reject_duplicates: from_gboolean(raw.RejectDuplicates),
            udh: UdhHeader::from_native(&raw.UDH)?,
            number: read_ucs2(&raw.Number),
            other_numbers: raw.OtherNumbers[..others].iter().map(|n| read_ucs2(n)).collect(),
            smsc: Smsc::from_native(&raw.SMSC)?,
            memory: MemoryType::optional(raw.Memory)?,
            location: raw.Location,
            folder: raw.Folder,
            inbox_folder: from_gboolean(raw.InboxFolder),
            state: SmsState::optional(raw.State)?,
            name: read_ucs2(&raw.Name),
            body,
            pdu: SmsPduType::require(raw.PDU)?,
            coding,
            date_time: raw.DateTime.into(),
            smsc_time: raw.SMSCTime.into(),
            delivery_status: raw.DeliveryStatus,
            reply_via_same_smsc: from_gboolean(raw.ReplyViaSameSMSC),
            class: u8::try_from(raw.Class).ok(),
            message_reference: raw.MessageReference,
        })
    }
}

/// A zeroed multipart container on the heap.
pub(crate) fn new_multi() -> Box<GSM_MultiSMSMessage> {
    // SAFETY: plain data; all-zero is valid.
    unsafe { Box::<GSM_MultiSMSMessage>::new_zeroed().assume_init() }
}

/// Pack up to 50 messages into a native multipart container.
pub(crate) fn multi_to_native(
    parts: &[SmsMessage],
) -> Result<Marshalled<Box<GSM_MultiSMSMessage>>> {
    let mut raw = new_multi();
    let mut w = Writer::new();
    let n = w.count("multi_sms.parts", MAX_MULTI_SMS, parts.len());
    for (dst, src) in raw.SMS.iter_mut().zip(&parts[..n]) {
        src.write(&mut w, dst)?;
    }
    raw.Number = len_i32(n);
    Ok(w.finish(raw))
}

/// Unpack the first `Number` messages of a native multipart container.
pub(crate) fn multi_from_native(raw: &GSM_MultiSMSMessage) -> Result<Vec<SmsMessage>> {
    raw.SMS[..clamp_len(raw.Number, MAX_MULTI_SMS)]
        .iter()
        .map(SmsMessage::from_native)
        .collect()
}

/// One message folder (`GSM_OneSMSFolder`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsFolder {
    /// Received messages land here.
    pub inbox: bool,
    /// Sent messages land here.
    pub outbox: bool,
    /// Backing storage.
    pub memory: Option<MemoryType>,
    /// Display name.
    pub name: String,
}

pub(crate) fn folders_from_native(raw: &GSM_SMSFolders) -> Result<Vec<SmsFolder>> {
    raw.Folder[..clamp_len(raw.Number, MAX_FOLDERS)]
        .iter()
        .map(|f| {
            Ok(SmsFolder {
                inbox: from_gboolean(f.InboxFolder),
                outbox: from_gboolean(f.OutboxFolder),
                memory: MemoryType::optional(f.Memory)?,
                name: read_ucs2(&f.Name),
            })
        })
        .collect()
}

/// Message storage occupancy (`GSM_SMSMemoryStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsMemoryStatus {
    /// Unread messages on the SIM.
    pub sim_unread: i32,
    /// Messages on the SIM.
    pub sim_used: i32,
    /// SIM capacity.
    pub sim_size: i32,
    /// Stored templates.
    pub templates_used: i32,
    /// Unread messages in phone memory.
    pub phone_unread: i32,
    /// Messages in phone memory.
    pub phone_used: i32,
    /// Phone memory capacity.
    pub phone_size: i32,
}

impl From<GSM_SMSMemoryStatus> for SmsMemoryStatus {
    fn from(raw: GSM_SMSMemoryStatus) -> Self {
        Self {
            sim_unread: raw.SIMUnRead,
            sim_used: raw.SIMUsed,
            sim_size: raw.SIMSize,
            templates_used: raw.TemplatesUsed,
            phone_unread: raw.PhoneUnRead,
            phone_used: raw.PhoneUsed,
            phone_size: raw.PhoneSize,
        }
    }
}

/// Text formatting flags of an EMS part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct TextFormat {
    /// Left aligned.
    pub left: bool,
    /// Right aligned.
    pub right: bool,
    /// Centred.
    pub center: bool,
    /// Large font.
    pub large: bool,
    /// Small font.
    pub small: bool,
    /// Bold.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underlined.
    pub underlined: bool,
    /// Struck through.
    pub strikethrough: bool,
}

/// One decoded part of a multipart message (`GSM_MultiPartSMSEntry`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPartSmsEntry {
    /// Part kind, `None` when not reported.
    pub id: Option<MultiPartId>,
    /// Kind-specific number (e.g. predefined animation index).
    pub number: i32,
    /// Protected (cannot be forwarded).
    pub protected: bool,
    /// Text buffer, if the part carries one.
    pub text: Option<String>,
    /// EMS formatting.
    pub format: TextFormat,
    /// Notes in an attached ringtone.
    pub ringtone_notes: i32,
}

impl MultiPartSmsEntry {
    /// # Safety
    ///
    /// `raw.Buffer` must be null or a double-NUL terminated UCS-2 string.
    unsafe fn from_native(raw: &GSM_MultiPartSMSEntry) -> Result<Self> {
        Ok(Self {
            id: MultiPartId::optional(raw.ID)?,
            number: raw.Number,
            protected: from_gboolean(raw.Protected),
            text: unsafe { borrowed_ucs2_string(raw.Buffer) },
            format: TextFormat {
                left: from_gboolean(raw.Left),
                right: from_gboolean(raw.Right),
                center: from_gboolean(raw.Center),
                large: from_gboolean(raw.Large),
                small: from_gboolean(raw.Small),
                bold: from_gboolean(raw.Bold),
                italic: from_gboolean(raw.Italic),
                underlined: from_gboolean(raw.Underlined),
                strikethrough: from_gboolean(raw.Strikethrough),
            },
            ringtone_notes: raw.RingtoneNotes,
        })
    }
}

/// A multipart message decoded into its logical parts
/// (`GSM_MultiPartSMSInfo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPartSmsInfo {
    /// Text parts use UCS-2.
    pub unicode_coding: bool,
    /// Message class, `-1` for none.
    pub class: i32,
    /// Replace-short-message type.
    pub replace_message: u8,
    /// The decoder met something it did not understand.
    pub unknown: bool,
    /// Decoded parts, in order.
    pub entries: Vec<MultiPartSmsEntry>,
}

impl MultiPartSmsInfo {
    /// Concatenated text of all text-bearing parts.
    #[must_use]
    pub fn text(&self) -> String {
        self.entries.iter().filter_map(|e| e.text.as_deref()).collect()
    }

    /// # Safety
    ///
    /// Entry buffers must be null or valid UCS-2 strings, as left by
    /// `GSM_DecodeMultiPartSMS`.
    pub(crate) unsafe fn from_native(raw: &GSM_MultiPartSMSInfo) -> Result<Self> {
        let n = clamp_len(raw.EntriesNum, MAX_MULTI_SMS);
        let entries = raw.Entries[..n]
            .iter()
            .map(|e| unsafe { MultiPartSmsEntry::from_native(e) })
            .collect::<Result<_>>()?;
        Ok(Self {
            unicode_coding: from_gboolean(raw.UnicodeCoding),
            class: raw.Class,
            replace_message: raw.ReplaceMessage,
            unknown: from_gboolean(raw.Unknown),
            entries,
        })
    }
}

/// A zeroed decode target on the heap.
pub(crate) fn new_multipart_info() -> Box<GSM_MultiPartSMSInfo> {
    // SAFETY: plain data with null pointers; all-zero is valid.
    unsafe { Box::<GSM_MultiPartSMSInfo>::new_zeroed().assume_init() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbox_message() -> SmsMessage {
        SmsMessage {
            udh: UdhHeader {
                udh_type: UdhType::ConcatenatedMessages,
                data: vec![0x05, 0x00, 0x03, 0x2A, 0x02, 0x01],
                id8: 0x2A,
                id16: -1,
                part_number: 1,
                all_parts: 2,
            },
            other_numbers: vec!["+3706000000".into()],
            memory: Some(MemoryType::Sm),
            location: 3,
            folder: 1,
            inbox_folder: true,
            state: Some(SmsState::UnRead),
            pdu: SmsPduType::Deliver,
            date_time: DateTime::date(2009, 7, 1).at(12, 0, 0).with_timezone(7200),
            class: Some(1),
            message_reference: 9,
            ..SmsMessage::text_message("+37060000001", "Labas, pasauli! ąčę")
        }
    }

    #[test]
    fn message_round_trip() {
        let raw = inbox_message().to_native().unwrap().exact().unwrap();
        assert_eq!(SmsMessage::from_native(&raw).unwrap(), inbox_message());
    }

    #[test]
    fn binary_round_trip() {
        let sms = SmsMessage {
            coding: SmsCoding::EightBit,
            body: SmsBody::Data((0..=139).collect()),
            ..SmsMessage::default()
        };
        let raw = sms.to_native().unwrap().exact().unwrap();
        assert_eq!(raw.Length, 140);
        assert_eq!(SmsMessage::from_native(&raw).unwrap(), sms);
    }

    #[test]
    fn body_must_match_coding() {
        let sms = SmsMessage {
            coding: SmsCoding::EightBit,
            ..SmsMessage::text_message("1", "x")
        };
        assert!(matches!(sms.to_native(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn long_text_is_cut_at_160_units() {
        let sms = SmsMessage::text_message("1", "a".repeat(200));
        let m = sms.to_native().unwrap();
        assert_eq!(m.value.Length, 160);
        assert_eq!(m.truncations[0].field, "sms.text");
        assert_eq!(m.truncations[0].requested, 200);
    }

    #[test]
    fn other_numbers_are_bounded() {
        let sms = SmsMessage {
            other_numbers: (0..7).map(|i| i.to_string()).collect(),
            ..SmsMessage::default()
        };
        let m = sms.to_native().unwrap();
        assert_eq!(m.value.OtherNumbersNum, 5);
        assert!(m.truncations.iter().any(|t| t.field == "sms.other_numbers"));
    }

    #[test]
    fn multi_is_bounded_at_fifty() {
        let parts = vec![SmsMessage::text_message("1", "x"); 51];
        let m = multi_to_native(&parts).unwrap();
        assert_eq!(m.value.Number, 50);
        assert_eq!(m.truncations.len(), 1);
        assert_eq!(multi_from_native(&m.value).unwrap().len(), 50);
    }

    #[test]
    fn corrupt_counts_stay_in_bounds() {
        let mut raw = new_multi();
        raw.Number = 1000;
        for sms in raw.SMS.iter_mut() {
            *sms = SmsMessage::default().to_native().unwrap().value;
        }
        assert_eq!(multi_from_native(&raw).unwrap().len(), 50);
        raw.Number = -3;
        assert!(multi_from_native(&raw).unwrap().is_empty());
    }

    #[test]
    fn class_none_is_minus_one() {
        let raw = SmsMessage::default().to_native().unwrap().value;
        assert_eq!(raw.Class, -1);
        assert_eq!(SmsMessage::from_native(&raw).unwrap().class, None);
    }
}
