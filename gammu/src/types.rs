//! Enumerations mirrored from `gammu.h`.
//!
//! Native enums are plain `c_uint` on the wire; converting goes through
//! `from_ffi`, which refuses values this crate does not know about.

use crate::error::{Error, Result};

macro_rules! ffi_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident {
        $($(#[$vm:meta])* $variant:ident = $val:path),* $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u32)]
        $vis enum $name { $($(#[$vm])* $variant = $val),* }

        impl $name {
            /// Convert from the FFI value. Returns `None` for unknown values.
            #[must_use]
            pub const fn from_ffi(v: u32) -> Option<Self> {
                match v { $($val => Some(Self::$variant),)* _ => None }
            }

            /// The FFI value.
            #[must_use]
            pub const fn to_ffi(self) -> u32 {
                self as u32
            }

            /// Like [`from_ffi`](Self::from_ffi), but an unknown value is an error.
            pub(crate) fn require(v: u32) -> Result<Self> {
                Self::from_ffi(v).ok_or(Error::UnknownValue {
                    what: stringify!($name),
                    value: i64::from(v),
                })
            }

            /// `0` means "not reported"; anything else must be known.
            pub(crate) fn optional(v: u32) -> Result<Option<Self>> {
                if v == 0 { Ok(None) } else { Self::require(v).map(Some) }
            }
        }
    };
}

/// Write side of [`ffi_enum`] `optional` fields.
pub(crate) fn optional_to_ffi(v: Option<u32>) -> u32 {
    v.unwrap_or(0)
}

ffi_enum! {
    /// How the library talks to the phone (`GSM_ConnectionType`).
    pub enum ConnectionType {
        /// Nokia MBUS2.
        Mbus2 = gammu_sys::GCT_MBUS2,
        /// Nokia FBUS2.
        Fbus2 = gammu_sys::GCT_FBUS2,
        /// FBUS2 over a DLR-3 cable.
        Fbus2Dlr3 = gammu_sys::GCT_FBUS2DLR3,
        /// AT over a DKU-2 cable.
        Dku2At = gammu_sys::GCT_DKU2AT,
        /// Phonet over a DKU-2 cable.
        Dku2Phonet = gammu_sys::GCT_DKU2PHONET,
        /// FBUS2 over a DKU-5 cable.
        Dku5Fbus2 = gammu_sys::GCT_DKU5FBUS2,
        /// FBUS2 over an ARK3116 cable.
        Ark3116Fbus2 = gammu_sys::GCT_ARK3116FBUS2,
        /// FBUS2 over a PL2303 cable.
        Fbus2Pl2303 = gammu_sys::GCT_FBUS2PL2303,
        /// FBUS2 over Bluetooth serial.
        Fbus2Blue = gammu_sys::GCT_FBUS2BLUE,
        /// FBUS2 over infrared.
        Fbus2Irda = gammu_sys::GCT_FBUS2IRDA,
        /// Phonet over Bluetooth serial.
        PhonetBlue = gammu_sys::GCT_PHONETBLUE,
        /// AT commands over a serial line.
        At = gammu_sys::GCT_AT,
        /// GNAPBUS over Bluetooth.
        BlueGnapbus = gammu_sys::GCT_BLUEGNAPBUS,
        /// OBEX over infrared.
        IrdaObex = gammu_sys::GCT_IRDAOBEX,
        /// GNAPBUS over infrared.
        IrdaGnapbus = gammu_sys::GCT_IRDAGNAPBUS,
        /// AT over infrared.
        IrdaAt = gammu_sys::GCT_IRDAAT,
        /// Phonet over infrared.
        IrdaPhonet = gammu_sys::GCT_IRDAPHONET,
        /// FBUS2 over Bluetooth.
        BlueFbus2 = gammu_sys::GCT_BLUEFBUS2,
        /// AT over Bluetooth.
        BlueAt = gammu_sys::GCT_BLUEAT,
        /// Phonet over Bluetooth.
        BluePhonet = gammu_sys::GCT_BLUEPHONET,
        /// OBEX over Bluetooth.
        BlueObex = gammu_sys::GCT_BLUEOBEX,
        /// FBUS2 over USB.
        Fbus2Usb = gammu_sys::GCT_FBUS2USB,
        /// Series 60 applet over Bluetooth.
        BlueS60 = gammu_sys::GCT_BLUES60,
        /// Phonet through a proxy.
        ProxyPhonet = gammu_sys::GCT_PROXYPHONET,
        /// FBUS2 through a proxy.
        ProxyFbus2 = gammu_sys::GCT_PROXYFBUS2,
        /// AT through a proxy.
        ProxyAt = gammu_sys::GCT_PROXYAT,
        /// GNAPBUS through a proxy.
        ProxyGnapbus = gammu_sys::GCT_PROXYGNAPBUS,
        /// Series 60 applet through a proxy.
        ProxyS60 = gammu_sys::GCT_PROXYS60,
        /// No physical connection (dummy driver).
        None = gammu_sys::GCT_NONE,
    }
}

ffi_enum! {
    /// Security code kind (`GSM_SecurityCodeType`).
    pub enum SecurityCodeType {
        /// Phone security code.
        SecurityCode = gammu_sys::SEC_SecurityCode,
        /// SIM PIN.
        Pin = gammu_sys::SEC_Pin,
        /// SIM PIN2.
        Pin2 = gammu_sys::SEC_Pin2,
        /// SIM PUK.
        Puk = gammu_sys::SEC_Puk,
        /// SIM PUK2.
        Puk2 = gammu_sys::SEC_Puk2,
        /// No code needed.
        None = gammu_sys::SEC_None,
        /// Phone code.
        Phone = gammu_sys::SEC_Phone,
        /// Network personalisation code.
        Network = gammu_sys::SEC_Network,
    }
}

ffi_enum! {
    /// Battery chemistry (`GSM_BatteryType`).
    pub enum BatteryType {
        /// Not reported.
        Unknown = gammu_sys::GSM_BatteryUnknown,
        /// Nickel-metal hydride.
        NiMh = gammu_sys::GSM_BatteryNiMH,
        /// Lithium-ion.
        LiIon = gammu_sys::GSM_BatteryLiIon,
        /// Lithium-polymer.
        LiPol = gammu_sys::GSM_BatteryLiPol,
    }
}

ffi_enum! {
    /// Charger state (`GSM_ChargeState`).
    pub enum ChargeState {
        /// Running on battery.
        BatteryPowered = gammu_sys::GSM_BatteryPowered,
        /// Charger connected.
        BatteryConnected = gammu_sys::GSM_BatteryConnected,
        /// Charging.
        BatteryCharging = gammu_sys::GSM_BatteryCharging,
        /// No battery.
        BatteryNotConnected = gammu_sys::GSM_BatteryNotConnected,
        /// Fully charged.
        BatteryFull = gammu_sys::GSM_BatteryFull,
        /// Power fault.
        PowerFault = gammu_sys::GSM_PowerFault,
    }
}

ffi_enum! {
    /// Network registration state (`GSM_NetworkInfo_State`).
    pub enum NetworkState {
        /// Registered in the home network.
        HomeNetwork = gammu_sys::GSM_HomeNetwork,
        /// Not registered.
        NoNetwork = gammu_sys::GSM_NoNetwork,
        /// Roaming.
        RoamingNetwork = gammu_sys::GSM_RoamingNetwork,
        /// Registration denied.
        RegistrationDenied = gammu_sys::GSM_RegistrationDenied,
        /// Unknown; also used for fields the linked library does not report.
        Unknown = gammu_sys::GSM_NetworkStatusUnknown,
        /// Searching.
        RequestingNetwork = gammu_sys::GSM_RequestingNetwork,
    }
}

/// `GSM_GPRS_State` has no "unknown" member; zero stands in for it.
const GPRS_UNKNOWN: u32 = 0;

ffi_enum! {
    /// GPRS attach state (`GSM_GPRS_State`).
    pub enum GprsState {
        /// Not reported, or not available in the linked library.
        Unknown = GPRS_UNKNOWN,
        /// Detached.
        Detached = gammu_sys::GSM_GPRS_Detached,
        /// Attached.
        Attached = gammu_sys::GSM_GPRS_Attached,
    }
}

ffi_enum! {
    /// Phone manufacturer (`GSM_Manufacturer`).
    pub enum Manufacturer {
        /// Nokia.
        Nokia = gammu_sys::GSM_MANUF_Nokia,
        /// Alcatel.
        Alcatel = gammu_sys::GSM_MANUF_Alcatel,
        /// Samsung.
        Samsung = gammu_sys::GSM_MANUF_Samsung,
        /// Sony Ericsson.
        SonyEricsson = gammu_sys::GSM_MANUF_SonyEricsson,
        /// Siemens.
        Siemens = gammu_sys::GSM_MANUF_Siemens,
        /// Motorola.
        Motorola = gammu_sys::GSM_MANUF_Motorola,
        /// Huawei.
        Huawei = gammu_sys::GSM_MANUF_Huawei,
        /// ZTE.
        Zte = gammu_sys::GSM_MANUF_ZTE,
    }
}

ffi_enum! {
    /// Storage area (`GSM_MemoryType`).
    pub enum MemoryType {
        /// Phone internal memory.
        Me = gammu_sys::MEM_ME,
        /// SIM card.
        Sm = gammu_sys::MEM_SM,
        /// Own numbers.
        On = gammu_sys::MEM_ON,
        /// Dialled calls.
        Dc = gammu_sys::MEM_DC,
        /// Received calls.
        Rc = gammu_sys::MEM_RC,
        /// Missed calls.
        Mc = gammu_sys::MEM_MC,
        /// Combined ME and SIM.
        Mt = gammu_sys::MEM_MT,
        /// Fixed dialling.
        Fd = gammu_sys::MEM_FD,
        /// Voice mailbox.
        Vm = gammu_sys::MEM_VM,
        /// Sent SMS log.
        Sl = gammu_sys::MEM_SL,
        /// Quick dialling.
        Qd = gammu_sys::MEM_QD,
        /// Status reports.
        Sr = gammu_sys::MEM_SR,
    }
}

ffi_enum! {
    /// Message status (`GSM_SMS_State`).
    pub enum SmsState {
        /// Sent.
        Sent = gammu_sys::SMS_Sent,
        /// Not sent yet.
        UnSent = gammu_sys::SMS_UnSent,
        /// Read.
        Read = gammu_sys::SMS_Read,
        /// Unread.
        UnRead = gammu_sys::SMS_UnRead,
    }
}

ffi_enum! {
    /// User data header kind (`GSM_UDH`).
    pub enum UdhType {
        /// No header.
        NoUdh = gammu_sys::UDH_NoUDH,
        /// Concatenated message, 8-bit reference.
        ConcatenatedMessages = gammu_sys::UDH_ConcatenatedMessages,
        /// Concatenated message, 16-bit reference.
        ConcatenatedMessages16bit = gammu_sys::UDH_ConcatenatedMessages16bit,
        /// Disable voice indicator.
        DisableVoice = gammu_sys::UDH_DisableVoice,
        /// Disable fax indicator.
        DisableFax = gammu_sys::UDH_DisableFax,
        /// Disable email indicator.
        DisableEmail = gammu_sys::UDH_DisableEmail,
        /// Enable voice indicator.
        EnableVoice = gammu_sys::UDH_EnableVoice,
        /// Enable fax indicator.
        EnableFax = gammu_sys::UDH_EnableFax,
        /// Enable email indicator.
        EnableEmail = gammu_sys::UDH_EnableEmail,
        /// Void SMS.
        VoidSms = gammu_sys::UDH_VoidSMS,
        /// Nokia ringtone.
        NokiaRingtone = gammu_sys::UDH_NokiaRingtone,
        /// Nokia ringtone, multipart.
        NokiaRingtoneLong = gammu_sys::UDH_NokiaRingtoneLong,
        /// Nokia operator logo.
        NokiaOperatorLogo = gammu_sys::UDH_NokiaOperatorLogo,
        /// Nokia operator logo, multipart.
        NokiaOperatorLogoLong = gammu_sys::UDH_NokiaOperatorLogoLong,
        /// Nokia caller logo.
        NokiaCallerLogo = gammu_sys::UDH_NokiaCallerLogo,
        /// Nokia WAP.
        NokiaWap = gammu_sys::UDH_NokiaWAP,
        /// Nokia WAP, multipart.
        NokiaWapLong = gammu_sys::UDH_NokiaWAPLong,
        /// Nokia calendar, multipart.
        NokiaCalendarLong = gammu_sys::UDH_NokiaCalendarLong,
        /// Nokia profile, multipart.
        NokiaProfileLong = gammu_sys::UDH_NokiaProfileLong,
        /// Nokia phonebook, multipart.
        NokiaPhonebookLong = gammu_sys::UDH_NokiaPhonebookLong,
        /// User-defined header.
        UserUdh = gammu_sys::UDH_UserUDH,
        /// MMS indicator, multipart.
        MmsIndicatorLong = gammu_sys::UDH_MMSIndicatorLong,
    }
}

ffi_enum! {
    /// PDU kind (`GSM_SMSMessageType`).
    pub enum SmsPduType {
        /// Received message.
        Deliver = gammu_sys::SMS_Deliver,
        /// Delivery report.
        StatusReport = gammu_sys::SMS_Status_Report,
        /// Outgoing message.
        Submit = gammu_sys::SMS_Submit,
    }
}

ffi_enum! {
    /// Text coding (`GSM_Coding_Type`).
    pub enum SmsCoding {
        /// UCS-2.
        UnicodeNoCompression = gammu_sys::SMS_Coding_Unicode_No_Compression,
        /// Compressed UCS-2.
        UnicodeCompression = gammu_sys::SMS_Coding_Unicode_Compression,
        /// GSM 7-bit default alphabet.
        DefaultNoCompression = gammu_sys::SMS_Coding_Default_No_Compression,
        /// Compressed GSM 7-bit.
        DefaultCompression = gammu_sys::SMS_Coding_Default_Compression,
        /// Binary payload.
        EightBit = gammu_sys::SMS_Coding_8bit,
    }
}

ffi_enum! {
    /// SMSC message format (`GSM_SMSFormat`).
    pub enum SmsFormat {
        /// Pager.
        Pager = gammu_sys::SMS_FORMAT_Pager,
        /// Fax.
        Fax = gammu_sys::SMS_FORMAT_Fax,
        /// Email.
        Email = gammu_sys::SMS_FORMAT_Email,
        /// Plain text.
        Text = gammu_sys::SMS_FORMAT_Text,
    }
}

ffi_enum! {
    /// Multipart entry kind (`EncodeMultiPartSMSID`).
    pub enum MultiPartId {
        /// Plain text.
        Text = gammu_sys::SMS_Text,
        /// Concatenated text.
        ConcatenatedTextLong = gammu_sys::SMS_ConcatenatedTextLong,
        /// Concatenated text, concatenation decided automatically.
        ConcatenatedAutoTextLong = gammu_sys::SMS_ConcatenatedAutoTextLong,
        /// Concatenated text, 16-bit reference.
        ConcatenatedTextLong16bit = gammu_sys::SMS_ConcatenatedTextLong16bit,
        /// Concatenated text, automatic, 16-bit reference.
        ConcatenatedAutoTextLong16bit = gammu_sys::SMS_ConcatenatedAutoTextLong16bit,
        /// Nokia profile.
        NokiaProfileLong = gammu_sys::SMS_NokiaProfileLong,
        /// Nokia picture message.
        NokiaPictureImageLong = gammu_sys::SMS_NokiaPictureImageLong,
        /// Nokia screen saver.
        NokiaScreenSaverLong = gammu_sys::SMS_NokiaScreenSaverLong,
        /// Nokia ringtone.
        NokiaRingtone = gammu_sys::SMS_NokiaRingtone,
        /// Nokia ringtone, multipart.
        NokiaRingtoneLong = gammu_sys::SMS_NokiaRingtoneLong,
        /// Nokia operator logo.
        NokiaOperatorLogo = gammu_sys::SMS_NokiaOperatorLogo,
        /// Nokia operator logo, multipart.
        NokiaOperatorLogoLong = gammu_sys::SMS_NokiaOperatorLogoLong,
        /// Nokia caller logo.
        NokiaCallerLogo = gammu_sys::SMS_NokiaCallerLogo,
        /// Nokia WAP bookmark.
        NokiaWapBookmarkLong = gammu_sys::SMS_NokiaWAPBookmarkLong,
        /// Nokia WAP settings.
        NokiaWapSettingsLong = gammu_sys::SMS_NokiaWAPSettingsLong,
        /// Nokia MMS settings.
        NokiaMmsSettingsLong = gammu_sys::SMS_NokiaMMSSettingsLong,
        /// Nokia vCard 1.0.
        NokiaVcard10Long = gammu_sys::SMS_NokiaVCARD10Long,
        /// Nokia vCard 2.1.
        NokiaVcard21Long = gammu_sys::SMS_NokiaVCARD21Long,
        /// Nokia vCalendar 1.0.
        NokiaVcalendar10Long = gammu_sys::SMS_NokiaVCALENDAR10Long,
        /// Nokia vTodo.
        NokiaVtodoLong = gammu_sys::SMS_NokiaVTODOLong,
        /// vCard 1.0.
        Vcard10Long = gammu_sys::SMS_VCARD10Long,
        /// vCard 2.1.
        Vcard21Long = gammu_sys::SMS_VCARD21Long,
        /// Disable voice indicator.
        DisableVoice = gammu_sys::SMS_DisableVoice,
        /// Disable fax indicator.
        DisableFax = gammu_sys::SMS_DisableFax,
        /// Disable email indicator.
        DisableEmail = gammu_sys::SMS_DisableEmail,
        /// Enable voice indicator.
        EnableVoice = gammu_sys::SMS_EnableVoice,
        /// Enable fax indicator.
        EnableFax = gammu_sys::SMS_EnableFax,
        /// Enable email indicator.
        EnableEmail = gammu_sys::SMS_EnableEmail,
        /// Void SMS.
        VoidSms = gammu_sys::SMS_VoidSMS,
        /// EMS sound, iMelody 1.0.
        EmsSound10 = gammu_sys::SMS_EMSSound10,
        /// EMS sound, iMelody 1.2.
        EmsSound12 = gammu_sys::SMS_EMSSound12,
        /// Sony Ericsson EMS sound.
        EmsSonyEricssonSound = gammu_sys::SMS_EMSSonyEricssonSound,
        /// EMS sound 1.0, multipart.
        EmsSound10Long = gammu_sys::SMS_EMSSound10Long,
        /// EMS sound 1.2, multipart.
        EmsSound12Long = gammu_sys::SMS_EMSSound12Long,
        /// Sony Ericsson EMS sound, multipart.
        EmsSonyEricssonSoundLong = gammu_sys::SMS_EMSSonyEricssonSoundLong,
        /// EMS predefined sound.
        EmsPredefinedSound = gammu_sys::SMS_EMSPredefinedSound,
        /// EMS predefined animation.
        EmsPredefinedAnimation = gammu_sys::SMS_EMSPredefinedAnimation,
        /// EMS animation.
        EmsAnimation = gammu_sys::SMS_EMSAnimation,
        /// EMS fixed bitmap.
        EmsFixedBitmap = gammu_sys::SMS_EMSFixedBitmap,
        /// EMS variable bitmap.
        EmsVariableBitmap = gammu_sys::SMS_EMSVariableBitmap,
        /// EMS variable bitmap, multipart.
        EmsVariableBitmapLong = gammu_sys::SMS_EMSVariableBitmapLong,
        /// MMS indicator.
        MmsIndicatorLong = gammu_sys::SMS_MMSIndicatorLong,
        /// WAP indicator.
        WapIndicatorLong = gammu_sys::SMS_WAPIndicatorLong,
        /// Alcatel monochrome bitmap.
        AlcatelMonoBitmapLong = gammu_sys::SMS_AlcatelMonoBitmapLong,
        /// Alcatel monochrome animation.
        AlcatelMonoAnimationLong = gammu_sys::SMS_AlcatelMonoAnimationLong,
        /// Alcatel template name.
        AlcatelSmsTemplateName = gammu_sys::SMS_AlcatelSMSTemplateName,
        /// Siemens file.
        SiemensFile = gammu_sys::SMS_SiemensFile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_convert_both_ways() {
        assert_eq!(ConnectionType::from_ffi(gammu_sys::GCT_AT), Some(ConnectionType::At));
        assert_eq!(SmsCoding::EightBit.to_ffi(), gammu_sys::SMS_Coding_8bit);
        assert_eq!(BatteryType::from_ffi(0), Some(BatteryType::Unknown));
    }

    #[test]
    fn unknown_values_are_refused() {
        assert_eq!(SmsState::from_ffi(99), None);
        assert!(matches!(
            SmsState::require(99),
            Err(Error::UnknownValue { what: "SmsState", value: 99 })
        ));
    }

    #[test]
    fn zero_is_not_reported() {
        assert_eq!(MemoryType::optional(0).unwrap(), None);
        assert_eq!(MemoryType::optional(gammu_sys::MEM_SM).unwrap(), Some(MemoryType::Sm));
        assert_eq!(optional_to_ffi(None), 0);
    }
}
