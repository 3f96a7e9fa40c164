//! Call notifications (`GSM_Call`).

use gammu_sys::GSM_Call;

use crate::error::{Error, Result};
use crate::marshal::{Marshalled, Writer, from_gboolean, read_ucs2, to_gboolean};

/// What happened to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallStatus {
    /// Ringing.
    Incoming,
    /// Dialling out.
    Outgoing,
    /// Call started.
    Started,
    /// Call ended, reason unknown.
    Ended,
    /// The other side hung up, with the network's status code.
    RemoteEnded(i32),
    /// We hung up.
    LocalEnded,
    /// Connected.
    Established,
    /// Put on hold.
    Held,
    /// Taken off hold.
    Resumed,
    /// Switched to another call.
    Switched,
}

impl CallStatus {
    fn from_native(status: u32, code: i32) -> Result<Self> {
        Ok(match status {
            gammu_sys::GSM_CALL_IncomingCall => Self::Incoming,
            gammu_sys::GSM_CALL_OutgoingCall => Self::Outgoing,
            gammu_sys::GSM_CALL_CallStart => Self::Started,
            gammu_sys::GSM_CALL_CallEnd => Self::Ended,
            gammu_sys::GSM_CALL_CallRemoteEnd => Self::RemoteEnded(code),
            gammu_sys::GSM_CALL_CallLocalEnd => Self::LocalEnded,
            gammu_sys::GSM_CALL_CallEstablished => Self::Established,
            gammu_sys::GSM_CALL_CallHeld => Self::Held,
            gammu_sys::GSM_CALL_CallResumed => Self::Resumed,
            gammu_sys::GSM_CALL_CallSwitched => Self::Switched,
            other => {
                return Err(Error::UnknownValue {
                    what: "CallStatus",
                    value: i64::from(other),
                });
            }
        })
    }

    const fn to_native(self) -> (u32, i32) {
        match self {
            Self::Incoming => (gammu_sys::GSM_CALL_IncomingCall, 0),
            Self::Outgoing => (gammu_sys::GSM_CALL_OutgoingCall, 0),
            Self::Started => (gammu_sys::GSM_CALL_CallStart, 0),
            Self::Ended => (gammu_sys::GSM_CALL_CallEnd, 0),
            Self::RemoteEnded(code) => (gammu_sys::GSM_CALL_CallRemoteEnd, code),
            Self::LocalEnded => (gammu_sys::GSM_CALL_CallLocalEnd, 0),
            Self::Established => (gammu_sys::GSM_CALL_CallEstablished, 0),
            Self::Held => (gammu_sys::GSM_CALL_CallHeld, 0),
            Self::Resumed => (gammu_sys::GSM_CALL_CallResumed, 0),
            Self::Switched => (gammu_sys::GSM_CALL_CallSwitched, 0),
        }
    }
}

/// A call event as delivered by the incoming-call callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    /// What happened.
    pub status: CallStatus,
    /// Network call ID, when the phone reports one.
    pub call_id: Option<i32>,
    /// Remote number.
    pub phone_number: String,
}

impl Call {
    /// Read a native record.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownValue`] for an unknown status.
    pub fn from_native(raw: &GSM_Call) -> Result<Self> {
        Ok(Self {
            status: CallStatus::from_native(raw.Status, raw.StatusCode)?,
            call_id: from_gboolean(raw.CallIDAvailable).then_some(raw.CallID),
            phone_number: read_ucs2(&raw.PhoneNumber),
        })
    }

    /// Produce the native record.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the number contains NUL.
    pub fn to_native(&self) -> Result<Marshalled<GSM_Call>> {
        let (status, code) = self.status.to_native();
        let mut raw = GSM_Call {
            Status: status,
            CallID: self.call_id.unwrap_or(0),
            CallIDAvailable: to_gboolean(self.call_id.is_some()),
            StatusCode: code,
            PhoneNumber: [0; 102],
        };
        let mut w = Writer::new();
        w.ucs2("call.phone_number", &mut raw.PhoneNumber, &self.phone_number)?;
        Ok(w.finish(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_end_keeps_status_code() {
        let call = Call {
            status: CallStatus::RemoteEnded(17),
            call_id: Some(4),
            phone_number: "+441234567890".into(),
        };
        let raw = call.to_native().unwrap().exact().unwrap();
        assert_eq!(raw.Status, gammu_sys::GSM_CALL_CallRemoteEnd);
        assert_eq!(raw.StatusCode, 17);
        assert_eq!(Call::from_native(&raw).unwrap(), call);
    }

    #[test]
    fn missing_call_id_is_none() {
        let call = Call {
            status: CallStatus::Incoming,
            call_id: None,
            phone_number: String::new(),
        };
        let raw = call.to_native().unwrap().value;
        assert_eq!(raw.CallIDAvailable, 0);
        assert_eq!(Call::from_native(&raw).unwrap().call_id, None);
    }

    #[test]
    fn unknown_status_is_refused() {
        let mut raw = Call {
            status: CallStatus::Held,
            call_id: None,
            phone_number: String::new(),
        }
        .to_native()
        .unwrap()
        .value;
        raw.Status = 99;
        assert!(matches!(
            Call::from_native(&raw),
            Err(Error::UnknownValue { what: "CallStatus", .. })
        ));
    }
}
