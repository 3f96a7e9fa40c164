#![allow(clippy::unwrap_used)]

use gammu::{
    Call, CallStatus, DateTime, SmsMessage, SmsPduType, SmsState, UdhHeader, UdhType,
};
use gammu_sys::GSM_DateTime;
use proptest::prelude::*;

fn date_time() -> impl Strategy<Value = DateTime> {
    (1980..2100i32, 1..=12i32, 1..=28i32, 0..24i32, 0..60i32, 0..60i32, -48..=48i32).prop_map(
        |(y, mo, d, h, mi, s, quarter_hours)| {
            DateTime::date(y, mo, d)
                .at(h, mi, s)
                .with_timezone(quarter_hours * 900)
        },
    )
}

fn udh() -> impl Strategy<Value = UdhHeader> {
    (
        prop_oneof![
            Just(UdhType::NoUdh),
            Just(UdhType::ConcatenatedMessages),
            Just(UdhType::ConcatenatedMessages16bit),
        ],
        prop::collection::vec(any::<u8>(), 0..=140),
        -1..256i32,
        -1..65536i32,
        -1..10i32,
        -1..10i32,
    )
        .prop_map(|(udh_type, data, id8, id16, part_number, all_parts)| UdhHeader {
            udh_type,
            data,
            id8,
            id16,
            part_number,
            all_parts,
        })
}

fn call_status() -> impl Strategy<Value = CallStatus> {
    prop_oneof![
        Just(CallStatus::Incoming),
        Just(CallStatus::Outgoing),
        Just(CallStatus::Ended),
        Just(CallStatus::Held),
        any::<i32>().prop_map(CallStatus::RemoteEnded),
    ]
}

proptest! {
    #[test]
    fn date_time_survives_native(dt in date_time()) {
        prop_assert_eq!(DateTime::from(GSM_DateTime::from(dt)), dt);
    }

    #[test]
    fn udh_survives_native(header in udh()) {
        let native = header.to_native();
        prop_assert!(native.is_lossless());
        prop_assert_eq!(UdhHeader::from_native(&native.value).unwrap(), header);
    }

    #[test]
    fn call_survives_native(
        status in call_status(),
        call_id in prop::option::of(0..1000i32),
        phone_number in "[+0-9]{0,40}",
    ) {
        let call = Call { status, call_id, phone_number };
        let native = call.to_native().unwrap().exact().unwrap();
        prop_assert_eq!(Call::from_native(&native).unwrap(), call);
    }

    #[test]
    fn sms_survives_native(
        number in "[+0-9]{1,20}",
        text in "[a-zA-Z0-9 .,!?\u{e9}\u{1F600}]{0,70}",
        pdu in prop_oneof![Just(SmsPduType::Submit), Just(SmsPduType::Deliver)],
        state in prop::option::of(prop_oneof![Just(SmsState::Read), Just(SmsState::UnRead)]),
        class in prop::option::of(0..4u8),
        location in 0..200i32,
        date_time in date_time(),
        udh in udh(),
    ) {
        let sms = SmsMessage {
            pdu,
            state,
            class,
            location,
            date_time,
            udh,
            ..SmsMessage::text_message(number, text)
        };
        let native = sms.to_native().unwrap().exact().unwrap();
        prop_assert_eq!(SmsMessage::from_native(&native).unwrap(), sms);
    }
}
