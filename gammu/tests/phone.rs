#![allow(clippy::unwrap_used)]

mod common;

use gammu::{
    BatteryType, ChargeState, Error, ErrorCode, INBOX_FOLDER, Manufacturer, MemoryType,
    NetworkState, OUTBOX_FOLDER, SecurityCode, SecurityCodeType, SmsMessage, SmsPduType, SmsState,
};

fn code(err: &Error) -> Option<ErrorCode> {
    err.code()
}

fn received(text: &str) -> SmsMessage {
    SmsMessage {
        pdu: SmsPduType::Deliver,
        state: Some(SmsState::UnRead),
        ..SmsMessage::text_message("+15550100", text)
    }
}

#[test]
fn add_then_read_back() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);

    let (folder, location) = sm.add_sms(&SmsMessage::text_message("+15550100", "hello")).unwrap();
    assert_eq!((folder, location), (OUTBOX_FOLDER, 1));
    assert_eq!(sm.add_sms(&received("hi there")).unwrap(), (INBOX_FOLDER, 1));

    let parts = sm.get_sms(location, folder).unwrap();
    assert_eq!(parts.len(), 1);
    let sms = &parts[0];
    assert_eq!(sms.text(), Some("hello"));
    assert_eq!(sms.number, "+15550100");
    assert_eq!(sms.memory, Some(MemoryType::Me));
    assert!(!sms.inbox_folder);
    assert_eq!((sms.folder, sms.location), (OUTBOX_FOLDER, 1));
}

#[test]
fn iterate_all_messages() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    device.store_sms(INBOX_FOLDER, &received("first")).unwrap();
    device.store_sms(INBOX_FOLDER, &received("second")).unwrap();
    device
        .store_sms(OUTBOX_FOLDER, &SmsMessage::text_message("+15550101", "third"))
        .unwrap();

    let mut texts = Vec::new();
    let mut next = sm.get_next_sms(0, 0, true);
    while let Ok(parts) = next {
        let last = parts.last().unwrap();
        texts.push(last.text().unwrap().to_owned());
        next = sm.get_next_sms(last.location, last.folder, false);
    }
    assert_eq!(code(&next.unwrap_err()), Some(ErrorCode::Empty));
    assert_eq!(texts, ["first", "second", "third"]);
}

#[test]
fn missing_and_invalid_locations() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);

    assert_eq!(code(&sm.get_sms(1, INBOX_FOLDER).unwrap_err()), Some(ErrorCode::Empty));
    assert_eq!(code(&sm.get_sms(1, 9).unwrap_err()), Some(ErrorCode::InvalidLocation));
    assert_eq!(code(&sm.delete_sms(1, INBOX_FOLDER).unwrap_err()), Some(ErrorCode::Empty));
    assert_eq!(code(&sm.delete_sms(1, 9).unwrap_err()), Some(ErrorCode::InvalidLocation));
    assert_eq!(
        code(&sm.get_next_sms(0, 0, true).unwrap_err()),
        Some(ErrorCode::Empty)
    );
}

#[test]
fn delete_frees_location() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let location = device.store_sms(INBOX_FOLDER, &received("bye")).unwrap();

    sm.delete_sms(location, INBOX_FOLDER).unwrap();
    assert_eq!(device.stored_sms(), 0);
    assert_eq!(
        code(&sm.delete_sms(location, INBOX_FOLDER).unwrap_err()),
        Some(ErrorCode::Empty)
    );
}

#[test]
fn set_overwrites_addressed_location() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);
    let message = SmsMessage {
        folder: INBOX_FOLDER,
        location: 5,
        ..received("placed")
    };
    assert_eq!(sm.set_sms(&message).unwrap(), (INBOX_FOLDER, 5));
    assert_eq!(sm.get_sms(5, INBOX_FOLDER).unwrap()[0].text(), Some("placed"));

    let unaddressed = SmsMessage {
        location: 0,
        ..message
    };
    assert_eq!(
        code(&sm.set_sms(&unaddressed).unwrap_err()),
        Some(ErrorCode::InvalidLocation)
    );
}

#[test]
fn overlong_text_is_rejected_before_the_phone() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    let err = sm
        .add_sms(&SmsMessage::text_message("+15550100", "x".repeat(2000)))
        .unwrap_err();
    assert!(matches!(err, Error::Truncated(_)));
    assert_eq!(device.stored_sms(), 0);
}

#[test]
fn memory_fills_up() {
    let (gammu, device) = common::dummy();
    let sm = common::connected(&gammu);
    for n in 0..100 {
        device.store_sms(INBOX_FOLDER, &received(&format!("#{n}"))).unwrap();
    }
    let err = sm.add_sms(&received("one too many")).unwrap_err();
    assert_eq!(code(&err), Some(ErrorCode::Full));

    let status = sm.sms_status().unwrap();
    assert_eq!(status.phone_used, 100);
    assert_eq!(status.phone_unread, 100);
    assert_eq!(status.phone_size, 100);
    assert_eq!(status.sim_size, 0);
}

#[test]
fn folders() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);
    let folders = sm.sms_folders().unwrap();
    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].name, "Inbox");
    assert!(folders[0].inbox && !folders[0].outbox);
    assert_eq!(folders[1].name, "Outbox");
    assert!(folders[1].outbox);
    assert!(folders.iter().all(|f| f.memory == Some(MemoryType::Me)));
}

#[test]
fn security_code_flow() {
    let (gammu, device) = common::dummy();
    device.require_security_code(SecurityCodeType::Pin);
    let sm = common::connected(&gammu);

    assert_eq!(sm.security_status().unwrap(), SecurityCodeType::Pin);
    let err = sm
        .enter_security_code(&SecurityCode::new(SecurityCodeType::Pin, "0000"))
        .unwrap_err();
    assert_eq!(code(&err), Some(ErrorCode::SecurityError));

    sm.enter_security_code(&SecurityCode::new(SecurityCodeType::Pin, "1234"))
        .unwrap();
    assert_eq!(sm.security_status().unwrap(), SecurityCodeType::None);
}

#[test]
fn phone_identity() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);

    assert_eq!(sm.manufacturer().unwrap(), "Gammu");
    assert_eq!(sm.model().unwrap(), "Dummy");
    assert_eq!(sm.imei().unwrap(), "999999999999999");
    assert_eq!(sm.hardware().unwrap(), "DUMMY-HW-1");
    assert_eq!(sm.product_code().unwrap(), "DUMMY-0001");
    assert_eq!(sm.manufacture_month().unwrap(), "11/2023");

    let firmware = sm.firmware().unwrap();
    assert_eq!(firmware.version, "1.42.0");
    assert_eq!(firmware.date, "20231120");
    assert!((firmware.number - 1.42).abs() < f64::EPSILON);

    let model = sm.model_info().unwrap();
    assert_eq!(model.manufacturer, Some(Manufacturer::Nokia));
    assert_eq!(model.model, "Dummy");
    assert_eq!(model.number, "DUMMY-1");
}

#[test]
fn radio_and_power() {
    let (gammu, _device) = common::dummy();
    let sm = common::connected(&gammu);

    let battery = sm.battery_charge().unwrap();
    assert_eq!(battery.percent, 73);
    assert_eq!(battery.battery_type, BatteryType::LiIon);
    assert_eq!(battery.charge_state, Some(ChargeState::BatteryPowered));

    let signal = sm.signal_quality().unwrap();
    assert_eq!((signal.strength, signal.percent), (-63, 70));

    let network = sm.network_info().unwrap();
    assert_eq!(network.network_code, "999 99");
    assert_eq!(network.network_name, "GammuTel");
    assert_eq!(network.cid, "FACE");
    assert_eq!(network.state, NetworkState::HomeNetwork);
}

#[test]
fn queries_need_connection() {
    let (gammu, _device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&common::at_config()).unwrap();

    assert_eq!(code(&sm.imei().unwrap_err()), Some(ErrorCode::NotConnected));
    assert_eq!(code(&sm.sms_status().unwrap_err()), Some(ErrorCode::NotConnected));
    assert_eq!(code(&sm.read_device(false).unwrap_err()), Some(ErrorCode::NotConnected));
    assert_eq!(
        code(&sm.add_sms(&received("offline")).unwrap_err()),
        Some(ErrorCode::NotConnected)
    );
    assert!(sm.model_info().is_ok());
}
