#![allow(clippy::unwrap_used)]

mod common;

use std::io::Write as _;
use std::sync::Arc;

use gammu::{
    Capabilities, Config, DateTime, DummyBackend, Error, ErrorCode, Gammu, LibraryVersion,
    SmsBody, SmsCoding, SmsMessage, UdhHeader, UdhType,
};
use tempfile::{NamedTempFile, TempDir};

const GAMMURC: &str = "\
; written by a test
[gammu]
device = /dev/ttyACM0
connection = at115200
model = at
logformat = textall
synchronizetime = yes

[gammu1]
port = /dev/rfcomm0
connection = blueat
use_locking = on

[smsd]
service = files
";

fn gammurc() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(GAMMURC.as_bytes()).unwrap();
    file
}

#[test]
fn calendar_checks() {
    let (gammu, _device) = common::dummy();
    assert!(gammu.check_date(&DateTime::date(2000, 2, 29)));
    assert!(!gammu.check_date(&DateTime::date(2000, 2, 30)));
    assert!(!gammu.check_date(&DateTime::date(2023, 2, 29)));
    assert!(gammu.check_time(&DateTime::date(2024, 1, 1).at(23, 59, 59)));
    assert!(!gammu.check_time(&DateTime::date(2024, 1, 1).at(12, 60, 0)));
}

#[test]
fn date_formatting() {
    let (gammu, _device) = common::dummy();
    let dt = DateTime::date(2024, 3, 9).at(7, 5, 0);
    assert_eq!(gammu.os_date(&dt).unwrap(), "2024-03-09");
    assert!(gammu.os_date_time(&dt, false).unwrap().starts_with("2024-03-09 07:05:00"));
}

#[test]
fn network_and_country_names() {
    let (gammu, _device) = common::dummy();
    assert_eq!(gammu.network_name("246 01").unwrap(), "Omnitel");
    assert_eq!(gammu.network_name("000 00").unwrap(), "unknown");
    assert_eq!(gammu.country_name("999").unwrap(), "Dummyland");
    assert_eq!(gammu.country_name("262 01").unwrap(), "Germany");
    assert!(matches!(gammu.network_name("24\u{0}6"), Err(Error::InvalidArgument(_))));
}

#[test]
fn error_messages_and_translation() {
    let (gammu, _device) = common::dummy();
    for code in ErrorCode::ALL {
        assert!(!gammu.error_message(*code).trim().is_empty(), "{code}");
    }
    assert!(gammu.translate(ErrorCode::None.raw()).is_ok());

    let err = gammu.translate(ErrorCode::Timeout.raw()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::Timeout));

    match gammu.translate(9999) {
        Err(Error::Gsm(e)) => {
            assert_eq!(e.code(), ErrorCode::Unknown);
            assert_eq!(e.raw(), 9999);
            assert!(!e.message().is_empty());
        }
        other => panic!("expected native error, got {other:?}"),
    }
}

#[test]
fn version_and_capabilities() {
    let device = DummyBackend::new().with_version("1.26.0");
    let gammu = Gammu::with_backend(Arc::new(device));
    assert_eq!(gammu.version(), LibraryVersion::new(1, 26, 0));
    assert!(!gammu.capabilities().boolean_config_flags);

    let sm = gammu.state_machine().unwrap();
    assert!(matches!(
        sm.push_config(&common::at_config()),
        Err(Error::Unsupported(_))
    ));

    let (current, _device) = common::dummy();
    assert_eq!(current.capabilities(), Capabilities::for_version(current.version()));
}

#[test]
fn ini_values() {
    let (gammu, device) = common::dummy();
    let file = gammurc();
    let ini = gammu.read_ini(file.path(), false).unwrap();

    assert_eq!(ini.value("gammu", "device").unwrap(), "/dev/ttyACM0");
    assert_eq!(ini.value("SMSD", "Service").unwrap(), "files");
    let err = ini.value("gammu", "nosuchkey").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::IniKeyNotFound));

    ini.close();
    ini.close();
    assert!(matches!(ini.value("gammu", "device"), Err(Error::Released)));
    assert_eq!(device.ini_frees(), 1);
    assert_eq!(device.invalid_frees(), 0);
}

#[test]
fn ini_values_unicode() {
    let (gammu, device) = common::dummy();
    let file = gammurc();
    let ini = gammu.read_ini(file.path(), true).unwrap();
    assert!(ini.is_unicode());
    assert_eq!(ini.value("gammu1", "connection").unwrap(), "blueat");
    drop(ini);
    assert_eq!(device.live_ini_sections(), 0);
}

#[test]
fn missing_ini_file() {
    let (gammu, _device) = common::dummy();
    let dir = TempDir::new().unwrap();
    let err = gammu.read_ini(&dir.path().join("absent"), false).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::CantOpenFile));

    let err = gammu.find_gammurc(None).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::FileNotExist));
}

#[test]
fn gammurc_sections() {
    let file = gammurc();
    let device = DummyBackend::new().with_gammurc(file.path());
    let gammu = Gammu::with_backend(Arc::new(device.clone()));
    let ini = gammu.find_gammurc(None).unwrap();

    let first = gammu.read_config(&ini, 0).unwrap();
    assert_eq!(
        first,
        Config {
            model: "at".into(),
            debug_level: "textall".into(),
            sync_time: true,
            ..Config::new("/dev/ttyACM0", "at115200")
        }
    );

    let second = gammu.read_config(&ini, 1).unwrap();
    assert_eq!(second.device, "/dev/rfcomm0");
    assert_eq!(second.connection, "blueat");
    assert!(second.lock_device);

    let err = gammu.read_config(&ini, 2).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NoneSection));

    let forced = gammu.find_gammurc(Some(file.path())).unwrap();
    assert_eq!(gammu.read_config(&forced, 0).unwrap(), first);

    ini.close();
    assert!(matches!(gammu.read_config(&ini, 0), Err(Error::Released)));
}

#[test]
fn config_from_gammurc_connects() {
    let file = gammurc();
    let device = DummyBackend::new().with_gammurc(file.path());
    let gammu = Gammu::with_backend(Arc::new(device.clone()));
    let ini = gammu.find_gammurc(None).unwrap();
    let sm = gammu.state_machine().unwrap();
    sm.push_config(&gammu.read_config(&ini, 0).unwrap()).unwrap();
    sm.init_connection(1).unwrap();
    drop(ini);
    assert!(sm.is_connected());
    sm.close().unwrap();
    assert_eq!(device.dangling_config_strings(), 0);
}

#[test]
fn global_debug_sink() {
    let device = DummyBackend::new();
    let gammu = Gammu::with_backend(Arc::new(device.clone()));
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("gammu.log");

    {
        let debug = gammu.global_debug().unwrap();
        assert!(debug.is_global());
        debug.set_level("textall").unwrap();
        assert!(matches!(debug.set_level("verbose"), Err(Error::InvalidArgument(_))));
        debug.set_file(&log).unwrap();
    }
    assert_eq!(device.global_debug_level(), "textall");
    assert_eq!(device.global_debug_file().as_deref(), log.to_str());
    assert!(log.exists());

    let err = gammu
        .global_debug()
        .unwrap()
        .set_file(&dir.path().join("missing").join("gammu.log"))
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::CantOpenFile));

    drop(gammu);
    assert_eq!(device.global_debug_file(), None);
}

#[test]
fn machine_debug_sink() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    assert_eq!(device.debug_sinks_using_global(), 1);

    let debug = sm.debug_info().unwrap();
    assert!(!debug.is_global());
    debug.set_global(false).unwrap();
    assert_eq!(device.debug_sinks_using_global(), 0);
    debug.set_level("errors").unwrap();
    debug.reset_file().unwrap();
}

#[test]
fn machine_debug_sink_dies_with_machine() {
    let (gammu, device) = common::dummy();
    let sm = gammu.state_machine().unwrap();
    let debug = sm.debug_info().unwrap();
    sm.close().unwrap();

    assert!(matches!(debug.set_level("textall"), Err(Error::Released)));
    assert!(matches!(debug.reset_file(), Err(Error::Released)));
    assert!(matches!(debug.set_global(true), Err(Error::Released)));
    let dir = TempDir::new().unwrap();
    assert!(matches!(debug.set_file(&dir.path().join("gammu.log")), Err(Error::Released)));
    assert!(matches!(
        gammu.decode_multipart_sms(&debug, &[part("Hello", 1)], false),
        Err(Error::Released)
    ));
    assert_eq!(device.multipart_frees(), 0);
    assert!(!dir.path().join("gammu.log").exists());

    let global = gammu.global_debug().unwrap();
    global.set_level("textall").unwrap();
}

#[test]
fn absurd_version_string_does_not_overflow() {
    let gammu = Gammu::with_backend(Arc::new(DummyBackend::new().with_version("999999.1.1")));
    assert_eq!(gammu.version(), LibraryVersion::new(999_999, 1, 1));
    assert_eq!(gammu.capabilities(), Capabilities::current());
}

#[test]
fn locales_are_forwarded() {
    let device = DummyBackend::new();
    let gammu = Gammu::builder()
        .backend(Arc::new(device.clone()))
        .locales("/usr/share/locale")
        .build()
        .unwrap();
    assert_eq!(device.locales(), Some(Some("/usr/share/locale".to_owned())));

    gammu.init_locales(None).unwrap();
    assert_eq!(device.locales(), Some(None));
}

fn part(text: &str, number: i32) -> SmsMessage {
    SmsMessage {
        udh: UdhHeader {
            udh_type: UdhType::ConcatenatedMessages,
            id8: 42,
            part_number: number,
            all_parts: 2,
            ..UdhHeader::default()
        },
        ..SmsMessage::text_message("+15550100", text)
    }
}

#[test]
fn multipart_reassembly() {
    let (gammu, device) = common::dummy();
    let debug = gammu.global_debug().unwrap();
    let parts = [part("world", 2), part("Hello, ", 1)];

    let info = gammu.decode_multipart_sms(&debug, &parts, false).unwrap();
    assert_eq!(info.text(), "Hello, world");
    assert_eq!(info.entries.len(), 1);
    assert!(!info.unicode_coding);

    assert_eq!(device.multipart_frees(), 1);
    assert_eq!(device.live_multipart_buffers(), 0);
    assert_eq!(device.invalid_frees(), 0);
}

#[test]
fn undecodable_multipart_still_frees() {
    let (gammu, device) = common::dummy();
    let debug = gammu.global_debug().unwrap();
    let binary = SmsMessage {
        coding: SmsCoding::EightBit,
        body: SmsBody::Data(vec![0xde, 0xad, 0xbe, 0xef]),
        ..part("", 1)
    };

    let err = gammu
        .decode_multipart_sms(&debug, &[binary], false)
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::CouldNotDecode));
    assert_eq!(device.multipart_frees(), 1);
    assert_eq!(device.live_multipart_buffers(), 0);
}

#[test]
fn builder_without_backend() {
    let result = Gammu::builder().build();
    if cfg!(feature = "native") {
        assert!(result.is_ok());
    } else {
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
