#![allow(clippy::unwrap_used)]

mod common;

use gammu::{Config, Error, SmsMessage, TruncationPolicy};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stored_text_is_a_prefix(text in "\\PC{0,200}") {
        let (gammu, _device) = common::dummy_with(TruncationPolicy::Warn);
        let sm = common::connected(&gammu);
        let (folder, location) = sm
            .add_sms(&SmsMessage::text_message("+15550100", text.as_str()))
            .unwrap();
        let back = sm.get_sms(location, folder).unwrap();
        let stored = back[0].text().unwrap();
        prop_assert!(text.starts_with(stored), "{stored:?} is not a prefix of {text:?}");
        prop_assert!(stored.encode_utf16().count() <= 160);
    }

    #[test]
    fn reject_policy_stores_exactly_or_not_at_all(text in "[a-z\u{1F600}]{0,200}") {
        let (gammu, device) = common::dummy();
        let sm = common::connected(&gammu);
        match sm.add_sms(&SmsMessage::text_message("+15550100", text.as_str())) {
            Ok((folder, location)) => {
                let back = sm.get_sms(location, folder).unwrap();
                prop_assert_eq!(back[0].text(), Some(text.as_str()));
            }
            Err(Error::Truncated(t)) => {
                prop_assert_eq!(t.field, "sms.text");
                prop_assert!(t.requested > t.capacity);
                prop_assert_eq!(device.stored_sms(), 0);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn model_fits_or_is_refused(model in "[A-Za-z0-9 ]{0,80}") {
        let (gammu, _device) = common::dummy();
        let sm = gammu.state_machine().unwrap();
        let config = Config { model: model.clone(), ..common::at_config() };
        let pushed = sm.push_config(&config);
        prop_assert_eq!(pushed.is_ok(), model.len() <= 49);
        if pushed.is_ok() {
            prop_assert_eq!(sm.config(0).unwrap(), config);
        } else {
            prop_assert_eq!(sm.config_count().unwrap(), 0);
        }
    }
}
