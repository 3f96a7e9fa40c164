#![doc = include_str!("../README.md")]

pub mod backend;
pub mod call;
pub mod capabilities;
pub mod config;
pub mod datetime;
pub mod debug;
pub mod error;
pub mod info;
pub mod ini;
pub mod machine;
pub mod marshal;
pub mod sms;
pub mod types;

mod callback;
mod context;
mod ffi;

use std::sync::OnceLock;

// Re-export core public API at crate root.
pub use backend::{Backend, DummyBackend, INBOX_FOLDER, OUTBOX_FOLDER};
#[cfg(feature = "native")]
pub use backend::NativeBackend;
pub use call::{Call, CallStatus};
pub use callback::{EventKind, MachineId};
pub use capabilities::{Capabilities, LibraryVersion};
pub use config::Config;
pub use context::{Gammu, GammuBuilder};
pub use datetime::DateTime;
pub use debug::DebugInfo;
pub use error::{Error, ErrorCode, GsmError, Result};
pub use info::{BatteryCharge, Firmware, NetworkInfo, PhoneModel, SecurityCode, SignalQuality};
pub use ini::IniSection;
pub use machine::{MAX_CONFIGS, StateMachine};
pub use marshal::{Marshalled, Truncation, TruncationPolicy};
pub use sms::{
    MultiPartSmsEntry, MultiPartSmsInfo, SmsBody, SmsFolder, SmsMemoryStatus, SmsMessage, Smsc,
    UdhHeader,
};
pub use types::{
    BatteryType, ChargeState, ConnectionType, GprsState, Manufacturer, MemoryType, NetworkState,
    SecurityCodeType, SmsCoding, SmsPduType, SmsState, UdhType,
};

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Install a `tracing` subscriber printing to stderr. `level` is an
/// `EnvFilter` directive such as `"debug"` or `"gammu=trace"`; `None` means
/// `"info"`. Only the first call has an effect.
///
/// Library log lines from the phone connection are emitted at trace level
/// under the `gammu::native` target.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if another global subscriber is already set.
pub fn init_logger(level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let mut outcome = Ok(());
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::builder().parse_lossy(level.unwrap_or("info"));
        if let Err(err) = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init()
        {
            outcome = Err(Error::InvalidArgument(format!("logger: {err}")));
        }
    });
    outcome
}
