//! Context, configuration and connection setup shared by all subcommands.

use std::path::PathBuf;
use std::sync::Arc;

use gammu::{
    Call, CallStatus, Config, DummyBackend, ErrorCode, Gammu, INBOX_FOLDER, OUTBOX_FOLDER,
    SmsMessage, SmsPduType, SmsState, StateMachine,
};

use crate::cmd::{BackendKind, Cli};

/// Number of times a command is retried by the library before giving up.
const REPLIES: i32 = 3;

/// Library context for the selected backend.
pub fn context(cli: &Cli) -> gammu::Result<Gammu> {
    match cli.backend {
        BackendKind::Native => native(),
        BackendKind::Dummy => Gammu::builder()
            .backend(Arc::new(seeded_dummy()?))
            .build(),
    }
}

#[cfg(feature = "native")]
fn native() -> gammu::Result<Gammu> {
    Ok(Gammu::native())
}

#[cfg(not(feature = "native"))]
fn native() -> gammu::Result<Gammu> {
    Err(gammu::Error::Unsupported(
        "built without the `native` feature; use --backend dummy".into(),
    ))
}

/// A dummy phone with something to look at.
fn seeded_dummy() -> gammu::Result<DummyBackend> {
    let device = DummyBackend::new();
    let inbox = |number: &str, text: &str, state| SmsMessage {
        pdu: SmsPduType::Deliver,
        state: Some(state),
        ..SmsMessage::text_message(number, text)
    };
    device.store_sms(
        INBOX_FOLDER,
        &inbox("+15550100", "Are we still on for tonight?", SmsState::Read),
    )?;
    device.store_sms(INBOX_FOLDER, &inbox("+15550101", "Your code is 428519", SmsState::UnRead))?;
    device.store_sms(OUTBOX_FOLDER, &SmsMessage::text_message("+15550100", "Yes, 8pm."))?;
    device.queue_incoming_sms(&inbox("+15550102", "Running late", SmsState::UnRead))?;
    device.queue_incoming_call(&Call {
        status: CallStatus::Incoming,
        call_id: Some(1),
        phone_number: "+15550103".into(),
    })?;
    Ok(device)
}

/// gammurc locations tried when `--config` is not given.
fn default_gammurc() -> Option<PathBuf> {
    let xdg = dirs::config_dir().map(|d| d.join("gammu").join("config"));
    let home = dirs::home_dir().map(|d| d.join(".gammurc"));
    [xdg, home].into_iter().flatten().find(|p| p.is_file())
}

/// The configuration section selected on the command line.
pub fn load_config(gammu: &Gammu, cli: &Cli) -> gammu::Result<Config> {
    let path = cli.config.clone().or_else(default_gammurc);
    let ini = match gammu.find_gammurc(path.as_deref()) {
        Ok(ini) => ini,
        Err(e)
            if cli.backend == BackendKind::Dummy
                && e.code() == Some(ErrorCode::FileNotExist) =>
        {
            tracing::info!("no gammurc found, using the dummy defaults");
            return Ok(Config::new("/dev/ttyUSB0", "at"));
        }
        Err(e) => return Err(e),
    };
    tracing::debug!(path = ?path, section = cli.section, "reading configuration");
    gammu.read_config(&ini, cli.section)
}

/// A connected state machine.
pub struct Session {
    pub gammu: Gammu,
    pub sm: StateMachine,
}

impl Session {
    pub fn open(cli: &Cli) -> gammu::Result<Self> {
        let gammu = context(cli)?;
        let config = load_config(&gammu, cli)?;
        let sm = gammu.state_machine()?;
        sm.push_config(&config)?;
        sm.init_connection(REPLIES)?;
        tracing::debug!(device = %config.device, connection = %config.connection, "connected");
        Ok(Self { gammu, sm })
    }

    pub fn close(self) -> gammu::Result<()> {
        self.sm.close()
    }
}
