//! CLI argument definitions and output helpers.

pub mod phone;
pub mod sms;
pub mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gammu::SecurityCodeType;
use serde_json::Value;

/// Query and drive a mobile phone through libGammu.
#[derive(Parser)]
#[command(name = "gammu-rs", version, about)]
pub struct Cli {
    /// Path to a gammurc file (default: the usual gammurc locations).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Configuration section: 0 is `[gammu]`, N is `[gammuN]`.
    #[arg(short, long, default_value = "0", global = true)]
    pub section: i32,

    /// Which library implementation to use.
    #[arg(short, long, value_enum, default_value_t = BackendKind::default(), global = true)]
    pub backend: BackendKind,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log filter directive, e.g. `gammu=trace`. Overrides `-v`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_filter(&self) -> &str {
        if let Some(level) = &self.log_level {
            return level;
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// The linked libGammu.
    Native,
    /// An in-memory phone with a few stored messages.
    Dummy,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(feature = "native") {
            Self::Native
        } else {
            Self::Dummy
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Manufacturer, model, firmware and IMEI.
    Identify,
    /// Battery state.
    Battery,
    /// Signal strength.
    Signal,
    /// Network registration.
    Network,
    /// Which security code the phone waits for.
    Security,
    /// Answer the phone's security prompt.
    EnterCode(EnterCodeArgs),
    /// SMS folders.
    Folders,
    /// SMS memory usage.
    SmsStatus,
    /// Every stored message.
    #[command(alias = "getallsms")]
    GetAllSms,
    /// One stored message.
    GetSms {
        /// Folder number.
        folder: i32,
        /// Location inside the folder.
        location: i32,
    },
    /// Store a text message in the phone.
    AddSms {
        /// Recipient.
        number: String,
        /// Message text.
        text: String,
    },
    /// Delete a stored message.
    DeleteSms {
        /// Folder number.
        folder: i32,
        /// Location inside the folder.
        location: i32,
    },
    /// Print incoming SMS and call events.
    Monitor {
        /// Stop after this many seconds.
        #[arg(short = 't', long, default_value = "30")]
        seconds: u64,
    },
    /// List every error code with its message.
    ErrorCodes,
    /// Validate a date (YYYY-MM-DD) and optional time (HH:MM:SS).
    CheckDate {
        /// Date, YYYY-MM-DD.
        date: String,
        /// Time, HH:MM:SS.
        time: Option<String>,
    },
    /// Library version and capabilities.
    Library,
    /// Show the selected gammurc section.
    Config,
}

/// Arguments for `enter-code`.
#[derive(clap::Args)]
pub struct EnterCodeArgs {
    /// Code type.
    #[arg(long = "type", value_parser = parse_code_type, default_value = "pin")]
    pub code_type: SecurityCodeType,

    /// The code.
    pub code: String,

    /// New PIN, when answering a PUK prompt.
    #[arg(long)]
    pub new_pin: Option<String>,
}

pub fn parse_code_type(s: &str) -> Result<SecurityCodeType, String> {
    match s.to_ascii_lowercase().as_str() {
        "pin" => Ok(SecurityCodeType::Pin),
        "pin2" => Ok(SecurityCodeType::Pin2),
        "puk" => Ok(SecurityCodeType::Puk),
        "puk2" => Ok(SecurityCodeType::Puk2),
        "phone" => Ok(SecurityCodeType::Phone),
        "network" => Ok(SecurityCodeType::Network),
        _ => Err(format!(
            "unknown code type: {s} (expected: pin, pin2, puk, puk2, phone, network)"
        )),
    }
}

/// Text or JSON printer shared by all subcommands.
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as JSON, or `text` otherwise.
    pub fn emit<T: serde::Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce(),
    ) -> gammu::Result<()> {
        if self.json {
            println!("{}", to_json(value)?);
        } else {
            text();
        }
        Ok(())
    }

    /// Print one JSON line per streamed event.
    pub fn event(&self, value: &Value, text: &str) {
        if self.json {
            println!("{value}");
        } else {
            println!("{text}");
        }
    }
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> gammu::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| gammu::Error::InvalidArgument(format!("json: {e}")))
}
