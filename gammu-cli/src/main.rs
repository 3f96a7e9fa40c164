//! gammu-rs: query and drive a phone from the command line.
//!
//! Every subcommand opens one state machine from the selected gammurc
//! section, runs, and closes it again.

#![allow(
    missing_docs,
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

mod cmd;
mod session;

use std::process;

use clap::Parser;

use crate::cmd::{Cli, Command};
use crate::session::Session;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = gammu::init_logger(Some(cli.log_filter())) {
        eprintln!("warning: {e}");
    }
    if let Err(e) = run(&cli) {
        eprintln!("fatal: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> gammu::Result<()> {
    let out = cmd::Output::new(cli.json);

    // Commands that never touch the phone.
    match &cli.command {
        Command::ErrorCodes => return cmd::tools::error_codes(&session::context(cli)?, &out),
        Command::CheckDate { date, time } => {
            return cmd::tools::check_date(&session::context(cli)?, date, time.as_deref(), &out);
        }
        Command::Library => return cmd::tools::library(&session::context(cli)?, &out),
        Command::Config => {
            let gammu = session::context(cli)?;
            return cmd::tools::config(&session::load_config(&gammu, cli)?, &out);
        }
        _ => {}
    }

    let session = Session::open(cli)?;
    let result = match &cli.command {
        Command::Identify => cmd::phone::identify(&session, &out),
        Command::Battery => cmd::phone::battery(&session, &out),
        Command::Signal => cmd::phone::signal(&session, &out),
        Command::Network => cmd::phone::network(&session, &out),
        Command::Security => cmd::phone::security(&session, &out),
        Command::EnterCode(args) => cmd::phone::enter_code(&session, args),
        Command::Folders => cmd::sms::folders(&session, &out),
        Command::SmsStatus => cmd::sms::status(&session, &out),
        Command::GetAllSms => cmd::sms::get_all(&session, &out),
        Command::GetSms { folder, location } => cmd::sms::get(&session, *folder, *location, &out),
        Command::AddSms { number, text } => cmd::sms::add(&session, number, text, &out),
        Command::DeleteSms { folder, location } => cmd::sms::delete(&session, *folder, *location),
        Command::Monitor { seconds } => cmd::sms::monitor(&session, *seconds, &out),
        Command::ErrorCodes | Command::CheckDate { .. } | Command::Library | Command::Config => {
            Ok(())
        }
    };
    let closed = session.close();
    result.and(closed)
}
