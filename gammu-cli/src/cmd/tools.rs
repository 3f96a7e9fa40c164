//! Commands that do not need a phone.

use gammu::{Config, DateTime, ErrorCode, Gammu};
use serde_json::json;

use super::Output;

pub fn error_codes(gammu: &Gammu, out: &Output) -> gammu::Result<()> {
    let rows: Vec<_> = ErrorCode::ALL
        .iter()
        .map(|c| (*c, gammu.error_message(*c)))
        .collect();
    let value: Vec<_> = rows
        .iter()
        .map(|(c, msg)| json!({ "code": c.raw(), "name": c.name(), "message": msg }))
        .collect();
    out.emit(&value, || {
        for (c, msg) in &rows {
            println!("{:>5}  {:<28} {msg}", c.raw(), c.name());
        }
    })
}

fn parse_fields<const N: usize>(s: &str, sep: char, what: &str) -> gammu::Result<[i32; N]> {
    let invalid = || gammu::Error::InvalidArgument(format!("malformed {what}: {s}"));
    let fields: Vec<i32> = s
        .split(sep)
        .map(|f| f.trim().parse::<i32>().map_err(|_| invalid()))
        .collect::<gammu::Result<_>>()?;
    fields.try_into().map_err(|_| invalid())
}

pub fn check_date(
    gammu: &Gammu,
    date: &str,
    time: Option<&str>,
    out: &Output,
) -> gammu::Result<()> {
    let [year, month, day] = parse_fields(date, '-', "date")?;
    let [hour, minute, second] = match time {
        Some(t) => parse_fields(t, ':', "time")?,
        None => [0, 0, 0],
    };
    let dt = DateTime::date(year, month, day).at(hour, minute, second);
    let date_ok = gammu.check_date(&dt);
    let time_ok = gammu.check_time(&dt);
    let formatted = if date_ok && time_ok {
        Some(gammu.os_date_time(&dt, false)?)
    } else {
        None
    };
    let value = json!({
        "date_valid": date_ok,
        "time_valid": time_ok,
        "formatted": formatted,
    });
    out.emit(&value, || {
        println!("Date                 : {}", if date_ok { "valid" } else { "invalid" });
        println!("Time                 : {}", if time_ok { "valid" } else { "invalid" });
        if let Some(f) = &formatted {
            println!("Formatted            : {f}");
        }
    })?;
    if date_ok && time_ok {
        Ok(())
    } else {
        Err(gammu::Error::InvalidArgument(format!("{dt} is not a valid date and time")))
    }
}

pub fn library(gammu: &Gammu, out: &Output) -> gammu::Result<()> {
    let value = json!({
        "version": gammu.version_string(),
        "capabilities": gammu.capabilities(),
    });
    out.emit(&value, || {
        let caps = gammu.capabilities();
        println!("libGammu             : {} ({})", gammu.version(), gammu.version_string());
        println!("GPRS state           : {}", caps.gprs_state);
        println!("Packet network info  : {}", caps.packet_network_info);
        println!("UCS-2 cell IDs       : {}", caps.unicode_cell_ids);
        println!("Boolean config flags : {}", caps.boolean_config_flags);
    })
}

pub fn config(config: &Config, out: &Output) -> gammu::Result<()> {
    out.emit(config, || {
        println!("Device               : {}", config.device);
        println!("Connection           : {}", config.connection);
        if !config.model.is_empty() {
            println!("Model                : {}", config.model);
        }
        if !config.debug_file.is_empty() {
            println!("Log file             : {}", config.debug_file);
        }
        if !config.debug_level.is_empty() {
            println!("Log format           : {}", config.debug_level);
        }
        println!("Synchronize time     : {}", config.sync_time);
        println!("Lock device          : {}", config.lock_device);
    })
}
