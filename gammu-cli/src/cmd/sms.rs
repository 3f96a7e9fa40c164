//! SMS storage and event monitoring.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use gammu::{ErrorCode, SmsBody, SmsMessage};
use serde_json::json;

use super::Output;
use crate::session::Session;

fn print_message(sms: &SmsMessage) {
    println!("Location {}, folder {}", sms.location, sms.folder);
    println!("Number               : \"{}\"", sms.number);
    if !sms.date_time.is_unset() {
        println!("Sent                 : {}", sms.date_time);
    }
    if let Some(state) = sms.state {
        println!("Status               : {state:?}");
    }
    match &sms.body {
        SmsBody::Text(text) => println!("\n{text}\n"),
        SmsBody::Data(data) => println!("\n<{} bytes of binary data>\n", data.len()),
    }
}

pub fn folders(session: &Session, out: &Output) -> gammu::Result<()> {
    let folders = session.sm.sms_folders()?;
    out.emit(&folders, || {
        for (n, f) in folders.iter().enumerate() {
            let kind = match (f.inbox, f.outbox) {
                (true, _) => "Inbox",
                (_, true) => "Outbox",
                _ => "",
            };
            println!("{:>2}. \"{}\" {kind}", n + 1, f.name);
        }
    })
}

pub fn status(session: &Session, out: &Output) -> gammu::Result<()> {
    let s = session.sm.sms_status()?;
    out.emit(&s, || {
        println!("SIM   : used {}, unread {}, size {}", s.sim_used, s.sim_unread, s.sim_size);
        println!("Phone : used {}, unread {}, size {}", s.phone_used, s.phone_unread, s.phone_size);
        if s.templates_used > 0 {
            println!("Templates : {}", s.templates_used);
        }
    })
}

/// Walk the whole message store with `get_next_sms`.
pub fn get_all(session: &Session, out: &Output) -> gammu::Result<()> {
    let mut messages: Vec<SmsMessage> = Vec::new();
    let (mut location, mut folder, mut start) = (0, 0, true);
    loop {
        let parts = match session.sm.get_next_sms(location, folder, start) {
            Ok(parts) => parts,
            Err(e) if e.code() == Some(ErrorCode::Empty) => break,
            Err(e) => return Err(e),
        };
        let Some(last) = parts.last() else { break };
        (location, folder, start) = (last.location, last.folder, false);
        messages.extend(parts);
    }
    tracing::debug!(count = messages.len(), "messages read");
    out.emit(&messages, || {
        for sms in &messages {
            print_message(sms);
        }
        println!("{} messages", messages.len());
    })
}

pub fn get(session: &Session, folder: i32, location: i32, out: &Output) -> gammu::Result<()> {
    let parts = session.sm.get_sms(location, folder)?;
    out.emit(&parts, || parts.iter().for_each(print_message))
}

pub fn add(session: &Session, number: &str, text: &str, out: &Output) -> gammu::Result<()> {
    let (folder, location) = session.sm.add_sms(&SmsMessage::text_message(number, text))?;
    out.emit(&json!({ "folder": folder, "location": location }), || {
        println!("Saved in folder {folder}, location {location}");
    })
}

pub fn delete(session: &Session, folder: i32, location: i32) -> gammu::Result<()> {
    session.sm.delete_sms(location, folder)?;
    println!("Deleted location {location} in folder {folder}");
    Ok(())
}

/// Print events until `seconds` have passed.
///
/// Listeners only forward into a channel; printing happens here so output
/// from both event kinds stays in order.
pub fn monitor(session: &Session, seconds: u64, out: &Output) -> gammu::Result<()> {
    let sm = &session.sm;
    let (tx, rx) = mpsc::channel();

    let sms_tx = tx.clone();
    sm.on_incoming_sms(move |_, sms| {
        let text = format!("SMS from {}: {}", sms.number, sms.text().unwrap_or("<binary>"));
        let _ = sms_tx.send((json!({ "event": "sms", "message": sms }), text));
    })?;
    let call_tx = tx;
    sm.on_incoming_call(move |_, call| {
        let text = format!("Call {:?} from {}", call.status, call.phone_number);
        let _ = call_tx.send((json!({ "event": "call", "call": call }), text));
    })?;

    let deadline = Instant::now() + Duration::from_secs(seconds);
    if !out.is_json() {
        println!("Monitoring for {seconds}s...");
    }
    while Instant::now() < deadline {
        sm.read_device(true)?;
        while let Ok((value, text)) = rx.try_recv() {
            out.event(&value, &text);
        }
        thread::sleep(Duration::from_millis(200));
    }

    sm.disable_incoming_sms()?;
    sm.disable_incoming_call()
}
