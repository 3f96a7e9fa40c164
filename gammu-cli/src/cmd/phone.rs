//! Phone information: identify, battery, signal, network, security.

use gammu::SecurityCode;
use serde_json::json;

use super::{EnterCodeArgs, Output};
use crate::session::Session;

/// Manufacturer, model, firmware and serial numbers.
pub fn identify(session: &Session, out: &Output) -> gammu::Result<()> {
    let sm = &session.sm;
    let manufacturer = sm.manufacturer()?;
    let model = sm.model()?;
    let info = sm.model_info().ok();
    let firmware = sm.firmware()?;
    let imei = sm.imei()?;
    // Not every phone reports these.
    let hardware = sm.hardware().unwrap_or_default();
    let product = sm.product_code().unwrap_or_default();
    let month = sm.manufacture_month().unwrap_or_default();

    let value = json!({
        "manufacturer": manufacturer,
        "model": model,
        "model_info": info,
        "firmware": firmware,
        "imei": imei,
        "hardware": hardware,
        "product_code": product,
        "manufacture_month": month,
    });
    out.emit(&value, || {
        println!("Manufacturer         : {manufacturer}");
        match &info {
            Some(info) => println!("Model                : {} ({model})", info.model),
            None => println!("Model                : {model}"),
        }
        if firmware.date.is_empty() {
            println!("Firmware             : {}", firmware.version);
        } else {
            println!("Firmware             : {} ({})", firmware.version, firmware.date);
        }
        for (label, v) in [
            ("Hardware", &hardware),
            ("Product code", &product),
            ("Manufactured", &month),
        ] {
            if !v.is_empty() {
                println!("{label:<21}: {v}");
            }
        }
        println!("IMEI                 : {imei}");
    })
}

pub fn battery(session: &Session, out: &Output) -> gammu::Result<()> {
    let charge = session.sm.battery_charge()?;
    out.emit(&charge, || {
        println!("Battery level        : {}%", charge.percent);
        println!("Battery type         : {:?}", charge.battery_type);
        if let Some(state) = charge.charge_state {
            println!("Charge state         : {state:?}");
        }
        if charge.battery_voltage > 0 {
            println!("Battery voltage      : {} mV", charge.battery_voltage);
        }
        if charge.battery_temperature > 0 {
            println!("Battery temperature  : {} C", charge.battery_temperature);
        }
    })
}

pub fn signal(session: &Session, out: &Output) -> gammu::Result<()> {
    let q = session.sm.signal_quality()?;
    out.emit(&q, || {
        if q.strength != -1 {
            println!("Signal strength      : {} dBm", q.strength);
        }
        if q.percent != -1 {
            println!("Network level        : {}%", q.percent);
        }
        if q.bit_error_rate != -1 {
            println!("Bit error rate       : {}%", q.bit_error_rate);
        }
    })
}

pub fn network(session: &Session, out: &Output) -> gammu::Result<()> {
    let info = session.sm.network_info()?;
    let operator = session.gammu.network_name(&info.network_code)?;
    let country = session.gammu.country_name(&info.network_code)?;
    let value = json!({
        "network": info,
        "operator": operator,
        "country": country,
    });
    out.emit(&value, || {
        println!("Network state        : {:?}", info.state);
        println!("Network              : {} ({operator}, {country})", info.network_code);
        if !info.network_name.is_empty() {
            println!("Name in phone        : {}", info.network_name);
        }
        println!("LAC                  : {}", info.lac);
        println!("CID                  : {}", info.cid);
        println!("GPRS                 : {:?}", info.gprs);
        if let Some(cid) = &info.packet_cid {
            println!("Packet CID           : {cid}");
        }
    })
}

pub fn security(session: &Session, out: &Output) -> gammu::Result<()> {
    let status = session.sm.security_status()?;
    out.emit(&status, || println!("Waiting for          : {status:?}"))
}

pub fn enter_code(session: &Session, args: &EnterCodeArgs) -> gammu::Result<()> {
    let code = SecurityCode {
        new_pin: args.new_pin.clone(),
        ..SecurityCode::new(args.code_type, args.code.clone())
    };
    session.sm.enter_security_code(&code)?;
    println!("Code accepted.");
    Ok(())
}
