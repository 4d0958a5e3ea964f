use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::entities::{
    EnrollmentEvent, EnrollmentWebhook, UsbFactsEnvelope, UsbInsertionEvent, UsbWebhook,
};
use crate::utils::{format_enrollment_time, usb_event_local_time};
use crate::value_objects::{EventNames, MobileDeviceId};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Result of decoding a security event: only insertions carry a full record.
#[derive(Debug)]
pub enum UsbDecode {
    Insertion(Box<UsbInsertionEvent>),
    NotInsertion(EventNames),
}

pub fn decode_enrollment_event(raw: &str) -> Result<EnrollmentEvent, DecodeError> {
    let webhook: EnrollmentWebhook = serde_json::from_str(raw)?;
    let body = webhook.event;

    let device_id = MobileDeviceId::new(body.jss_id.into_text())
        .ok_or_else(|| DecodeError::Invalid("event.jssID is empty".to_string()))?;
    let event_timestamp_millis = webhook.webhook.event_timestamp;
    let enrolled_at = format_enrollment_time(event_timestamp_millis).ok_or_else(|| {
        DecodeError::Invalid(format!(
            "webhook.eventTimestamp {} is out of range",
            event_timestamp_millis
        ))
    })?;

    Ok(EnrollmentEvent {
        device_id,
        device_name: body.device_name,
        serial_number: body.serial_number,
        room: body.room,
        event_timestamp_millis,
        enrolled_at,
    })
}

/// Reads the matched fact names. Facts without a name are skipped.
pub fn read_event_names(payload: &Value) -> Result<EventNames, DecodeError> {
    let envelope = UsbFactsEnvelope::deserialize(payload)?;
    Ok(envelope
        .input
        .matched
        .facts
        .into_iter()
        .filter_map(|fact| fact.name)
        .collect())
}

/// Gates on `USBInserted` before requiring the rest of the event shape.
pub fn decode_usb_event(raw: &str) -> Result<UsbDecode, DecodeError> {
    let payload: Value = serde_json::from_str(raw)?;
    let event_names = read_event_names(&payload)?;
    if !event_names.is_usb_insertion() {
        return Ok(UsbDecode::NotInsertion(event_names));
    }

    let webhook = UsbWebhook::deserialize(&payload)?;
    let input = webhook.input;
    let event = input.matched.event;

    let event_timestamp = usb_event_local_time(event.timestamp).ok_or_else(|| {
        DecodeError::Invalid(format!(
            "input.match.event.timestamp {} is out of range",
            event.timestamp
        ))
    })?;
    let host_name = host_text(&input.host, "hostname");
    let host_serial = host_text(&input.host, "serial");

    Ok(UsbDecode::Insertion(Box::new(UsbInsertionEvent {
        event_names,
        event_uuid: event.uuid,
        event_timestamp,
        media_name: event.device.media_name,
        encryption_status: event.device.is_encrypted,
        host_name,
        host_serial,
        host_record: input.host,
        device_vendor: event.device.vendor_name,
        device_model: event.device.device_model,
        device_serial: event.device.serial_number,
        raw_body: payload,
        event_type: input.event_type,
    })))
}

fn host_text(host: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    host.get(key).and_then(Value::as_str).map(ToString::to_string)
}
