// Event entities
// Typed records decoded from webhook payloads

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::value_objects::{EventNames, MobileDeviceId};

/// A mobile device enrollment, as reported by the inventory system.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentEvent {
    pub device_id: MobileDeviceId,
    pub device_name: String,
    pub serial_number: String,
    /// Present for bedside devices, which are never renamed.
    pub room: Option<String>,
    pub event_timestamp_millis: i64,
    /// `event_timestamp_millis` rendered as local `YYYY-MM-DD HH:MM:SS`.
    pub enrolled_at: String,
}

impl EnrollmentEvent {
    pub fn assigned_room(&self) -> Option<&str> {
        self.room
            .as_deref()
            .map(str::trim)
            .filter(|room| !room.is_empty())
    }
}

/// A USB mass-storage insertion observed on an endpoint.
///
/// One of these becomes exactly one stored record. Nothing keys on
/// `event_uuid`, so replaying a payload stores it twice.
#[derive(Debug, Clone, PartialEq)]
pub struct UsbInsertionEvent {
    pub event_names: EventNames,
    pub event_uuid: String,
    /// Local wall-clock time of the event, without an offset.
    pub event_timestamp: NaiveDateTime,
    pub media_name: Option<String>,
    pub encryption_status: bool,
    pub host_name: Option<String>,
    pub host_serial: Option<String>,
    pub host_record: Map<String, Value>,
    pub device_vendor: Option<String>,
    pub device_model: Option<String>,
    pub device_serial: Option<String>,
    pub raw_body: Value,
    /// Read from the payload for diagnostics; not stored.
    pub event_type: Option<String>,
}
