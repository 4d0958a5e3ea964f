use std::fmt;

use hooks_domain::{AssetTag, EventNames, MobileDeviceId};

#[derive(Debug, Clone, PartialEq)]
pub struct RenameSummary {
    pub device_id: MobileDeviceId,
    pub serial_number: String,
    pub enrolled_at: String,
    pub old_name: String,
    pub new_name: AssetTag,
}

/// Terminal states of the rename pipeline that are not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RenameOutcome {
    Renamed(RenameSummary),
    BedsideDevice { device_id: MobileDeviceId, room: String },
    NoAssetTag { device_id: MobileDeviceId },
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameOutcome::Renamed(summary) => write!(
                f,
                "Device with SN {} was enrolled at {} and renamed from {} to {}",
                summary.serial_number, summary.enrolled_at, summary.old_name, summary.new_name
            ),
            RenameOutcome::BedsideDevice { device_id, room } => write!(
                f,
                "Device with ID {} has an assigned room ({}) - this is a bedside device, not renaming.",
                device_id, room
            ),
            RenameOutcome::NoAssetTag { device_id } => write!(
                f,
                "No asset tag detected for ID {}. Exiting without renaming.",
                device_id
            ),
        }
    }
}

/// Terminal states of the USB event pipeline that are not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum UsbOutcome {
    Recorded {
        record_id: String,
        event_uuid: String,
        host_serial: Option<String>,
    },
    NotUsbInsertion { event_names: EventNames },
}

impl fmt::Display for UsbOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsbOutcome::Recorded {
                record_id,
                event_uuid,
                host_serial,
            } => write!(
                f,
                "Recorded USB insertion {} from host {} as {}",
                event_uuid,
                host_serial.as_deref().unwrap_or("<unknown>"),
                record_id
            ),
            UsbOutcome::NotUsbInsertion { event_names } => write!(
                f,
                "Not a USB inserted event (facts: {})",
                event_names.as_slice().join(", ")
            ),
        }
    }
}
