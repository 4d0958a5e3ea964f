// Process exit codes observed by the webhook dispatcher.

use hooks_application::{RenameError, RenameOutcome, UsbError, UsbOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RenameExit {
    Renamed = 0,
    MalformedPayload = 1,
    LookupFailed = 2,
    NoAssetTag = 3,
    RenameFailed = 4,
    BedsideDevice = 5,
    InvalidConfig = 6,
}

impl RenameExit {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_result(result: &Result<RenameOutcome, RenameError>) -> Self {
        match result {
            Ok(RenameOutcome::Renamed(_)) => RenameExit::Renamed,
            Ok(RenameOutcome::NoAssetTag { .. }) => RenameExit::NoAssetTag,
            Ok(RenameOutcome::BedsideDevice { .. }) => RenameExit::BedsideDevice,
            Err(RenameError::MalformedPayload(_)) => RenameExit::MalformedPayload,
            Err(RenameError::LookupFailed { .. }) => RenameExit::LookupFailed,
            Err(RenameError::RenameFailed { .. }) => RenameExit::RenameFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UsbExit {
    Recorded = 0,
    MalformedPayload = 1,
    NotUsbInsertion = 2,
    PersistFailed = 3,
    InvalidConfig = 4,
}

impl UsbExit {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_result(result: &Result<UsbOutcome, UsbError>) -> Self {
        match result {
            Ok(UsbOutcome::Recorded { .. }) => UsbExit::Recorded,
            Ok(UsbOutcome::NotUsbInsertion { .. }) => UsbExit::NotUsbInsertion,
            Err(UsbError::MalformedPayload(_)) => UsbExit::MalformedPayload,
            Err(UsbError::PersistFailed { .. }) => UsbExit::PersistFailed,
        }
    }
}

/// Prints the outcome line for the dispatcher's log and returns the code.
pub fn report<T, E>(result: Result<T, E>, exit: impl Fn(&Result<T, E>) -> u8) -> u8
where
    T: std::fmt::Display,
    E: std::fmt::Display,
{
    let code = exit(&result);
    match &result {
        Ok(outcome) => println!("{}", outcome),
        Err(err) => println!("{}", err),
    }
    code
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use hooks_domain::{AssetTag, EventNames, MobileDeviceId};
    use hooks_application::RenameSummary;

    use super::*;

    fn device_id() -> MobileDeviceId {
        MobileDeviceId::new("31").unwrap()
    }

    #[test]
    fn rename_codes_match_the_documented_table() {
        let renamed = Ok(RenameOutcome::Renamed(RenameSummary {
            device_id: device_id(),
            serial_number: "F9FXK0ABC".to_string(),
            enrolled_at: "2023-11-14 22:13:20".to_string(),
            old_name: "iPad".to_string(),
            new_name: AssetTag::new("CART-01").unwrap(),
        }));
        assert_eq!(RenameExit::from_result(&renamed).code(), 0);

        let malformed = Err(RenameError::MalformedPayload("eof".to_string()));
        assert_eq!(RenameExit::from_result(&malformed).code(), 1);

        let lookup = Err(RenameError::LookupFailed {
            device_id: device_id(),
            source: anyhow!("timeout"),
        });
        assert_eq!(RenameExit::from_result(&lookup).code(), 2);

        let no_tag = Ok(RenameOutcome::NoAssetTag {
            device_id: device_id(),
        });
        assert_eq!(RenameExit::from_result(&no_tag).code(), 3);

        let rename = Err(RenameError::RenameFailed {
            device_id: device_id(),
            source: anyhow!("401"),
        });
        assert_eq!(RenameExit::from_result(&rename).code(), 4);

        let bedside = Ok(RenameOutcome::BedsideDevice {
            device_id: device_id(),
            room: "ICU-4".to_string(),
        });
        assert_eq!(RenameExit::from_result(&bedside).code(), 5);
        assert_eq!(RenameExit::InvalidConfig.code(), 6);
    }

    #[test]
    fn usb_codes_match_the_documented_table() {
        let recorded = Ok(UsbOutcome::Recorded {
            record_id: "r-1".to_string(),
            event_uuid: "abc-123".to_string(),
            host_serial: None,
        });
        assert_eq!(UsbExit::from_result(&recorded).code(), 0);

        let malformed = Err(UsbError::MalformedPayload("eof".to_string()));
        assert_eq!(UsbExit::from_result(&malformed).code(), 1);

        let skipped = Ok(UsbOutcome::NotUsbInsertion {
            event_names: EventNames::new(vec!["USBEjected".to_string()]),
        });
        assert_eq!(UsbExit::from_result(&skipped).code(), 2);

        let persist = Err(UsbError::PersistFailed {
            event_uuid: "abc-123".to_string(),
            source: anyhow!("connection refused"),
        });
        assert_eq!(UsbExit::from_result(&persist).code(), 3);
        assert_eq!(UsbExit::InvalidConfig.code(), 4);
    }

    #[test]
    fn report_returns_mapped_code() {
        let result: Result<UsbOutcome, UsbError> =
            Err(UsbError::MalformedPayload("expected value".to_string()));
        let code = report(result, |result| UsbExit::from_result(result).code());
        assert_eq!(code, 1);
    }
}
