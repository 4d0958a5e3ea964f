use thiserror::Error;

use hooks_domain::{DecodeError, MobileDeviceId};

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("couldn't load event JSON for processing: {0}")]
    MalformedPayload(String),
    #[error("could not GET device record with ID {device_id}: {source}")]
    LookupFailed {
        device_id: MobileDeviceId,
        #[source]
        source: anyhow::Error,
    },
    #[error("could not rename the device (ID {device_id}): {source}")]
    RenameFailed {
        device_id: MobileDeviceId,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Error)]
pub enum UsbError {
    #[error("couldn't load event JSON for processing: {0}")]
    MalformedPayload(String),
    #[error("could not persist USB event {event_uuid}: {source}")]
    PersistFailed {
        event_uuid: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<DecodeError> for RenameError {
    fn from(value: DecodeError) -> Self {
        RenameError::MalformedPayload(value.to_string())
    }
}

impl From<DecodeError> for UsbError {
    fn from(value: DecodeError) -> Self {
        UsbError::MalformedPayload(value.to_string())
    }
}
