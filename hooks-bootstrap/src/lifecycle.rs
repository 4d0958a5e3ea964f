use tracing::error;

use hooks_application::commands::{rename_device_commands, usb_event_commands};
use hooks_application::{RenameError, RenameOutcome, UsbError, UsbOutcome};
use hooks_domain::UsbDecode;

use crate::context::{RenameContext, UsbContext};
use crate::exit::{report, RenameExit, UsbExit};

fn rename_code(result: &Result<RenameOutcome, RenameError>) -> u8 {
    RenameExit::from_result(result).code()
}

fn usb_code(result: &Result<UsbOutcome, UsbError>) -> u8 {
    UsbExit::from_result(result).code()
}

/// Handles one `MobileDeviceEnrolled` webhook and returns the exit code.
pub async fn run_rename_device(raw_payload: &str) -> u8 {
    let event = match rename_device_commands::decode_enrollment(raw_payload) {
        Ok(event) => event,
        Err(err) => return report(Err(err), rename_code),
    };

    let context = match RenameContext::new().await {
        Ok(context) => context,
        Err(err) => {
            error!("configuration error: {:#}", err);
            println!("Configuration error: {:#}", err);
            return RenameExit::InvalidConfig.code();
        }
    };

    let result = rename_device_commands::rename_device(context.inventory.as_ref(), event).await;
    report(result, rename_code)
}

/// Handles one security-event webhook and returns the exit code.
pub async fn run_record_usb_event(raw_payload: &str) -> u8 {
    let event = match usb_event_commands::decode_usb_insertion(raw_payload) {
        Ok(UsbDecode::Insertion(event)) => event,
        Ok(UsbDecode::NotInsertion(event_names)) => {
            return report(Ok(UsbOutcome::NotUsbInsertion { event_names }), usb_code)
        }
        Err(err) => return report(Err(err), usb_code),
    };

    let context = match UsbContext::new().await {
        Ok(context) => context,
        Err(err) => {
            error!("configuration error: {:#}", err);
            println!("Configuration error: {:#}", err);
            return UsbExit::InvalidConfig.code();
        }
    };

    let result =
        usb_event_commands::persist_usb_event(context.repo.as_ref(), context.ensure_schema, &event)
            .await;
    report(result, usb_code)
}
