// Device Hooks Bootstrap

pub mod cli;
pub mod context;
pub mod exit;
pub mod lifecycle;
pub mod logging;

pub use exit::{RenameExit, UsbExit};
pub use lifecycle::{run_record_usb_event, run_rename_device};
pub use logging::init_tracing;
