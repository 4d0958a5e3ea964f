// Device Hooks Application Layer

pub mod commands;
pub mod error;
pub mod outcome;

pub use error::{RenameError, UsbError};
pub use outcome::{RenameOutcome, RenameSummary, UsbOutcome};
