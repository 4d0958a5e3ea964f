use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::Parser;

use crate::exit::{RenameExit, UsbExit};

#[derive(Parser, Debug)]
#[command(name = "rename-mobile-device")]
#[command(about = "Renames a newly enrolled mobile device to its asset tag", long_about = None)]
pub struct RenameArgs {
    /// Raw MobileDeviceEnrolled webhook body
    pub payload: String,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "record-usb-event")]
#[command(about = "Records USB insertion security events", long_about = None)]
pub struct UsbArgs {
    /// Raw security-event webhook body
    pub payload: String,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// What a binary should do with its command line.
#[derive(Debug)]
pub enum Invocation<A> {
    Run(A),
    Exit(u8),
}

pub fn parse_rename_args<I, T>(args: I) -> Invocation<RenameArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    parse_invocation(args, RenameExit::MalformedPayload.code())
}

pub fn parse_usb_args<I, T>(args: I) -> Invocation<UsbArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    parse_invocation(args, UsbExit::MalformedPayload.code())
}

/// Usage errors exit with the pipeline's malformed-payload code instead of
/// clap's own 2, which the dispatcher would read as a pipeline outcome.
fn parse_invocation<A, I, T>(args: I, malformed_code: u8) -> Invocation<A>
where
    A: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match A::try_parse_from(args) {
        Ok(parsed) => Invocation::Run(parsed),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                Invocation::Exit(0)
            }
            _ => {
                eprintln!("{}", err);
                Invocation::Exit(malformed_code)
            }
        },
    }
}
