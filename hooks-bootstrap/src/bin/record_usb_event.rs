use std::process::ExitCode;

use hooks_bootstrap::cli::{parse_usb_args, Invocation};
use hooks_infrastructure::CONFIG_PATH_ENV;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _log_guard = hooks_bootstrap::init_tracing("record-usb-event");

    let args = match parse_usb_args(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Exit(code) => return ExitCode::from(code),
    };
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_PATH_ENV, config);
    }

    ExitCode::from(hooks_bootstrap::run_record_usb_event(&args.payload).await)
}
