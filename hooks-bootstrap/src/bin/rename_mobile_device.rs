use std::process::ExitCode;

use hooks_bootstrap::cli::{parse_rename_args, Invocation};
use hooks_infrastructure::CONFIG_PATH_ENV;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _log_guard = hooks_bootstrap::init_tracing("rename-mobile-device");

    let args = match parse_rename_args(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Exit(code) => return ExitCode::from(code),
    };
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_PATH_ENV, config);
    }

    ExitCode::from(hooks_bootstrap::run_rename_device(&args.payload).await)
}
