use std::env;
use std::process::ExitCode;

use tracing::error;

mod app;

use app::{build_app, usage_text, BootstrapError, Startup};

fn main() -> ExitCode {
    match build_app(env::args().skip(1)) {
        Ok(Startup::Help) => {
            println!("{}", usage_text());
            ExitCode::SUCCESS
        }
        Ok(Startup::Run(wiring)) => app::run(wiring),
        Err(err) => {
            error!(error = %err, "startup_failed");
            if matches!(err, BootstrapError::Cli(_)) {
                eprintln!("{}", usage_text());
            }
            ExitCode::FAILURE
        }
    }
}
