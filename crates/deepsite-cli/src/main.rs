//! Entry point for the `deepsite` binary.

use std::process::ExitCode;

use colored::Colorize;
use deepsite_cli::error::exit_code_from_error;

#[tokio::main]
async fn main() -> ExitCode {
    match deepsite_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
