//! deepsite CLI - generate websites from a natural-language prompt
//!
//! The binary entry point calls [`run`]; each command lives in its own
//! module under `commands`.

use anyhow::Result;
use clap::Parser;
use deepsite_core::{Orchestrator, Session};

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::initialize_logging;

/// Execute the deepsite CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the command fails. Use
/// [`error::exit_code_from_error`] to map it to an exit code.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Completions { shell } => {
            commands::generate_completions(*shell);
            Ok(())
        },
        Commands::Config => {
            let config = utils::load_config(&cli)?;
            commands::show_config(&config, &utils::config_path(&cli)?)
        },
        Commands::Generate {
            prompt,
            preview_image,
            format,
        } => {
            let (orchestrator, session) = pipeline(&cli)?;
            commands::generate_website(
                orchestrator,
                session.as_ref(),
                prompt,
                preview_image.clone(),
                *format,
            )
            .await
        },
        Commands::List { format } => {
            let (orchestrator, session) = pipeline(&cli)?;
            commands::list_websites(&orchestrator, session.as_ref(), *format).await
        },
        Commands::Show { id, content, format } => {
            let (orchestrator, session) = pipeline(&cli)?;
            commands::show_website(&orchestrator, session.as_ref(), id, *content, *format).await
        },
        Commands::Export { id, dir, force } => {
            let (orchestrator, session) = pipeline(&cli)?;
            commands::export_website(&orchestrator, session.as_ref(), id, dir, *force).await
        },
    }
}

fn pipeline(cli: &Cli) -> Result<(Orchestrator, Option<Session>)> {
    let config = utils::load_config(cli)?;
    let session = utils::session(cli)?;
    let orchestrator = utils::orchestrator(&config, session.as_ref())?;
    Ok((orchestrator, session))
}
