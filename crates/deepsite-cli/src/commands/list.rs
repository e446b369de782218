//! List the session user's websites

use anyhow::Result;
use colored::Colorize;
use deepsite_core::{Orchestrator, Session};

use crate::output::{OutputFormat, WebsiteSummary, print_json};

/// Execute the list command
pub async fn execute(
    orchestrator: &Orchestrator,
    session: Option<&Session>,
    format: OutputFormat,
) -> Result<()> {
    let websites = orchestrator.list_websites(session).await?;

    match format {
        OutputFormat::Json => {
            let summaries: Vec<WebsiteSummary<'_>> = websites.iter().map(Into::into).collect();
            print_json(&summaries)?;
        },
        OutputFormat::Text => {
            if websites.is_empty() {
                println!("No websites yet.");
                println!(
                    "Create one with: {}",
                    "deepsite generate \"A landing page for a bakery\"".cyan()
                );
                return Ok(());
            }

            for website in &websites {
                println!(
                    "{} {}",
                    website.title.bold(),
                    website.id.as_str().bright_black()
                );
                println!(
                    "  {}",
                    website.created_at.format("%Y-%m-%d %H:%M UTC")
                );
                if !website.description.is_empty() {
                    println!("  {}", website.description);
                }
            }
        },
    }

    Ok(())
}
