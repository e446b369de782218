//! Generate a website from a prompt and save it

use anyhow::Result;
use colored::Colorize;
use deepsite_core::{Orchestrator, Session};

use crate::output::{OutputFormat, print_json, print_website_text};

/// Execute the generate command
pub async fn execute(
    orchestrator: Orchestrator,
    session: Option<&Session>,
    prompt: &[String],
    preview_image: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let orchestrator = match preview_image {
        Some(url) => orchestrator.with_preview_image(Some(url)),
        None => orchestrator,
    };

    let website = orchestrator
        .create_website(&prompt.join(" "), session)
        .await?;

    match format {
        OutputFormat::Text => {
            println!("{} Saved website", "✓".green());
            print_website_text(&website);
            println!();
            println!(
                "Export it with: {}",
                format!("deepsite export {} <DIR>", website.id).cyan()
            );
        },
        OutputFormat::Json => print_json(&website)?,
    }

    Ok(())
}
