//! Show one website

use anyhow::Result;
use deepsite_core::{ArtifactId, Orchestrator, Session};

use crate::output::{OutputFormat, WebsiteSummary, print_content_text, print_json, print_website_text};

/// Execute the show command
pub async fn execute(
    orchestrator: &Orchestrator,
    session: Option<&Session>,
    id: &str,
    content: bool,
    format: OutputFormat,
) -> Result<()> {
    let website = orchestrator.get_website(&ArtifactId::new(id), session).await?;

    match format {
        OutputFormat::Json if content => print_json(&website)?,
        OutputFormat::Json => print_json(&WebsiteSummary::from(&website))?,
        OutputFormat::Text => {
            print_website_text(&website);
            if content {
                print_content_text(&website);
            }
        },
    }

    Ok(())
}
