//! Output formats and website rendering shared by commands.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use deepsite_core::WebsiteArtifact;
use serde::Serialize;

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted text
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

impl OutputFormat {
    /// Check if this format is machine-readable
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Listing entry without the (large) generated content
#[derive(Debug, Serialize)]
pub struct WebsiteSummary<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    preview_image_url: Option<&'a str>,
    created_at: String,
}

impl<'a> From<&'a WebsiteArtifact> for WebsiteSummary<'a> {
    fn from(website: &'a WebsiteArtifact) -> Self {
        Self {
            id: website.id.as_str(),
            title: &website.title,
            description: &website.description,
            preview_image_url: website.preview_image_url.as_deref(),
            created_at: website.created_at.to_rfc3339(),
        }
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Short human-readable description of a website
pub fn print_website_text(website: &WebsiteArtifact) {
    println!("{}", website.title.bold());
    println!("  {} {}", "id:".bright_black(), website.id);
    println!("  {} {}", "owner:".bright_black(), website.owner);
    println!(
        "  {} {}",
        "created:".bright_black(),
        website.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if !website.description.is_empty() {
        println!("  {} {}", "description:".bright_black(), website.description);
    }
    if let Some(preview) = &website.preview_image_url {
        println!("  {} {}", "preview:".bright_black(), preview);
    }
}

/// Print the generated files of a website
pub fn print_content_text(website: &WebsiteArtifact) {
    for (label, body) in [
        ("index.html", &website.html_content),
        ("styles.css", &website.css_content),
        ("script.js", &website.js_content),
    ] {
        println!();
        println!("{}", format!("── {label} ──").cyan());
        println!("{body}");
    }
}
