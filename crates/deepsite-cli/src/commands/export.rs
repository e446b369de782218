//! Write a website's files to a directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use deepsite_core::{ArtifactId, Orchestrator, Session, WebsiteArtifact};

use crate::error::CliError;

/// File names referenced by the generated markup
const FILES: [&str; 3] = ["index.html", "styles.css", "script.js"];

/// Execute the export command
pub async fn execute(
    orchestrator: &Orchestrator,
    session: Option<&Session>,
    id: &str,
    dir: &Path,
    force: bool,
) -> Result<()> {
    let website = orchestrator.get_website(&ArtifactId::new(id), session).await?;
    let written = write_files(&website, dir, force)?;

    println!(
        "{} Exported {} to {}",
        "✓".green(),
        website.title.bold(),
        dir.display()
    );
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}

fn write_files(website: &WebsiteArtifact, dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = FILES.iter().map(|name| dir.join(name)).collect();

    if !force {
        if let Some(existing) = paths.iter().find(|p| p.exists()) {
            return Err(CliError::usage(anyhow!(
                "{} already exists (use --force to overwrite)",
                existing.display()
            ))
            .into());
        }
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let bodies = [
        &website.html_content,
        &website.css_content,
        &website.js_content,
    ];
    for (path, body) in paths.iter().zip(bodies) {
        fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(paths)
}
