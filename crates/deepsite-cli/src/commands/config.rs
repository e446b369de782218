//! Print the resolved configuration

use std::path::Path;

use anyhow::{Context, Result};
use deepsite_core::Config;

/// Execute the config command
///
/// Prints the file location followed by the effective settings (file plus
/// environment overrides) as TOML. The API key is masked.
pub fn execute(config: &Config, path: &Path) -> Result<()> {
    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{status}", path.display());

    let rendered =
        toml::to_string_pretty(&config.redacted()).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
