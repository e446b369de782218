//! # CLI Structure and Argument Parsing
//!
//! The `deepsite` command line is built with `clap` derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Generate and save a website for a user
//! deepsite --user user-1 generate "A modern portfolio website for a UX designer"
//!
//! # Browse what was generated
//! deepsite --user user-1 list
//! deepsite --user user-1 show 6f1c... --content
//!
//! # Write the files to disk
//! deepsite --user user-1 export 6f1c... ./site
//! ```
//!
//! ## Identity
//!
//! Every command except `config` and `completions` acts for a user, read
//! from `--user` or `DEEPSITE_USER`. An access token from `--token` or
//! `DEEPSITE_TOKEN` is forwarded to the generation service and REST store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

/// Main CLI structure for the `deepsite` command
#[derive(Parser, Clone, Debug)]
#[command(name = "deepsite")]
#[command(version)]
#[command(about = "deepsite - Generate websites from a natural-language prompt", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "DEEPSITE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// User the command acts for
    #[arg(long, global = true, env = "DEEPSITE_USER", value_name = "ID")]
    pub user: Option<String>,

    /// Access token issued for `--user`
    #[arg(
        long,
        global = true,
        env = "DEEPSITE_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a website from a prompt and save it
    Generate {
        /// Description of the website (multiple words are joined with spaces)
        #[arg(required = true, value_name = "PROMPT")]
        prompt: Vec<String>,

        /// Preview image recorded on the saved website
        #[arg(long, value_name = "URL")]
        preview_image: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List your websites, newest first
    List {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one website
    Show {
        /// Website id
        id: String,

        /// Include the HTML, CSS and JavaScript
        #[arg(long)]
        content: bool,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a website's files (index.html, styles.css, script.js) to a directory
    Export {
        /// Website id
        id: String,

        /// Target directory (created if missing)
        dir: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Output format requested by the command, if it has one
    #[must_use]
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Generate { format, .. } | Self::List { format } | Self::Show { format, .. } => {
                Some(*format)
            },
            Self::Export { .. } | Self::Config | Self::Completions { .. } => None,
        }
    }
}
