//! Resolve configuration and caller identity from global flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use deepsite_core::{Config, Orchestrator, Session, UserId};
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

/// Config file named by `--config`/`DEEPSITE_CONFIG`, else the default location.
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::config_path()?),
    }
}

/// Load the config file and apply `DEEPSITE_*` environment overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let path = config_path(cli)?;
    debug!("Loading config from {}", path.display());

    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?
        .with_env_overrides()?;
    Ok(config)
}

/// Session for `--user`/`--token`, or `None` when no user was given.
pub fn session(cli: &Cli) -> Result<Option<Session>> {
    let Some(raw) = cli.user.as_deref().filter(|u| !u.trim().is_empty()) else {
        if cli.token.is_some() {
            debug!("Ignoring access token without a user id");
        }
        return Ok(None);
    };

    let user = UserId::new(raw).map_err(CliError::auth)?;
    Ok(Some(Session::new(user).with_access_token(cli.token.clone())))
}

/// Orchestrator wired from the resolved configuration.
pub fn orchestrator(config: &Config, session: Option<&Session>) -> Result<Orchestrator> {
    config
        .build_orchestrator(session)
        .context("Failed to set up the generation pipeline")
}
