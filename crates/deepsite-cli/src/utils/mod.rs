//! Shared helpers for command implementations.

mod context;
mod logging;

pub use context::{config_path, load_config, orchestrator, session};
pub use logging::initialize_logging;
