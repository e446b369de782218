//! Command implementations for the deepsite CLI
//!
//! Each command lives in its own submodule and exposes an `execute` function.

mod completions;
mod config;
mod export;
mod generate;
mod list;
mod show;

pub use completions::generate as generate_completions;
pub use config::execute as show_config;
pub use export::execute as export_website;
pub use generate::execute as generate_website;
pub use list::execute as list_websites;
pub use show::execute as show_website;
