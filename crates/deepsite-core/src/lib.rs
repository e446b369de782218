//! # deepsite-core
//!
//! Turns a natural-language description into a stored website: HTML, CSS
//! and JavaScript produced by a generation service (or a deterministic local
//! fallback when that service is unavailable), saved per user.
//!
//! ## Architecture
//!
//! - **Generator**: one attempt against a [`GenerationBackend`], with
//!   placeholder content substituted on any failure
//! - **Store**: the [`WebsiteStore`] persistence gateway and its memory,
//!   file and REST backends
//! - **Orchestrator**: validation, auth check, generation and persistence
//!   in one call
//! - **Configuration**: TOML settings with environment overrides that build
//!   the pieces above
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use deepsite_core::generator::{ContentGenerator, TemplateBackend};
//! use deepsite_core::store::MemoryStore;
//! use deepsite_core::{Orchestrator, Session, UserId};
//!
//! # async fn example() -> deepsite_core::Result<()> {
//! let orchestrator = Orchestrator::new(
//!     ContentGenerator::new(TemplateBackend::new()),
//!     Arc::new(MemoryStore::new()),
//! );
//! let session = Session::new(UserId::new("user-1")?);
//!
//! let site = orchestrator
//!     .create_website("A modern portfolio website for a UX designer", Some(&session))
//!     .await?;
//! println!("{} ({})", site.title, site.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use deepsite_core::Error;
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err {
//!         Error::Validation(_) => "fix the prompt",
//!         Error::AuthRequired(_) => "sign in",
//!         e if e.is_recoverable() => "try again",
//!         _ => "failed",
//!     }
//! }
//! # assert_eq!(describe(&Error::AuthRequired("x".into())), "sign in");
//! ```

/// Configuration loading and component wiring
pub mod config;
/// Error types and result aliases
pub mod error;
/// Content generation with fallback
pub mod generator;
/// Prompt-to-artifact pipeline
pub mod orchestrator;
/// Persistence gateway and its backends
pub mod store;
/// Core data types
pub mod types;

pub use config::{Config, GenerationConfig, PathsConfig, StoreBackend, StoreConfig};
pub use error::{Error, Result};
pub use generator::{ContentGenerator, Generation, GenerationBackend, fallback_content};
pub use orchestrator::Orchestrator;
pub use store::WebsiteStore;
pub use types::{
    ArtifactId, GeneratedContent, NewWebsite, Prompt, Session, UserId, WebsiteArtifact,
};
