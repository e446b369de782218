//! Content generation for website prompts.
//!
//! A [`ContentGenerator`] forwards a [`Prompt`] to a [`GenerationBackend`]
//! exactly once. When the backend fails for any reason the generator does
//! not surface the error: it synthesizes deterministic placeholder content
//! with [`fallback_content`] and reports the outcome as
//! [`Generation::Fallback`].
//!
//! ## Backends
//!
//! - [`HttpGenerationBackend`]: remote generation service over HTTP
//! - [`TemplateBackend`]: local landing-page template, no network
//!
//! ## Example
//!
//! ```rust
//! use deepsite_core::generator::{ContentGenerator, TemplateBackend};
//! use deepsite_core::Prompt;
//!
//! # async fn example() -> deepsite_core::Result<()> {
//! let generator = ContentGenerator::new(TemplateBackend::new());
//! let prompt = Prompt::new("A bakery in Lisbon")?;
//!
//! let generation = generator.generate(&prompt, None).await?;
//! assert!(!generation.is_fallback());
//! assert_eq!(generation.content().title, "A bakery in Website");
//! # Ok(())
//! # }
//! ```

mod fallback;
mod http;
mod template;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{Error, GeneratedContent, Prompt, Result, Session};

pub use fallback::fallback_content;
pub use http::HttpGenerationBackend;
pub use template::TemplateBackend;

/// A source of generated website content.
///
/// Implementations make a single attempt and return an error on any failure;
/// fallback handling lives in [`ContentGenerator`].
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produce content for `prompt`, forwarding the session token if needed
    async fn generate(
        &self,
        prompt: &Prompt,
        session: Option<&Session>,
    ) -> Result<GeneratedContent>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Outcome of a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The backend produced the content.
    Primary(GeneratedContent),
    /// The backend failed; content was synthesized locally from the prompt.
    Fallback {
        /// Placeholder content derived only from the prompt
        content: GeneratedContent,
        /// Why the backend result was not used
        reason: String,
    },
}

impl Generation {
    /// Borrow the generated content regardless of branch
    #[must_use]
    pub const fn content(&self) -> &GeneratedContent {
        match self {
            Self::Primary(content) | Self::Fallback { content, .. } => content,
        }
    }

    /// Take the generated content regardless of branch
    #[must_use]
    pub fn into_content(self) -> GeneratedContent {
        match self {
            Self::Primary(content) | Self::Fallback { content, .. } => content,
        }
    }

    /// Whether the fallback branch was taken
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Runs one backend attempt and falls back to placeholder content on failure.
#[derive(Clone)]
pub struct ContentGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl ContentGenerator {
    /// Wrap a backend
    pub fn new(backend: impl GenerationBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend
    #[must_use]
    pub fn from_shared(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Name of the wrapped backend
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Generate content for `prompt`.
    ///
    /// Backend errors and responses with a blank title or description are
    /// replaced with [`fallback_content`]. The only error returned is
    /// [`Error::Transport`], when the generation task panics or is cancelled.
    pub async fn generate(&self, prompt: &Prompt, session: Option<&Session>) -> Result<Generation> {
        let backend = Arc::clone(&self.backend);
        let task_prompt = prompt.clone();
        let task_session = session.cloned();

        let attempt = tokio::spawn(async move {
            backend
                .generate(&task_prompt, task_session.as_ref())
                .await
        })
        .await
        .map_err(|e| Error::Transport(format!("generation task failed: {e}")))?;

        let generation = match attempt {
            Ok(content) if is_usable(&content) => {
                debug!(backend = self.backend.name(), "Generated content for prompt");
                Generation::Primary(content)
            },
            Ok(_) => fall_back(prompt, "response had an empty title or description".into()),
            Err(e) => fall_back(prompt, e.to_string()),
        };

        Ok(generation)
    }
}

fn is_usable(content: &GeneratedContent) -> bool {
    !content.title.trim().is_empty() && !content.description.trim().is_empty()
}

fn fall_back(prompt: &Prompt, reason: String) -> Generation {
    warn!(%reason, "Generation backend failed, falling back to placeholder content");
    Generation::Fallback {
        content: fallback_content(prompt),
        reason,
    }
}
