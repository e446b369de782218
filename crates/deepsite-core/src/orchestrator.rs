//! Prompt-to-artifact pipeline.
//!
//! [`Orchestrator::create_website`] validates the request, runs one
//! generation attempt (falling back to placeholder content when the backend
//! fails) and persists the result for the signed-in user. A call either
//! saves exactly one artifact or fails before anything is written.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::generator::ContentGenerator;
use crate::store::WebsiteStore;
use crate::{ArtifactId, Error, NewWebsite, Prompt, Result, Session, WebsiteArtifact};

/// Coordinates the generator and the store for one user request at a time.
#[derive(Clone)]
pub struct Orchestrator {
    generator: ContentGenerator,
    store: Arc<dyn WebsiteStore>,
    preview_image_url: Option<String>,
}

impl Orchestrator {
    /// Wire a generator to a store
    #[must_use]
    pub fn new(generator: ContentGenerator, store: Arc<dyn WebsiteStore>) -> Self {
        Self {
            generator,
            store,
            preview_image_url: None,
        }
    }

    /// Preview image recorded on every artifact this orchestrator creates
    #[must_use]
    pub fn with_preview_image(mut self, url: Option<String>) -> Self {
        self.preview_image_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// The backing store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn WebsiteStore> {
        &self.store
    }

    /// Generate a website for `prompt` and save it for the session user.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for an empty or whitespace-only prompt
    /// - [`Error::AuthRequired`] when `session` is `None`
    /// - [`Error::Transport`] when the generation task itself dies
    /// - [`Error::Storage`] when the store rejects the write
    #[instrument(level = "debug", skip(self, session))]
    pub async fn create_website(
        &self,
        prompt: &str,
        session: Option<&Session>,
    ) -> Result<WebsiteArtifact> {
        let prompt = Prompt::new(prompt)?;
        let session = require_session(session, "create websites")?;

        let generation = self.generator.generate(&prompt, Some(session)).await?;
        let fallback = generation.is_fallback();

        let website = NewWebsite::new(session.user.clone(), generation.into_content())
            .with_preview_image(self.preview_image_url.clone());
        let artifact = self.store.save(website).await?;

        info!(
            id = %artifact.id,
            owner = %artifact.owner,
            fallback,
            store = self.store.name(),
            "Created website"
        );
        Ok(artifact)
    }

    /// The session user's websites, newest first
    ///
    /// # Errors
    ///
    /// [`Error::AuthRequired`] without a session; store errors otherwise.
    pub async fn list_websites(&self, session: Option<&Session>) -> Result<Vec<WebsiteArtifact>> {
        let session = require_session(session, "list websites")?;
        self.store.list(&session.user).await
    }

    /// Look up one of the session user's websites by id
    ///
    /// Another user's artifact reads as missing, so the lookup does not
    /// reveal which ids exist.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthRequired`] without a session
    /// - [`Error::NotFound`] when the session user owns no artifact with this id
    pub async fn get_website(
        &self,
        id: &ArtifactId,
        session: Option<&Session>,
    ) -> Result<WebsiteArtifact> {
        let session = require_session(session, "view websites")?;
        let artifact = self.store.get_by_id(id).await?;
        if artifact.owner != session.user {
            return Err(Error::NotFound(format!("website '{id}'")));
        }
        Ok(artifact)
    }
}

fn require_session<'a>(session: Option<&'a Session>, action: &str) -> Result<&'a Session> {
    session.ok_or_else(|| Error::AuthRequired(format!("sign in to {action}")))
}
