use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Identifier of the user who owns an artifact.
///
/// Never empty: constructing one from a blank string is treated as a missing
/// session and fails with [`Error::AuthRequired`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a user id, rejecting empty or whitespace-only values
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(Error::AuthRequired("user id is empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned identifier of a saved artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Wrap an identifier returned by a store
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (used by the local stores)
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Explicit caller context for a pipeline invocation.
///
/// The access token, when present, is forwarded as a bearer token to the
/// generation service and the REST store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user
    pub user: UserId,
    /// Bearer token issued by the auth provider
    pub access_token: Option<String>,
}

impl Session {
    /// Session without an access token
    #[must_use]
    pub const fn new(user: UserId) -> Self {
        Self {
            user,
            access_token: None,
        }
    }

    /// Attach an access token; blank tokens are ignored
    #[must_use]
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// A validated, non-empty website description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Create a prompt, rejecting empty or whitespace-only text.
    ///
    /// The text is kept as written apart from surrounding whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(
                "prompt must describe the website you want to create".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the prompt text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` whitespace-separated words, joined by single spaces
    #[must_use]
    pub fn leading_words(&self, n: usize) -> String {
        self.0.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content produced by the generator for one prompt.
///
/// Field names match the generation service's JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub description: String,
    pub html_content: String,
    pub css_content: String,
    pub js_content: String,
}

/// Insert payload handed to a [`WebsiteStore`](crate::store::WebsiteStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebsite {
    pub owner: UserId,
    pub content: GeneratedContent,
    pub preview_image_url: Option<String>,
}

impl NewWebsite {
    #[must_use]
    pub const fn new(owner: UserId, content: GeneratedContent) -> Self {
        Self {
            owner,
            content,
            preview_image_url: None,
        }
    }

    #[must_use]
    pub fn with_preview_image(mut self, url: Option<String>) -> Self {
        self.preview_image_url = url;
        self
    }
}

/// A persisted website record (one row of the `websites` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteArtifact {
    pub id: ArtifactId,
    #[serde(rename = "user_id")]
    pub owner: UserId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html_content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub css_content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub js_content: String,
    #[serde(default)]
    pub preview_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Content columns are nullable in the table.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl WebsiteArtifact {
    /// Build a record from an insert payload with store-assigned fields
    #[must_use]
    pub fn from_insert(id: ArtifactId, website: NewWebsite, created_at: DateTime<Utc>) -> Self {
        let NewWebsite {
            owner,
            content,
            preview_image_url,
        } = website;
        Self {
            id,
            owner,
            title: content.title,
            description: content.description,
            html_content: content.html_content,
            css_content: content.css_content,
            js_content: content.js_content,
            preview_image_url,
            created_at,
            updated_at: created_at,
        }
    }

    /// The generated-content portion of this record
    #[must_use]
    pub fn content(&self) -> GeneratedContent {
        GeneratedContent {
            title: self.title.clone(),
            description: self.description.clone(),
            html_content: self.html_content.clone(),
            css_content: self.css_content.clone(),
            js_content: self.js_content.clone(),
        }
    }
}
