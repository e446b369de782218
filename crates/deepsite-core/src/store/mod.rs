//! Persistence gateway for generated websites.
//!
//! [`WebsiteStore`] is the contract the orchestrator saves through. Every
//! call is a single independent round trip to the backing store; nothing is
//! cached or batched here.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: in-process, for tests and throwaway sessions
//! - [`FileStore`]: one JSON document per artifact under a data directory
//! - [`RestStore`]: a hosted `websites` table behind a PostgREST-style API
//!
//! ```rust
//! use deepsite_core::store::{MemoryStore, WebsiteStore};
//! use deepsite_core::{GeneratedContent, NewWebsite, UserId};
//!
//! # async fn example() -> deepsite_core::Result<()> {
//! let store = MemoryStore::new();
//! let owner = UserId::new("user-1")?;
//! let content = GeneratedContent {
//!     title: "Demo".into(),
//!     description: "A demo".into(),
//!     html_content: "<h1>Demo</h1>".into(),
//!     css_content: String::new(),
//!     js_content: String::new(),
//! };
//!
//! let saved = store.save(NewWebsite::new(owner.clone(), content)).await?;
//! assert_eq!(store.list(&owner).await?[0].id, saved.id);
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
pub(crate) mod conformance;
mod file;
mod memory;
mod rest;

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::{ArtifactId, NewWebsite, Result, UserId, WebsiteArtifact};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use rest::RestStore;

/// Durable storage for website artifacts, scoped by owner.
#[async_trait]
pub trait WebsiteStore: Send + Sync {
    /// Insert a new record; the store assigns `id`, `created_at` and `updated_at`
    async fn save(&self, website: NewWebsite) -> Result<WebsiteArtifact>;

    /// All artifacts owned by `owner`, most recently created first
    async fn list(&self, owner: &UserId) -> Result<Vec<WebsiteArtifact>>;

    /// Fetch one artifact, failing with `NotFound` on a miss
    async fn get_by_id(&self, id: &ArtifactId) -> Result<WebsiteArtifact>;

    /// Short name used in logs and `deepsite config`
    fn name(&self) -> &'static str;
}

/// Creation timestamps that never repeat or go backwards within a process.
///
/// Local backends order listings by `created_at`; two saves inside the same
/// clock tick would otherwise tie.
#[derive(Debug, Default)]
pub(crate) struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub(crate) fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let mut now = Utc::now();
        if let Some(prev) = *last {
            if now <= prev {
                now = prev + TimeDelta::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}

/// Sort newest first.
pub(crate) fn sort_newest_first(websites: &mut [WebsiteArtifact]) {
    websites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
