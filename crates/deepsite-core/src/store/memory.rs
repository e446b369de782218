use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{MonotonicClock, WebsiteStore, sort_newest_first};
use crate::{ArtifactId, Error, NewWebsite, Result, UserId, WebsiteArtifact};

/// In-process website store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    websites: RwLock<HashMap<ArtifactId, WebsiteArtifact>>,
    clock: MonotonicClock,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts across all owners
    pub async fn len(&self) -> usize {
        self.websites.read().await.len()
    }

    /// Whether the store holds no artifacts
    pub async fn is_empty(&self) -> bool {
        self.websites.read().await.is_empty()
    }
}

#[async_trait]
impl WebsiteStore for MemoryStore {
    async fn save(&self, website: NewWebsite) -> Result<WebsiteArtifact> {
        let mut websites = self.websites.write().await;

        let mut id = ArtifactId::generate();
        while websites.contains_key(&id) {
            id = ArtifactId::generate();
        }

        let artifact = WebsiteArtifact::from_insert(id.clone(), website, self.clock.now());
        websites.insert(id, artifact.clone());
        debug!(id = %artifact.id, owner = %artifact.owner, "Stored website in memory");
        Ok(artifact)
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<WebsiteArtifact>> {
        let mut owned: Vec<_> = self
            .websites
            .read()
            .await
            .values()
            .filter(|w| &w.owner == owner)
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    async fn get_by_id(&self, id: &ArtifactId) -> Result<WebsiteArtifact> {
        self.websites
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("website '{id}'")))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
