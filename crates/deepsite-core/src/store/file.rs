use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{MonotonicClock, WebsiteStore, sort_newest_first};
use crate::{ArtifactId, Error, NewWebsite, Result, UserId, WebsiteArtifact};

const MAX_ID_LEN: usize = 64;

/// Website store backed by one JSON document per artifact.
///
/// Layout: `<root>/websites/<id>.json`. Writes go to a temp file first and
/// are renamed into place, so a crash never leaves a half-written record.
#[derive(Debug)]
pub struct FileStore {
    root_dir: PathBuf,
    clock: MonotonicClock,
}

impl FileStore {
    /// Creates a store rooted at `root_dir`, creating the directory tree if needed
    pub fn new(root_dir: impl Into<PathBuf>) -> Result<Self> {
        let root_dir = root_dir.into();
        let websites = root_dir.join("websites");
        fs::create_dir_all(&websites).map_err(|e| {
            Error::Storage(format!(
                "Failed to create data directory {}: {e}",
                websites.display()
            ))
        })?;

        Ok(Self {
            root_dir,
            clock: MonotonicClock::default(),
        })
    }

    /// Root data directory
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn websites_dir(&self) -> PathBuf {
        self.root_dir.join("websites")
    }

    fn record_path(&self, id: &ArtifactId) -> Result<PathBuf> {
        Self::validate_id(id)?;
        Ok(self.websites_dir().join(format!("{id}.json")))
    }

    /// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
    fn validate_id(id: &ArtifactId) -> Result<()> {
        let raw = id.as_str();
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(())
        } else {
            Err(Error::NotFound(format!("website '{raw}'")))
        }
    }

    fn write_record(&self, artifact: &WebsiteArtifact) -> Result<()> {
        let path = self.record_path(&artifact.id)?;
        let json = serde_json::to_string_pretty(artifact)
            .map_err(|e| Error::Storage(format!("Failed to serialize website: {e}")))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write temp record: {e}")))?;

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing record: {e}")))?;
        }
        fs::rename(&tmp_path, &path)
            .map_err(|e| Error::Storage(format!("Failed to persist record: {e}")))?;

        Ok(())
    }

    fn read_record(path: &Path) -> Result<WebsiteArtifact> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Storage(format!("Failed to parse {}: {e}", path.display())))
    }
}

#[async_trait]
impl WebsiteStore for FileStore {
    async fn save(&self, website: NewWebsite) -> Result<WebsiteArtifact> {
        let mut id = ArtifactId::generate();
        while self.record_path(&id)?.exists() {
            id = ArtifactId::generate();
        }

        let artifact = WebsiteArtifact::from_insert(id, website, self.clock.now());
        self.write_record(&artifact)?;

        debug!(id = %artifact.id, owner = %artifact.owner, "Saved website record");
        Ok(artifact)
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<WebsiteArtifact>> {
        let dir = self.websites_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read {}: {e}",
                    dir.display()
                )));
            },
        };

        let mut owned = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match Self::read_record(&path) {
                Ok(artifact) if &artifact.owner == owner => owned.push(artifact),
                Ok(_) => {},
                Err(e) => warn!("Skipping unreadable website record: {e}"),
            }
        }

        sort_newest_first(&mut owned);
        Ok(owned)
    }

    async fn get_by_id(&self, id: &ArtifactId) -> Result<WebsiteArtifact> {
        let path = self.record_path(id)?;
        if !path.exists() {
            return Err(Error::NotFound(format!("website '{id}'")));
        }
        Self::read_record(&path)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
