//! Configuration for the DeepSite pipeline.
//!
//! Settings live in a TOML file (by default under the platform config
//! directory) and can be overridden by `DEEPSITE_*` environment variables.
//! The resolved [`Config`] builds the generator, the store and the
//! [`Orchestrator`] that ties them together.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [generation]
//! endpoint = "https://abc.supabase.co/functions/v1/generate-website"
//! timeout_secs = 30
//!
//! [store]
//! backend = "rest"
//! rest_url = "https://abc.supabase.co"
//! api_key = "public-anon-key"
//!
//! [paths]
//! root = "/home/user/.local/share/deepsite"
//! ```
//!
//! ```rust
//! use deepsite_core::{Config, StoreBackend};
//!
//! let config: Config = toml::from_str("[store]\nbackend = \"memory\"\n")?;
//! assert_eq!(config.store.backend, StoreBackend::Memory);
//! assert_eq!(config.generation.timeout_secs, 30);
//! # Ok::<(), toml::de::Error>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::generator::{ContentGenerator, HttpGenerationBackend, TemplateBackend};
use crate::store::{FileStore, MemoryStore, RestStore, WebsiteStore};
use crate::{Error, Orchestrator, Result, Session};

/// Environment variable naming an alternate config file
pub const ENV_CONFIG: &str = "DEEPSITE_CONFIG";
/// Environment variable overriding `generation.endpoint`
pub const ENV_GENERATE_URL: &str = "DEEPSITE_GENERATE_URL";
/// Environment variable overriding `store.backend`
pub const ENV_STORE: &str = "DEEPSITE_STORE";
/// Environment variable overriding `store.rest_url`
pub const ENV_REST_URL: &str = "DEEPSITE_REST_URL";
/// Environment variable overriding `store.api_key`
pub const ENV_API_KEY: &str = "DEEPSITE_API_KEY";
/// Environment variable overriding `paths.root`
pub const ENV_DATA_DIR: &str = "DEEPSITE_DATA_DIR";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved DeepSite configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content generation settings
    pub generation: GenerationConfig,
    /// Persistence settings
    pub store: StoreConfig,
    /// File system paths
    pub paths: PathsConfig,
}

/// Settings for the generation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Remote generation service. Without one, the built-in template renders
    /// every site locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP timeout for the generation request, in seconds.
    ///
    /// A request that outlives it counts as a backend failure and produces
    /// fallback content.
    pub timeout_secs: u64,

    /// Preview image recorded on new artifacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            preview_image_url: None,
        }
    }
}

/// Which [`WebsiteStore`] implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// In-process, discarded on exit
    Memory,
    /// JSON documents under `paths.root`
    #[default]
    File,
    /// Hosted `websites` table
    Rest,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rest" => Ok(Self::Rest),
            other => Err(Error::Config(format!(
                "Unknown store backend '{other}' (expected memory, file or rest)"
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Rest => "rest",
        })
    }
}

/// Settings for the persistence gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store implementation
    pub backend: StoreBackend,
    /// Project base URL for the REST backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_url: Option<String>,
    /// Public API key; also the fallback bearer for the generation service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// File system paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Data directory for the file store
    pub root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: directories::ProjectDirs::from("dev", "deepsite", "deepsite").map_or_else(
                || {
                    directories::BaseDirs::new().map_or_else(
                        || PathBuf::from(".deepsite"),
                        |base| base.home_dir().join(".deepsite"),
                    )
                },
                |dirs| dirs.data_dir().to_path_buf(),
            ),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist. Environment overrides are not applied.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Default config file location (`<config dir>/config.toml`)
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "deepsite", "deepsite")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Apply `DEEPSITE_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_GENERATE_URL) {
            self.generation.endpoint = Some(endpoint);
        }
        if let Some(backend) = get(ENV_STORE) {
            self.store.backend = backend.parse()?;
        }
        if let Some(rest_url) = get(ENV_REST_URL) {
            self.store.rest_url = Some(rest_url);
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.store.api_key = Some(api_key);
        }
        if let Some(root) = get(ENV_DATA_DIR) {
            self.paths.root = PathBuf::from(root);
        }

        Ok(self)
    }

    /// Check that URLs parse and the chosen backend has what it needs
    pub fn validate(&self) -> Result<()> {
        self.generation_endpoint()?;
        if let Some(preview) = &self.generation.preview_image_url {
            parse_http_url(preview, "preview image")?;
        }
        if self.generation.timeout_secs == 0 {
            return Err(Error::Config("generation.timeout_secs must be positive".into()));
        }
        if self.store.backend == StoreBackend::Rest {
            self.rest_target()?;
        }
        Ok(())
    }

    fn generation_endpoint(&self) -> Result<Option<Url>> {
        self.generation
            .endpoint
            .as_deref()
            .map(|raw| parse_http_url(raw, "generation endpoint"))
            .transpose()
    }

    fn rest_target(&self) -> Result<(Url, &str)> {
        let raw = self
            .store
            .rest_url
            .as_deref()
            .ok_or_else(|| Error::Config("store.rest_url is required for the rest backend".into()))?;
        let api_key = self
            .store
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("store.api_key is required for the rest backend".into()))?;
        Ok((parse_http_url(raw, "store")?, api_key))
    }

    /// Generator for this configuration: HTTP when an endpoint is set,
    /// otherwise the local template
    pub fn build_generator(&self) -> Result<ContentGenerator> {
        match self.generation_endpoint()? {
            Some(endpoint) => {
                let timeout = Duration::from_secs(self.generation.timeout_secs);
                let backend = HttpGenerationBackend::with_timeout(endpoint, timeout)?
                    .with_api_key(self.store.api_key.clone());
                Ok(ContentGenerator::new(backend))
            },
            None => Ok(ContentGenerator::new(TemplateBackend::new())),
        }
    }

    /// Store for this configuration, acting for `session` where the backend
    /// supports per-user credentials
    pub fn build_store(&self, session: Option<&Session>) -> Result<Arc<dyn WebsiteStore>> {
        let store: Arc<dyn WebsiteStore> = match self.store.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File => Arc::new(FileStore::new(&self.paths.root)?),
            StoreBackend::Rest => {
                let (base, api_key) = self.rest_target()?;
                let token = session.and_then(|s| s.access_token.clone());
                Arc::new(RestStore::new(&base, api_key)?.with_access_token(token))
            },
        };
        Ok(store)
    }

    /// Fully wired orchestrator
    pub fn build_orchestrator(&self, session: Option<&Session>) -> Result<Orchestrator> {
        self.validate()?;
        Ok(
            Orchestrator::new(self.build_generator()?, self.build_store(session)?)
                .with_preview_image(self.generation.preview_image_url.clone()),
        )
    }

    /// Copy safe to print: the API key is reduced to its last four characters
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut redacted = self.clone();
        redacted.store.api_key = self.store.api_key.as_deref().map(mask_secret);
        redacted
    }
}

fn parse_http_url(raw: &str, what: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::InvalidUrl(format!("{what} URL '{raw}': {e}")))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(Error::InvalidUrl(format!("{what} URL must be http(s): {raw}")))
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.generation.timeout_secs, 30);
        assert!(config.generation.endpoint.is_none());
        assert!(config.generation.preview_image_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[generation]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.generation.timeout_secs, 5);
        assert_eq!(config.store.backend, StoreBackend::File);
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.generation.endpoint = Some("https://gen.example.com/generate".into());
        config.store.backend = StoreBackend::Rest;
        config.store.rest_url = Some("https://abc.supabase.co".into());
        config.store.api_key = Some("anon-key".into());
        config.paths.root = temp_dir.path().join("data");

        config.save_to(&path)?;
        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_yields_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let config = Config::default().with_overrides(env(&[
            (ENV_GENERATE_URL, "http://localhost:54321/functions/v1/generate-website"),
            (ENV_STORE, "REST"),
            (ENV_REST_URL, "http://localhost:54321"),
            (ENV_API_KEY, "local-key"),
            (ENV_DATA_DIR, "/tmp/deepsite-data"),
        ]))?;

        assert_eq!(
            config.generation.endpoint.as_deref(),
            Some("http://localhost:54321/functions/v1/generate-website")
        );
        assert_eq!(config.store.backend, StoreBackend::Rest);
        assert_eq!(config.store.api_key.as_deref(), Some("local-key"));
        assert_eq!(config.paths.root, PathBuf::from("/tmp/deepsite-data"));
        config.validate()
    }

    #[test]
    fn test_blank_env_values_are_ignored() -> Result<()> {
        let config = Config::default().with_overrides(env(&[(ENV_STORE, "  ")]))?;
        assert_eq!(config.store.backend, StoreBackend::File);
        Ok(())
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Config::default().with_overrides(env(&[(ENV_STORE, "sqlite")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = Config::default();
        config.generation.endpoint = Some("not a url".into());
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        config.generation.endpoint = Some("ftp://example.com/gen".into());
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_rest_backend_requires_url_and_key() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Rest;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.store.rest_url = Some("https://abc.supabase.co".into());
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.store.api_key = Some("k".into());
        assert!(config.validate().is_ok());
        assert_eq!(config.build_store(None).unwrap().name(), "rest");
    }

    #[test]
    fn test_build_picks_backends() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut config = Config::default();
        config.paths.root = temp_dir.path().to_path_buf();

        assert_eq!(config.build_generator()?.backend_name(), "template");
        assert_eq!(config.build_store(None)?.name(), "file");
        assert!(temp_dir.path().join("websites").is_dir());

        config.generation.endpoint = Some("https://gen.example.com/generate".into());
        config.store.backend = StoreBackend::Memory;
        assert_eq!(config.build_generator()?.backend_name(), "http");
        assert_eq!(config.build_store(None)?.name(), "memory");
        Ok(())
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let mut config = Config::default();
        config.store.api_key = Some("eyJhbGciOiJIUzI1NiJ9.secret-tail".into());

        let redacted = config.redacted();
        assert_eq!(redacted.store.api_key.as_deref(), Some("****tail"));
        assert_eq!(mask_secret("abc"), "****");
    }
}
