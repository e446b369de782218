use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

use super::WebsiteStore;
use crate::{ArtifactId, Error, NewWebsite, Result, UserId, WebsiteArtifact};

/// Website store backed by a hosted `websites` table (PostgREST dialect).
///
/// Row-level policies on the server scope reads to the caller, so the
/// session token should be attached with [`RestStore::with_access_token`]
/// whenever one is available.
pub struct RestStore {
    client: Client,
    table_url: Url,
    api_key: String,
    access_token: Option<String>,
}

impl RestStore {
    /// Creates a store for the project at `base_url` with the default 30s timeout
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(30))
    }

    /// Creates a store with a custom request timeout
    pub fn with_timeout(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let table_url = Self::table_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deepsite/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            table_url,
            api_key: api_key.into(),
            access_token: None,
        })
    }

    /// Act on behalf of a signed-in user instead of the bare API key
    #[must_use]
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Full URL of the `websites` table endpoint
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.table_url
    }

    fn table_url(base_url: &Url) -> Result<Url> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "store URL must be http(s): {base_url}"
            )));
        }

        let mut url = base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(format!("store URL cannot be a base: {base_url}")))?
            .pop_if_empty()
            .extend(["rest", "v1", "websites"]);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
            .header(ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Store request failed: {e}")))?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::AuthRequired(format!(
                "store rejected credentials ({status})"
            )));
        }
        Err(Error::Storage(format!(
            "Store returned {status}: {}",
            body.trim()
        )))
    }

    async fn rows(response: Response) -> Result<Vec<WebsiteArtifact>> {
        response
            .json()
            .await
            .map_err(|e| Error::Storage(format!("Failed to decode store response: {e}")))
    }
}

#[async_trait]
impl WebsiteStore for RestStore {
    #[instrument(level = "debug", skip_all, fields(owner = %website.owner))]
    async fn save(&self, website: NewWebsite) -> Result<WebsiteArtifact> {
        let row = serde_json::json!({
            "user_id": website.owner,
            "title": website.content.title,
            "description": website.content.description,
            "html_content": website.content.html_content,
            "css_content": website.content.css_content,
            "js_content": website.content.js_content,
            "preview_image_url": website.preview_image_url,
        });

        let request = self
            .authorized(self.client.post(self.table_url.clone()))
            .header("Prefer", "return=representation")
            .json(&row);
        let response = Self::send(request).await?;

        let artifact = Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Storage("Store returned no row for insert".into()))?;

        info!(id = %artifact.id, "Inserted website row");
        Ok(artifact)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list(&self, owner: &UserId) -> Result<Vec<WebsiteArtifact>> {
        let request = self.authorized(self.client.get(self.table_url.clone())).query(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{owner}")),
            ("order", "created_at.desc".to_string()),
        ]);

        let rows = Self::rows(Self::send(request).await?).await?;
        debug!(count = rows.len(), "Listed website rows");
        Ok(rows)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_by_id(&self, id: &ArtifactId) -> Result<WebsiteArtifact> {
        let request = self.authorized(self.client.get(self.table_url.clone())).query(&[
            ("select", "*".to_string()),
            ("id", format!("eq.{id}")),
        ]);

        Self::rows(Self::send(request).await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("website '{id}'")))
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::store::conformance;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path, query_param},
    };

    const TABLE: &str = "/rest/v1/websites";

    fn row(id: &str, owner: &str, title: &str, created_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "user_id": owner,
            "title": title,
            "description": format!("A beautiful website about {title}"),
            "html_content": format!("<h1>{title}</h1>"),
            "css_content": null,
            "js_content": "console.log('Website loaded');",
            "preview_image_url": null,
            "created_at": created_at,
            "updated_at": created_at,
        })
    }

    fn store_for(server: &MockServer) -> RestStore {
        let base = Url::parse(&server.uri()).unwrap();
        RestStore::with_timeout(&base, "anon-key", Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn test_table_url_preserves_base_path() {
        let base = Url::parse("https://proxy.example.com/project?x=1").unwrap();
        let store = RestStore::new(&base, "k").unwrap();
        assert_eq!(
            store.url().as_str(),
            "https://proxy.example.com/project/rest/v1/websites"
        );

        let base = Url::parse("https://abc.supabase.co/").unwrap();
        let store = RestStore::new(&base, "k").unwrap();
        assert_eq!(store.url().as_str(), "https://abc.supabase.co/rest/v1/websites");
    }

    #[test]
    fn test_rejects_non_http_base() {
        let base = Url::parse("file:///tmp/db").unwrap();
        assert!(matches!(
            RestStore::new(&base, "k"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_save_posts_row_and_returns_representation() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TABLE))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer user-token"))
            .and(header("prefer", "return=representation"))
            .and(body_partial_json(serde_json::json!({
                "user_id": "user-1",
                "title": "Bakery",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([row(
                "9b2f",
                "user-1",
                "Bakery",
                "2025-03-01T10:00:00Z"
            )])))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server).with_access_token(Some("user-token".into()));
        let website = NewWebsite::new(UserId::new("user-1")?, conformance::content("Bakery"));

        let saved = store.save(website).await?;
        assert_eq!(saved.id.as_str(), "9b2f");
        assert_eq!(saved.owner.as_str(), "user-1");
        assert_eq!(saved.css_content, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_server_side() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TABLE))
            .and(query_param("user_id", "eq.alice"))
            .and(query_param("order", "created_at.desc"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                row("b", "alice", "Second", "2025-03-02T10:00:00Z"),
                row("a", "alice", "First", "2025-03-01T10:00:00Z"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let listed = store_for(&server).list(&UserId::new("alice")?).await?;
        let ids: Vec<_> = listed.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_id_empty_result_is_not_found() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TABLE))
            .and(query_param("id", "eq.missing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let result = store_for(&server).get_by_id(&ArtifactId::new("missing")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_id_returns_row() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TABLE))
            .and(query_param("id", "eq.abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([row(
                "abc",
                "user-1",
                "Shop",
                "2025-03-01T10:00:00Z"
            )])))
            .mount(&server)
            .await;

        let artifact = store_for(&server).get_by_id(&ArtifactId::new("abc")).await?;
        assert_eq!(artifact.title, "Shop");
        assert_eq!(artifact.created_at, artifact.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_write_is_storage_error() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"message":"new row violates row-level security policy"}"#),
            )
            .mount(&server)
            .await;

        let website = NewWebsite::new(UserId::new("user-1")?, conformance::content("Denied"));
        let result = store_for(&server).save(website).await;

        match result {
            Err(Error::Storage(msg)) => assert!(msg.contains("row-level security")),
            other => panic!("expected storage error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_credentials_require_auth() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message":"JWT expired"}"#),
            )
            .mount(&server)
            .await;

        let result = store_for(&server).list(&UserId::new("user-1")?).await;
        assert!(matches!(result, Err(Error::AuthRequired(_))), "{result:?}");
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_store_is_storage_error() -> anyhow::Result<()> {
        let base = Url::parse("http://127.0.0.1:9")?;
        let store = RestStore::with_timeout(&base, "k", Duration::from_millis(200))?;

        let result = store.list(&UserId::new("user-1")?).await;
        assert!(matches!(result, Err(Error::Storage(_))));
        Ok(())
    }
}
