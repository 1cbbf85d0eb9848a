use crate::catalog;
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::record::{ImageRecord, WirePage, WirePhoto};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, error, info, warn};

const LISTING_PATH: &str = "photos";
const SEARCH_PATH: &str = "search/photos";

/// Anything that can serve pages of images plus the category / suggestion catalog.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// One page of records; an empty query lists instead of searching.
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> ProviderResult<Vec<ImageRecord>>;

    async fn categories(&self) -> ProviderResult<Vec<String>>;

    async fn suggestions(&self, query: &str) -> ProviderResult<Vec<String>>;
}

#[derive(Clone)]
pub struct StockClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl StockClient {
    /// Build a client, resolving the access key from the environment or config.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let key = config.resolve_access_key()?;
        Self::with_access_key(config, key)
    }

    pub fn with_access_key(config: &ProviderConfig, key: impl Into<String>) -> ProviderResult<Self> {
        let access_key = key.into();
        if access_key.trim().is_empty() {
            return Err(ProviderError::MissingAccessKey);
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key,
        })
    }

    /// Listing URL for a blank query, search URL otherwise.
    pub fn page_url(&self, query: &str, page: u32, per_page: u32) -> ProviderResult<Url> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("page", &page),
            ("per_page", &per_page),
            ("client_id", &self.access_key),
        ];

        let path = if query.trim().is_empty() {
            LISTING_PATH
        } else {
            params.push(("query", query));
            SEARCH_PATH
        };

        Url::parse_with_params(&format!("{}/{}", self.base_url, path), &params)
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }

    fn photo_url(&self, id: &str) -> ProviderResult<Url> {
        let mut url = Url::parse_with_params(
            &format!("{}/{}", self.base_url, LISTING_PATH),
            &[("client_id", self.access_key.as_str())],
        )
        .map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .push(id);

        Ok(url)
    }

    async fn get_json(&self, url: Url) -> ProviderResult<String> {
        let endpoint = url.path().to_string();
        let response = self
            .client
            .get(url)
            .header("Accept-Version", "v1")
            .send()
            .await?;

        let status = response.status();
        debug!("Provider {} responded {}", endpoint, status);

        if !status.is_success() {
            warn!("Provider API error: {} on {}", status, endpoint);
            return Err(ProviderError::status(status, endpoint));
        }

        Ok(response.text().await?)
    }

    /// Fetch one page, keeping failures distinct from an empty page.
    pub async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> ProviderResult<Vec<ImageRecord>> {
        let url = self.page_url(query, page, per_page)?;
        info!(
            "Provider request: {} page={} per_page={} query={:?}",
            url.path(),
            page,
            per_page,
            query
        );

        let body = self.get_json(url).await?;
        let records = serde_json::from_str::<WirePage>(&body)?.into_records();

        info!("Provider returned {} record(s) for page {}", records.len(), page);
        Ok(records)
    }

    /// Lenient variant of [`fetch_page`](Self::fetch_page): failures are logged and read as empty.
    pub async fn list_images(&self, query: &str, page: u32, per_page: u32) -> Vec<ImageRecord> {
        match self.fetch_page(query, page, per_page).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error fetching images from provider: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_image(&self, id: &str) -> ProviderResult<ImageRecord> {
        let url = self.photo_url(id)?;
        let body = self.get_json(url).await?;
        let photo: WirePhoto = serde_json::from_str(&body)?;
        Ok(ImageRecord::from(photo))
    }

    /// Single record, or `None` on any failure.
    pub async fn get_image(&self, id: &str) -> Option<ImageRecord> {
        match self.fetch_image(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("Error fetching image {} from provider: {}", id, e);
                None
            }
        }
    }

    pub async fn list_categories(&self) -> Vec<String> {
        catalog::categories()
    }

    pub async fn suggest(&self, query: &str) -> Vec<String> {
        catalog::suggest(query)
    }
}

#[async_trait]
impl ImageSource for StockClient {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> ProviderResult<Vec<ImageRecord>> {
        StockClient::fetch_page(self, query, page, per_page).await
    }

    async fn categories(&self) -> ProviderResult<Vec<String>> {
        Ok(self.list_categories().await)
    }

    async fn suggestions(&self, query: &str) -> ProviderResult<Vec<String>> {
        Ok(self.suggest(query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::photo_json;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers exactly one request and hands back its request head.
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}"), handle)
    }

    fn client_for(base_url: &str) -> StockClient {
        let config = ProviderConfig {
            base_url: base_url.to_string(),
            ..ProviderConfig::default()
        };
        StockClient::with_access_key(&config, "test-key").unwrap()
    }

    #[test]
    fn blank_query_targets_listing_endpoint() {
        let client = client_for("https://api.example.com/");
        let url = client.page_url("  ", 1, 12).unwrap();

        assert_eq!(url.path(), "/photos");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("page".into(), "1".into())));
        assert!(pairs.contains(&("per_page".into(), "12".into())));
        assert!(pairs.contains(&("client_id".into(), "test-key".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "query"));
    }

    #[test]
    fn query_targets_search_endpoint() {
        let client = client_for("https://api.example.com");
        let url = client.page_url("red fox", 3, 12).unwrap();

        assert_eq!(url.path(), "/search/photos");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".into(), "red fox".into())));
        assert!(pairs.contains(&("page".into(), "3".into())));
    }

    #[test]
    fn blank_access_key_is_rejected() {
        let result = StockClient::with_access_key(&ProviderConfig::default(), " ");
        assert!(matches!(result, Err(ProviderError::MissingAccessKey)));
    }

    #[tokio::test]
    async fn listing_page_is_normalized() {
        let body = json!([photo_json("a", Some("forest"), None), photo_json("b", None, None)]);
        let (base, server) = serve_once("200 OK", body.to_string()).await;

        let records = client_for(&base).fetch_page("", 1, 12).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].alt_description, "forest");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /photos?"));
        assert!(request.contains("page=1"));
        assert!(request.contains("client_id=test-key"));
        assert!(request.to_lowercase().contains("accept-version: v1"));
    }

    #[tokio::test]
    async fn search_page_unwraps_results() {
        let body = json!({ "total": 1, "results": [photo_json("m", Some("peak"), None)] });
        let (base, server) = serve_once("200 OK", body.to_string()).await;

        let records = client_for(&base).fetch_page("mountains", 1, 12).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "m");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /search/photos?"));
        assert!(request.contains("query=mountains"));
    }

    #[tokio::test]
    async fn error_status_is_typed_but_lenient_call_is_empty() {
        let (base, _server) = serve_once("401 Unauthorized", "{}".to_string()).await;
        let err = client_for(&base).fetch_page("", 1, 12).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { .. }));

        let (base, _server) =
            serve_once("503 Service Unavailable", "{}".to_string()).await;
        assert!(client_for(&base).list_images("cats", 1, 12).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (base, _server) = serve_once("200 OK", "{\"oops\": true}".to_string()).await;
        let err = client_for(&base).fetch_page("", 1, 12).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn single_image_fetch_and_absent_on_failure() {
        let (base, server) = serve_once("200 OK", photo_json("xyz", Some("kite"), None).to_string()).await;
        let record = client_for(&base).get_image("xyz").await.unwrap();
        assert_eq!(record.id, "xyz");
        assert!(server.await.unwrap().starts_with("GET /photos/xyz?"));

        let (base, _server) = serve_once("404 Not Found", "{}".to_string()).await;
        assert!(client_for(&base).get_image("missing").await.is_none());
    }

    #[tokio::test]
    async fn catalog_calls_need_no_network() {
        let client = client_for("http://127.0.0.1:9");
        assert_eq!(client.list_categories().await.len(), 8);
        assert_eq!(
            ImageSource::suggestions(&client, "city").await.unwrap(),
            vec!["city skyline".to_string()]
        );
    }
}
