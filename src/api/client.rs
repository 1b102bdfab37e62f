use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use url::Url;

use super::http_client::create_client;
use super::pagination::{Collected, PageQuery};
use super::types::Document;
use crate::error::{GleifError, Result};

/// Default GLEIF API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.gleif.org/api/v1";

/// Access to paginated GLEIF collections
#[async_trait]
pub trait GleifApi: Send + Sync {
    /// Fetch every page of a query and concatenate the items in request order.
    /// Any failing page fails the whole fetch.
    async fn fetch_all(&self, query: &PageQuery) -> Result<Collected>;
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 30,
            user_agent: format!("gleif-tools/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// GLEIF REST API client
pub struct GleifClient {
    config: ClientConfig,
    http_client: Client,
}

impl GleifClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            GleifError::InvalidArgument(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        let http_client = create_client(config.timeout, &config.user_agent)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full URL of one page of a query
    fn page_url(&self, query: &PageQuery, page: u32) -> Result<Url> {
        let endpoint = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            query.resource.trim_start_matches('/')
        );
        Url::parse_with_params(&endpoint, query.page_params(page)).map_err(|e| {
            GleifError::InvalidArgument(format!("Invalid request URL '{}': {}", endpoint, e))
        })
    }

    /// Request and decode a single page
    async fn fetch_page(&self, query: &PageQuery, page: u32) -> Result<Document> {
        let url = self.page_url(query, page)?;
        debug!("GET {}", url);

        let transport = |source: reqwest::Error| GleifError::Transport {
            resource: query.resource.clone(),
            page,
            source,
        };

        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/vnd.api+json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(GleifError::api(&query.resource, page, status.as_u16(), &body));
        }

        serde_json::from_str::<Document>(&body)
            .map_err(|e| GleifError::malformed(&query.resource, page, e))
    }
}

#[async_trait]
impl GleifApi for GleifClient {
    async fn fetch_all(&self, query: &PageQuery) -> Result<Collected> {
        let mut collected = Collected::default();
        let mut page = 1;

        loop {
            let document = self.fetch_page(query, page).await?;
            collected.pages_fetched = page;

            let received = document.data.len();
            let more = query
                .has_more
                .has_more(&document, page, collected.items.len() + received);
            collected.items.extend(document.data);
            debug!(
                "{}: page {} returned {} items ({} total)",
                query.resource,
                page,
                received,
                collected.items.len()
            );

            if received == 0 || !more {
                collected.complete = true;
                break;
            }

            if !query.within_ceiling(page) {
                warn!(
                    "{}: stopped after {} pages (page ceiling reached), {} items collected",
                    query.resource,
                    page,
                    collected.items.len()
                );
                break;
            }

            page += 1;
        }

        Ok(collected)
    }
}
