//! # Catalog Source
//!
//! The read-only data source behind the CatalogStore, and its HTTP adapter
//! for the RAWG API.
//!
//! ## Requests
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_games()                                                          │
//! │    GET {base_url}/games?key={api_key}&page_size={page_size}             │
//! │    200 → { "results": [GameDto, ...] } → Vec<CatalogItem>               │
//! │                                                                         │
//! │  fetch_game(id)                                                         │
//! │    GET {base_url}/games/{id}?key={api_key}                              │
//! │    200 → GameDto → CatalogItem                                          │
//! │                                                                         │
//! │  non-2xx → ClientError::Status   no response → Transport / Timeout      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The adapter owns transport details only. Deciding what to show when a
//! request fails is the store's job.

use std::time::Duration;

use async_trait::async_trait;
use gamevault_core::{CatalogItem, DEFAULT_PAGE_SIZE};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::wire::{GameDto, GameListResponse};

/// Default RAWG API root.
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where catalog items come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one page of the catalog.
    async fn fetch_games(&self) -> ClientResult<Vec<CatalogItem>>;

    /// Fetches a single item with its description.
    async fn fetch_game(&self, id: u64) -> ClientResult<CatalogItem>;
}

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for [`RawgSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSourceConfig {
    pub base_url: String,
    pub api_key: String,
    pub page_size: u32,
    pub timeout: Duration,
}

impl Default for CatalogSourceConfig {
    fn default() -> Self {
        CatalogSourceConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CatalogSourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogSourceConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// RAWG Adapter
// =============================================================================

/// [`CatalogSource`] backed by the RAWG HTTP API.
#[derive(Debug, Clone)]
pub struct RawgSource {
    client: Client,
    base: Url,
    api_key: String,
    page_size: u32,
    timeout: Duration,
}

impl RawgSource {
    /// Builds the adapter and its HTTP client.
    ///
    /// ## Errors
    /// - [`ClientError::InvalidUrl`] if `base_url` is not an absolute URL
    /// - [`ClientError::Transport`] if the HTTP client cannot be constructed
    pub fn new(config: CatalogSourceConfig) -> ClientResult<Self> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(RawgSource {
            client,
            base,
            api_key: config.api_key,
            page_size: config.page_size.max(1),
            timeout: config.timeout,
        })
    }

    /// `GET /games` URL for one page.
    pub fn games_url(&self) -> ClientResult<Url> {
        let mut url = self.endpoint(&["games"])?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("page_size", &self.page_size.to_string());
        Ok(url)
    }

    /// `GET /games/{id}` URL.
    pub fn game_url(&self, id: u64) -> ClientResult<Url> {
        let mut url = self.endpoint(&["games", &id.to_string()])?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(path = %url.path(), "Catalog request");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Catalog source returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| self.map_transport(e))
    }

    fn map_transport(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout.as_secs())
        } else {
            ClientError::from(err)
        }
    }
}

#[async_trait]
impl CatalogSource for RawgSource {
    async fn fetch_games(&self) -> ClientResult<Vec<CatalogItem>> {
        let response: GameListResponse = self.get_json(self.games_url()?).await?;
        let items = response.into_items();
        debug!(count = items.len(), "Catalog page received");
        Ok(items)
    }

    async fn fetch_game(&self, id: u64) -> ClientResult<CatalogItem> {
        let dto: GameDto = self.get_json(self.game_url(id)?).await?;
        Ok(dto.into())
    }
}
