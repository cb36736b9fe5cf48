//! PokeAPI Client
//!
//! Fetches JSON resources, serving repeated requests for the same URL from
//! the [`TtlCache`] while the cached body is still live.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationPage, Pokemon};

/// Cache-aware client for the PokeAPI.
///
/// Cache keys are the full request URLs, used exactly as built.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: TtlCache,
}

impl PokeApiClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - API root such as `https://pokeapi.co/api/v2`
    /// * `cache` - response cache shared with the rest of the process
    /// * `timeout` - per-request timeout
    pub fn new(base_url: impl Into<String>, cache: TtlCache, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    /// Fetches a page of location areas by its full URL, as returned in a
    /// previous page's `next`/`previous` links.
    pub async fn location_page(&self, url: &str) -> Result<LocationPage> {
        self.fetch_json(url).await
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch_json(&self.pokemon_url(name)).await
    }

    // == Fetch JSON ==
    /// Decodes the resource at `url`, preferring a cached body.
    ///
    /// A cached body that no longer decodes is discarded in favour of a fresh
    /// fetch, which then replaces it. Only bodies that decode successfully
    /// are cached.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(cached) = self.cache.get(url) {
            match serde_json::from_slice(&cached) {
                Ok(value) => {
                    debug!(url, "served from cache");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(url, error = %err, "cached body failed to decode, refetching");
                }
            }
        }

        let body = self.fetch_body(url).await?;
        let value = serde_json::from_slice(&body)?;
        self.cache.put(url, body);
        Ok(value)
    }

    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "sending HTTP request");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, %status, "request failed");
            return Err(PokedexError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
