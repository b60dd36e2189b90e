//! PokeAPI Client
//!
//! Fetch layer in front of the expiring cache. Every request is keyed by its
//! resolved URL: a cache hit is decoded and returned, anything else goes to
//! the network and successful bodies are stored back under the same key.

use serde::de::DeserializeOwned;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};
use crate::pokedex::Pokedex;

/// REST client for PokeAPI with response caching and a Pokedex.
///
/// Dropping the client drops its cache, which stops the reaper.
#[derive(Debug)]
pub struct PokeApiClient {
    base_url: String,
    http: reqwest::Client,
    cache: Cache,
    pokedex: Pokedex,
}

impl PokeApiClient {
    /// Creates a client from configuration.
    ///
    /// Must be called inside a Tokio runtime, since it starts the cache reaper.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self::with_http_client(
            http,
            &config.api_base_url,
            config.cache_interval,
        ))
    }

    /// Creates a client against `base_url` with default HTTP settings.
    pub fn with_base_url(base_url: &str, cache_interval: Duration) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, cache_interval)
    }

    fn with_http_client(http: reqwest::Client, base_url: &str, cache_interval: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!(
            "PokeAPI client for {} with cache interval {:?}",
            base_url, cache_interval
        );

        Self {
            base_url,
            http,
            cache: Cache::new(cache_interval),
            pokedex: Pokedex::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    // == Endpoint Keys ==
    /// URL of the first location area page.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> Result<String> {
        Ok(format!(
            "{}/location-area/{}",
            self.base_url,
            validate_name(name)?
        ))
    }

    pub fn pokemon_url(&self, name: &str) -> Result<String> {
        Ok(format!("{}/pokemon/{}", self.base_url, validate_name(name)?))
    }

    // == Operations ==
    /// Fetches a page of location areas.
    ///
    /// `page_url` is an absolute URL taken from a previous page's `next` or
    /// `previous` field; `None` fetches the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => self.location_areas_url(),
        };
        self.fetch_json(&url).await
    }

    /// Fetches one location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = self.location_area_url(name)?;
        self.fetch_json(&url).await
    }

    /// Fetches one Pokemon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.pokemon_url(name)?;
        self.fetch_json(&url).await
    }

    /// Stops the cache reaper and releases the client.
    pub async fn shutdown(self) {
        self.cache.shutdown().await;
    }

    // == Fetch ==
    /// Cache-first GET of `url`, decoded as `T`.
    ///
    /// A cached body that fails to decode is logged, counted and treated as a
    /// miss. Only 2xx bodies that decode as `T` are written to the cache.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(cached) = self.cache.get(url).await {
            match serde_json::from_slice::<T>(&cached) {
                Ok(value) => {
                    debug!(url, "Serving response from cache");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(url, error = %err, "Cached response failed to decode, refetching");
                    self.cache.record_corrupt_hit().await;
                }
            }
        }

        debug!(url, "Fetching from network");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let value = serde_json::from_slice::<T>(&body)?;
        self.cache.add(url, body.to_vec()).await;
        Ok(value)
    }
}

/// Trims `name` and rejects values that would not address a single resource.
fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FetchError::InvalidInput("name cannot be empty".to_string()));
    }
    if name.contains(['/', '?', '#']) || name.contains(char::is_whitespace) {
        return Err(FetchError::InvalidInput(format!(
            "'{}' is not a valid resource name",
            name
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PokeApiClient {
        PokeApiClient::with_base_url("https://pokeapi.co/api/v2/", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let client = client();
        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(
            client.location_areas_url(),
            "https://pokeapi.co/api/v2/location-area"
        );
    }

    #[tokio::test]
    async fn test_endpoint_keys() {
        let client = client();
        assert_eq!(
            client.location_area_url("canalave-city-area").unwrap(),
            "https://pokeapi.co/api/v2/location-area/canalave-city-area"
        );
        assert_eq!(
            client.pokemon_url(" pikachu ").unwrap(),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[tokio::test]
    async fn test_invalid_names_rejected_before_lookup() {
        let client = client();

        assert!(matches!(
            client.pokemon("").await,
            Err(FetchError::InvalidInput(_))
        ));
        assert!(matches!(
            client.location_area("../berries").await,
            Err(FetchError::InvalidInput(_))
        ));

        let stats = client.cache().stats().await;
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[tokio::test]
    async fn test_cached_payload_served_without_network() {
        // Unroutable base; only the cache can answer
        let client = PokeApiClient::with_base_url("http://127.0.0.1:9", Duration::from_secs(60));
        let url = client.pokemon_url("ditto").unwrap();
        client
            .cache()
            .add(
                url,
                br#"{"id":132,"name":"ditto","base_experience":101,"height":3,"weight":40}"#.to_vec(),
            )
            .await;

        let pokemon = client.pokemon("ditto").await.unwrap();

        assert_eq!(pokemon.id, 132);
        assert_eq!(client.cache().stats().await.hits, 1);
    }
}
