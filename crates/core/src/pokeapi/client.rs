//! PokeAPI HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{ExternalSourceError, PokeListing, PokemonSource};
use crate::metrics;

/// Default listing endpoint.
pub const DEFAULT_POKEAPI_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// PokeAPI client. One GET per call, no retries.
pub struct PokeApiClient {
    client: Client,
    url: String,
}

impl PokeApiClient {
    /// Create a client for the given listing URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ExternalSourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Listing URL this client queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_listing(&self, limit: u32) -> Result<PokeListing, ExternalSourceError> {
        debug!("PokeAPI listing: url='{}', limit={}", self.url, limit);

        let response = self
            .client
            .get(&self.url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalSourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            ExternalSourceError::ParseError(format!("Failed to parse listing response: {}", e))
        })
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch_listing(&self, limit: u32) -> Result<PokeListing, ExternalSourceError> {
        let result = self.get_listing(limit).await;

        let label = if result.is_ok() { "success" } else { "error" };
        metrics::EXTERNAL_REQUESTS
            .with_label_values(&["pokeapi", label])
            .inc();

        result
    }
}
