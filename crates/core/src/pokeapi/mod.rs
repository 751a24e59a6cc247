//! External pokemon listing source (PokeAPI).
//!
//! Used by the seed service to fetch the name/URL pairs it bulk-loads.

mod client;
mod types;

pub use client::{PokeApiClient, DEFAULT_POKEAPI_URL};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching from the external source.
#[derive(Debug, Error)]
pub enum ExternalSourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A source of pokemon listings.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Fetch one page of at most `limit` entries.
    async fn fetch_listing(&self, limit: u32) -> Result<PokeListing, ExternalSourceError>;
}
