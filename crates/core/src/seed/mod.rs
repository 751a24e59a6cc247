//! Catalog seeding: wipe the catalog and bulk-load it from PokeAPI.

mod config;
mod service;

pub use config::SeedConfig;
pub use service::SeedService;

use thiserror::Error;

use crate::pokeapi::ExternalSourceError;
use crate::pokemon::RepositoryError;

/// Errors that abort a seed run.
///
/// None of these are recovered: if the fetch fails the catalog has already
/// been cleared and stays empty until the next successful run.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error during seed: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to fetch listing: {0}")]
    Fetch(#[from] ExternalSourceError),

    /// A listing entry whose URL does not end in a numeric segment.
    #[error("Listing entry {name:?} has no number in url {url:?}")]
    InvalidEntry { name: String, url: String },
}
