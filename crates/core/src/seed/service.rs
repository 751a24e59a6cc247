//! Seed service.

use std::sync::Arc;

use tracing::{info, warn};

use super::SeedError;
use crate::metrics;
use crate::pokeapi::{PokeListing, PokemonSource};
use crate::pokemon::{NewPokemon, PokemonRepository};

/// Replaces the whole catalog with a fresh listing from the source.
pub struct SeedService {
    repository: Arc<dyn PokemonRepository>,
    source: Arc<dyn PokemonSource>,
    limit: u32,
}

impl SeedService {
    pub fn new(
        repository: Arc<dyn PokemonRepository>,
        source: Arc<dyn PokemonSource>,
        limit: u32,
    ) -> Self {
        Self {
            repository,
            source,
            limit,
        }
    }

    /// Page size requested from the source.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Delete every record, fetch the listing, insert it in one batch.
    ///
    /// Not atomic: a failure after the delete leaves the catalog empty.
    pub async fn execute_seed(&self) -> Result<(), SeedError> {
        let result = self.run().await;

        let label = match &result {
            Ok(_) => "success",
            Err(SeedError::Fetch(_)) => "fetch_failed",
            Err(SeedError::Repository(_)) => "store_failed",
            Err(SeedError::InvalidEntry { .. }) => "invalid_entry",
        };
        metrics::SEED_RUNS.with_label_values(&[label]).inc();

        match result {
            Ok(inserted) => {
                metrics::SEED_RECORDS_INSERTED.inc_by(inserted as u64);
                info!("Seed complete: {} pokemon inserted", inserted);
                Ok(())
            }
            Err(e) => {
                warn!("Seed aborted: {}", e);
                Err(e)
            }
        }
    }

    async fn run(&self) -> Result<usize, SeedError> {
        let deleted = self.repository.delete_many()?;
        info!("Seed: cleared {} existing pokemon", deleted);

        let listing = self.source.fetch_listing(self.limit).await?;
        info!("Seed: fetched {} listing entries", listing.results.len());

        let records = Self::to_records(&listing)?;
        let inserted = self.repository.insert_many(&records)?;

        Ok(inserted.len())
    }

    /// Derive `{no, name}` pairs from the listing.
    fn to_records(listing: &PokeListing) -> Result<Vec<NewPokemon>, SeedError> {
        listing
            .results
            .iter()
            .map(|entry| {
                let no = entry.number().ok_or_else(|| SeedError::InvalidEntry {
                    name: entry.name.clone(),
                    url: entry.url.clone(),
                })?;
                Ok(NewPokemon::new(no, entry.name.as_str()).normalized())
            })
            .collect()
    }
}
