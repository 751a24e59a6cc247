//! Mock pokemon listing source for testing.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::pokeapi::{ExternalSourceError, PokeListing, PokemonSource};

/// Mock implementation of the [`PokemonSource`] trait.
///
/// Serves a configurable listing (truncated to the requested limit),
/// records every requested limit and can be armed to fail once.
#[derive(Debug, Default)]
pub struct MockPokemonSource {
    listing: Mutex<PokeListing>,
    requests: Mutex<Vec<u32>>,
    next_error: Mutex<Option<ExternalSourceError>>,
}

impl MockPokemonSource {
    /// Create a source with an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source serving `listing`.
    pub fn with_listing(listing: PokeListing) -> Self {
        Self {
            listing: Mutex::new(listing),
            ..Self::default()
        }
    }

    /// Replace the served listing.
    pub fn set_listing(&self, listing: PokeListing) {
        *lock(&self.listing) = listing;
    }

    /// Fail the next fetch with `error`.
    pub fn fail_next(&self, error: ExternalSourceError) {
        *lock(&self.next_error) = Some(error);
    }

    /// Limits passed to `fetch_listing`, in call order.
    pub fn requested_limits(&self) -> Vec<u32> {
        lock(&self.requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl PokemonSource for MockPokemonSource {
    async fn fetch_listing(&self, limit: u32) -> Result<PokeListing, ExternalSourceError> {
        lock(&self.requests).push(limit);

        if let Some(error) = lock(&self.next_error).take() {
            return Err(error);
        }

        let mut listing = lock(&self.listing).clone();
        listing.results.truncate(limit as usize);
        Ok(listing)
    }
}
