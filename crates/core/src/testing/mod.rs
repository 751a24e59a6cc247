//! Testing utilities and in-memory implementations of the storage and
//! external-source traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pokedex_core::testing::{fixtures, InMemoryPokemonRepository, MockPokemonSource};
//!
//! let repository = Arc::new(InMemoryPokemonRepository::new());
//! let source = Arc::new(MockPokemonSource::with_listing(fixtures::listing(151)));
//! let seed = SeedService::new(repository, source, 151);
//! ```

mod memory_repository;
mod mock_source;

pub use memory_repository::InMemoryPokemonRepository;
pub use mock_source::MockPokemonSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::pokeapi::{PokeListing, PokeListingEntry};

    /// Listing entry shaped like PokeAPI's.
    pub fn listing_entry(no: i64, name: &str) -> PokeListingEntry {
        PokeListingEntry::new(name, format!("https://pokeapi.co/api/v2/pokemon/{}/", no))
    }

    /// Listing of `count` entries named `pokemon-<no>`, numbered from 1.
    pub fn listing(count: u32) -> PokeListing {
        PokeListing {
            count: count as u64,
            next: None,
            previous: None,
            results: (1..=count as i64)
                .map(|no| listing_entry(no, &format!("pokemon-{}", no)))
                .collect(),
        }
    }

    /// The first-generation starters and their evolutions.
    pub fn starters() -> PokeListing {
        let results = [
            (1, "bulbasaur"),
            (2, "ivysaur"),
            (3, "venusaur"),
            (4, "charmander"),
            (5, "charmeleon"),
            (6, "charizard"),
            (7, "squirtle"),
            (8, "wartortle"),
            (9, "blastoise"),
        ]
        .into_iter()
        .map(|(no, name)| listing_entry(no, name))
        .collect::<Vec<_>>();

        PokeListing {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}
