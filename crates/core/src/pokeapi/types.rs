//! Types for PokeAPI listing responses.

use serde::{Deserialize, Serialize};

/// A page of the `/pokemon` listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokeListing {
    /// Total number of entries upstream.
    #[serde(default)]
    pub count: u64,
    /// URL of the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Entries on this page.
    pub results: Vec<PokeListingEntry>,
}

/// A single listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeListingEntry {
    pub name: String,
    /// Canonical resource URL, e.g. `https://pokeapi.co/api/v2/pokemon/25/`.
    pub url: String,
}

impl PokeListingEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Pokedex number encoded in the URL: the second-to-last `/` segment.
    pub fn number(&self) -> Option<i64> {
        let segments: Vec<&str> = self.url.split('/').collect();
        if segments.len() < 2 {
            return None;
        }
        segments[segments.len() - 2].parse().ok()
    }
}
