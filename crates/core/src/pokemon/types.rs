//! Types for the pokemon catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Store identifier (24 hex characters), assigned on creation.
    pub id: String,
    /// Canonical pokedex number.
    pub no: i64,
    /// Name, always lowercase once stored.
    pub name: String,
}

/// Payload for creating a record.
///
/// Unknown fields in incoming JSON are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPokemon {
    pub no: i64,
    pub name: String,
}

impl NewPokemon {
    pub fn new(no: i64, name: impl Into<String>) -> Self {
        Self {
            no,
            name: name.into(),
        }
    }

    /// Lowercase the name in place.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.to_lowercase();
        self
    }
}

/// Partial update. Only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PokemonPatch {
    /// Set the number.
    pub fn with_no(mut self, no: i64) -> Self {
        self.no = Some(no);
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.no.is_none() && self.name.is_none()
    }

    /// Overlay the patch onto a record.
    pub fn apply_to(&self, mut pokemon: Pokemon) -> Pokemon {
        if let Some(no) = self.no {
            pokemon.no = no;
        }
        if let Some(ref name) = self.name {
            pokemon.name = name.clone();
        }
        pokemon
    }
}

/// A single-field lookup against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonFilter {
    /// Match on `no`.
    No(i64),
    /// Match on the store identifier.
    Id(String),
    /// Exact match on the (lowercase) name.
    Name(String),
}

/// Window over the catalog ordered by `no`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

pub(crate) fn default_limit() -> u32 {
    10
}

/// Errors raised by a repository backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique field collided with an existing record.
    #[error("Duplicate key on {field}: {value}")]
    DuplicateKey {
        field: String,
        value: serde_json::Value,
    },

    #[error("Database error: {0}")]
    Database(String),
}

/// Errors surfaced by the catalog service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PokemonError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}
