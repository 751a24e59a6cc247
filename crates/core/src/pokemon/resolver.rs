//! Key resolution for lookups.
//!
//! A key may be a pokedex number, a store identifier or a name. Each
//! interpretation is a [`Strategy`]; strategies are tried in order and the
//! first one whose filter matches a record wins.

use tracing::debug;

use super::object_id::is_valid_object_id;
use super::{Pokemon, PokemonFilter, PokemonRepository, RepositoryError};

/// Interpret a key as a filter, or decline.
pub type Strategy = fn(&str) -> Option<PokemonFilter>;

/// The key is a whole number, written as an integer (`"25"`) or in
/// float notation (`"25.0"`, `"2.5e1"`).
pub fn by_no(key: &str) -> Option<PokemonFilter> {
    let key = key.trim();
    if let Ok(no) = key.parse::<i64>() {
        return Some(PokemonFilter::No(no));
    }

    let value = key.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range)
        .then(|| PokemonFilter::No(value as i64))
}

/// The key is a store identifier.
pub fn by_id(key: &str) -> Option<PokemonFilter> {
    is_valid_object_id(key).then(|| PokemonFilter::Id(key.to_lowercase()))
}

/// Fallback: the key is a name.
pub fn by_name(key: &str) -> Option<PokemonFilter> {
    Some(PokemonFilter::Name(key.trim().to_lowercase()))
}

/// Ordered set of key strategies.
#[derive(Debug, Clone)]
pub struct Resolver {
    strategies: Vec<Strategy>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(vec![by_no as Strategy, by_id, by_name])
    }
}

impl Resolver {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    /// Filters produced for `key`, in resolution order.
    pub fn filters(&self, key: &str) -> Vec<PokemonFilter> {
        self.strategies
            .iter()
            .filter_map(|strategy| strategy(key))
            .collect()
    }

    /// Find the first record any strategy resolves `key` to.
    pub fn resolve(
        &self,
        repository: &dyn PokemonRepository,
        key: &str,
    ) -> Result<Option<Pokemon>, RepositoryError> {
        for filter in self.filters(key) {
            if let Some(pokemon) = repository.find_one(&filter)? {
                return Ok(Some(pokemon));
            }
            debug!("Key {:?} did not match {:?}", key, filter);
        }
        Ok(None)
    }
}
