//! In-memory pokemon repository for testing.

use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::pokemon::{
    generate_object_id, NewPokemon, Pagination, Pokemon, PokemonFilter, PokemonPatch,
    PokemonRepository, RepositoryError,
};

/// In-memory implementation of [`PokemonRepository`].
///
/// Enforces the same uniqueness rules as the SQLite store (`id`, `no`,
/// `name`) and can be told to fail:
/// - [`fail_next`](Self::fail_next) fails the next call of any kind
/// - [`fail_on_update`](Self::fail_on_update) fails the next `update_one`
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use pokedex_core::testing::InMemoryPokemonRepository;
///
/// let repository = Arc::new(InMemoryPokemonRepository::new());
/// let service = PokemonService::new(repository.clone());
/// repository.fail_next("boom");
/// assert!(service.create(NewPokemon::new(1, "bulbasaur")).is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPokemonRepository {
    records: Mutex<Vec<Pokemon>>,
    next_error: Mutex<Option<String>>,
    next_update_error: Mutex<Option<String>>,
}

impl InMemoryPokemonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next repository call with a database error.
    pub fn fail_next(&self, message: impl Into<String>) {
        *lock(&self.next_error) = Some(message.into());
    }

    /// Fail the next `update_one` with a database error.
    pub fn fail_on_update(&self, message: impl Into<String>) {
        *lock(&self.next_update_error) = Some(message.into());
    }

    /// Snapshot of every stored record, in insertion order.
    pub fn records(&self) -> Vec<Pokemon> {
        lock(&self.records).clone()
    }

    fn take_error(&self) -> Result<(), RepositoryError> {
        match lock(&self.next_error).take() {
            Some(message) => Err(RepositoryError::Database(message)),
            None => Ok(()),
        }
    }

    fn matches(pokemon: &Pokemon, filter: &PokemonFilter) -> bool {
        match filter {
            PokemonFilter::No(no) => pokemon.no == *no,
            PokemonFilter::Id(id) => pokemon.id.eq_ignore_ascii_case(id),
            PokemonFilter::Name(name) => pokemon.name == *name,
        }
    }

    /// Uniqueness check for `candidate` against `records`, skipping `skip_id`.
    fn check_unique(
        records: &[Pokemon],
        candidate: &Pokemon,
        skip_id: Option<&str>,
    ) -> Result<(), RepositoryError> {
        for existing in records
            .iter()
            .filter(|p| Some(p.id.as_str()) != skip_id)
        {
            if existing.no == candidate.no {
                return Err(RepositoryError::DuplicateKey {
                    field: "no".to_string(),
                    value: Value::from(candidate.no),
                });
            }
            if existing.name == candidate.name {
                return Err(RepositoryError::DuplicateKey {
                    field: "name".to_string(),
                    value: Value::from(candidate.name.clone()),
                });
            }
        }
        Ok(())
    }

    fn build(input: &NewPokemon) -> Pokemon {
        Pokemon {
            id: generate_object_id(),
            no: input.no,
            name: input.name.clone(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl PokemonRepository for InMemoryPokemonRepository {
    fn create(&self, input: &NewPokemon) -> Result<Pokemon, RepositoryError> {
        self.take_error()?;
        let mut records = lock(&self.records);

        let pokemon = Self::build(input);
        Self::check_unique(&records, &pokemon, None)?;
        records.push(pokemon.clone());
        Ok(pokemon)
    }

    fn find_one(&self, filter: &PokemonFilter) -> Result<Option<Pokemon>, RepositoryError> {
        self.take_error()?;
        Ok(lock(&self.records)
            .iter()
            .find(|p| Self::matches(p, filter))
            .cloned())
    }

    fn find(&self, pagination: &Pagination) -> Result<Vec<Pokemon>, RepositoryError> {
        self.take_error()?;
        let mut sorted = lock(&self.records).clone();
        sorted.sort_by_key(|p| p.no);

        Ok(sorted
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    fn update_one(&self, id: &str, patch: &PokemonPatch) -> Result<(), RepositoryError> {
        self.take_error()?;
        if let Some(message) = lock(&self.next_update_error).take() {
            return Err(RepositoryError::Database(message));
        }

        let mut records = lock(&self.records);
        let Some(index) = records.iter().position(|p| p.id.eq_ignore_ascii_case(id)) else {
            return Ok(());
        };

        let updated = patch.apply_to(records[index].clone());
        Self::check_unique(&records, &updated, Some(&updated.id))?;
        records[index] = updated;
        Ok(())
    }

    fn delete_one(&self, filter: &PokemonFilter) -> Result<u64, RepositoryError> {
        self.take_error()?;
        let mut records = lock(&self.records);

        match records.iter().position(|p| Self::matches(p, filter)) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_many(&self) -> Result<u64, RepositoryError> {
        self.take_error()?;
        let mut records = lock(&self.records);
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }

    fn insert_many(&self, inputs: &[NewPokemon]) -> Result<Vec<Pokemon>, RepositoryError> {
        self.take_error()?;
        let mut records = lock(&self.records);

        // Validate against a scratch copy so a failure leaves nothing behind.
        let mut staged = records.clone();
        let mut inserted = Vec::with_capacity(inputs.len());
        for input in inputs {
            let pokemon = Self::build(input);
            Self::check_unique(&staged, &pokemon, None)?;
            staged.push(pokemon.clone());
            inserted.push(pokemon);
        }

        *records = staged;
        Ok(inserted)
    }

    fn count(&self) -> Result<u64, RepositoryError> {
        self.take_error()?;
        Ok(lock(&self.records).len() as u64)
    }
}
