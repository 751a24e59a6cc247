//! Pokemon catalog: records, storage and the CRUD service.
//!
//! Records are addressed three ways: by pokedex number, by store identifier,
//! or by name. The [`Resolver`] decides which lookup a free-form key means.

mod object_id;
mod resolver;
mod service;
mod sqlite;
mod types;

pub use object_id::{ensure_object_id, generate_object_id, is_valid_object_id, OBJECT_ID_LEN};
pub use resolver::{by_id, by_name, by_no, Resolver, Strategy};
pub use service::PokemonService;
pub use sqlite::SqlitePokemonRepository;
pub use types::*;

/// Storage backend for pokemon records.
///
/// `no` and `name` are unique; collisions are reported as
/// [`RepositoryError::DuplicateKey`] rather than checked up front.
pub trait PokemonRepository: Send + Sync {
    /// Insert a record, assigning a new identifier.
    fn create(&self, input: &NewPokemon) -> Result<Pokemon, RepositoryError>;

    /// Find the first record matching a single-field filter.
    fn find_one(&self, filter: &PokemonFilter) -> Result<Option<Pokemon>, RepositoryError>;

    /// Find a record by store identifier.
    fn find_by_id(&self, id: &str) -> Result<Option<Pokemon>, RepositoryError> {
        self.find_one(&PokemonFilter::Id(id.to_string()))
    }

    /// List records ordered ascending by `no`.
    fn find(&self, pagination: &Pagination) -> Result<Vec<Pokemon>, RepositoryError>;

    /// Apply a partial update to the record with the given identifier.
    fn update_one(&self, id: &str, patch: &PokemonPatch) -> Result<(), RepositoryError>;

    /// Delete records matching the filter. Returns the number deleted.
    fn delete_one(&self, filter: &PokemonFilter) -> Result<u64, RepositoryError>;

    /// Delete every record. Returns the number deleted.
    fn delete_many(&self) -> Result<u64, RepositoryError>;

    /// Insert all records or none of them.
    fn insert_many(&self, inputs: &[NewPokemon]) -> Result<Vec<Pokemon>, RepositoryError>;

    /// Number of stored records.
    fn count(&self) -> Result<u64, RepositoryError>;
}
