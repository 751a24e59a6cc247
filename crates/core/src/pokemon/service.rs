//! Catalog service: create, list, look up, update and remove records.

use std::sync::Arc;

use tracing::{error, info};

use super::{
    NewPokemon, Pagination, Pokemon, PokemonError, PokemonFilter, PokemonPatch,
    PokemonRepository, RepositoryError, Resolver,
};

/// CRUD operations over an injected repository.
#[derive(Clone)]
pub struct PokemonService {
    repository: Arc<dyn PokemonRepository>,
    resolver: Resolver,
}

impl PokemonService {
    pub fn new(repository: Arc<dyn PokemonRepository>) -> Self {
        Self {
            repository,
            resolver: Resolver::default(),
        }
    }

    /// Create a record. The name is stored lowercase.
    pub fn create(&self, input: NewPokemon) -> Result<Pokemon, PokemonError> {
        let input = input.normalized();

        let pokemon = self
            .repository
            .create(&input)
            .map_err(|e| Self::handle_write_error(e, "create"))?;

        info!("Created pokemon #{} {} ({})", pokemon.no, pokemon.name, pokemon.id);
        Ok(pokemon)
    }

    /// List records ordered by `no`.
    pub fn find_all(&self, pagination: &Pagination) -> Result<Vec<Pokemon>, PokemonError> {
        self.repository
            .find(pagination)
            .map_err(Self::handle_read_error)
    }

    /// Look up a record by number, identifier or name, in that order.
    pub fn find_one(&self, key: &str) -> Result<Pokemon, PokemonError> {
        self.resolver
            .resolve(self.repository.as_ref(), key)
            .map_err(Self::handle_read_error)?
            .ok_or_else(|| {
                PokemonError::NotFound(format!(
                    "Pokemon with id, name or no \"{}\" not found",
                    key
                ))
            })
    }

    /// Apply a partial update to the record `key` resolves to.
    ///
    /// Returns the resolved record overlaid with the patch; it is not re-read
    /// from the store.
    pub fn update(&self, key: &str, patch: PokemonPatch) -> Result<Pokemon, PokemonError> {
        let pokemon = self.find_one(key)?;

        let mut patch = patch;
        if let Some(name) = patch.name.take() {
            patch.name = Some(name.to_lowercase());
        }

        self.repository
            .update_one(&pokemon.id, &patch)
            .map_err(|e| Self::handle_write_error(e, "update"))?;

        info!("Updated pokemon {}", pokemon.id);
        Ok(patch.apply_to(pokemon))
    }

    /// Delete by store identifier. Keys are not resolved here.
    pub fn remove(&self, id: &str) -> Result<(), PokemonError> {
        let deleted = self
            .repository
            .delete_one(&PokemonFilter::Id(id.to_string()))
            .map_err(Self::handle_read_error)?;

        if deleted == 0 {
            return Err(PokemonError::BadRequest(format!(
                "Pokemon with id \"{}\" not found",
                id
            )));
        }

        info!("Removed pokemon {}", id);
        Ok(())
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64, PokemonError> {
        self.repository.count().map_err(Self::handle_read_error)
    }

    fn handle_write_error(e: RepositoryError, action: &str) -> PokemonError {
        match e {
            RepositoryError::DuplicateKey { field, value } => {
                let key_value = serde_json::json!({ field: value });
                PokemonError::Conflict(format!("Pokemon exists in db {}", key_value))
            }
            other => {
                error!("Failed to {} pokemon: {}", action, other);
                PokemonError::Internal(format!("Can't {} Pokemon - Check server logs", action))
            }
        }
    }

    fn handle_read_error(e: RepositoryError) -> PokemonError {
        error!("Pokemon store error: {}", e);
        PokemonError::Internal("Unexpected error - Check server logs".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::is_valid_object_id;
    use crate::testing::InMemoryPokemonRepository;

    fn create_test_service() -> (PokemonService, Arc<InMemoryPokemonRepository>) {
        let repository = Arc::new(InMemoryPokemonRepository::new());
        let service = PokemonService::new(Arc::clone(&repository) as Arc<dyn PokemonRepository>);
        (service, repository)
    }

    fn seed_three(service: &PokemonService) -> Vec<Pokemon> {
        [(3, "Venusaur"), (1, "Bulbasaur"), (2, "Ivysaur")]
            .into_iter()
            .map(|(no, name)| service.create(NewPokemon::new(no, name)).unwrap())
            .collect()
    }

    #[test]
    fn test_create_lowercases_name() {
        let (service, _) = create_test_service();
        let pokemon = service.create(NewPokemon::new(25, "PIKACHU")).unwrap();

        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.no, 25);
        assert!(is_valid_object_id(&pokemon.id));
    }

    #[test]
    fn test_create_duplicate_name_case_insensitive_is_conflict() {
        let (service, _) = create_test_service();
        service.create(NewPokemon::new(25, "Pikachu")).unwrap();

        let result = service.create(NewPokemon::new(26, "PIKACHU"));
        assert_eq!(
            result,
            Err(PokemonError::Conflict(
                "Pokemon exists in db {\"name\":\"pikachu\"}".to_string()
            ))
        );
    }

    #[test]
    fn test_create_duplicate_no_is_conflict() {
        let (service, _) = create_test_service();
        service.create(NewPokemon::new(25, "pikachu")).unwrap();

        let result = service.create(NewPokemon::new(25, "raichu"));
        assert_eq!(
            result,
            Err(PokemonError::Conflict(
                "Pokemon exists in db {\"no\":25}".to_string()
            ))
        );
    }

    #[test]
    fn test_create_store_failure_is_internal() {
        let (service, repository) = create_test_service();
        repository.fail_next("disk on fire");

        let result = service.create(NewPokemon::new(25, "pikachu"));
        assert_eq!(
            result,
            Err(PokemonError::Internal(
                "Can't create Pokemon - Check server logs".to_string()
            ))
        );
    }

    #[test]
    fn test_find_all_paginates_by_no() {
        let (service, _) = create_test_service();
        seed_three(&service);

        let page = service.find_all(&Pagination::new(2, 1)).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].no, 2);
        assert_eq!(page[1].no, 3);

        let default_page = service.find_all(&Pagination::default()).unwrap();
        assert_eq!(default_page.len(), 3);
        assert_eq!(default_page[0].name, "bulbasaur");
    }

    #[test]
    fn test_find_one_by_every_key_form() {
        let (service, _) = create_test_service();
        let created = service.create(NewPokemon::new(5, "Charmeleon")).unwrap();

        assert_eq!(service.find_one("5").unwrap(), created);
        assert_eq!(service.find_one(&created.id).unwrap(), created);
        assert_eq!(service.find_one("Charmeleon").unwrap(), created);
        assert_eq!(service.find_one("  charmeleon ").unwrap(), created);
    }

    #[test]
    fn test_find_one_not_found() {
        let (service, _) = create_test_service();
        service.create(NewPokemon::new(25, "pikachu")).unwrap();

        let result = service.find_one("Missingno");
        assert_eq!(
            result,
            Err(PokemonError::NotFound(
                "Pokemon with id, name or no \"Missingno\" not found".to_string()
            ))
        );
        assert!(matches!(
            service.find_one("999"),
            Err(PokemonError::NotFound(_))
        ));
        assert!(matches!(
            service.find_one("65a1b2c3d4e5f60718293a4b"),
            Err(PokemonError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_lowercases_and_returns_merged_view() {
        let (service, _) = create_test_service();
        let created = service.create(NewPokemon::new(25, "pikachu")).unwrap();

        let updated = service
            .update("25", PokemonPatch::default().with_name("Raichu"))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.no, 25);
        assert_eq!(updated.name, "raichu");

        assert_eq!(service.find_one("25").unwrap().name, "raichu");
        assert_eq!(service.find_one("raichu").unwrap().id, created.id);
    }

    #[test]
    fn test_update_missing_key_is_not_found() {
        let (service, _) = create_test_service();
        let result = service.update("pikachu", PokemonPatch::default().with_no(26));
        assert!(matches!(result, Err(PokemonError::NotFound(_))));
    }

    #[test]
    fn test_update_conflict() {
        let (service, _) = create_test_service();
        service.create(NewPokemon::new(25, "pikachu")).unwrap();
        service.create(NewPokemon::new(26, "raichu")).unwrap();

        let result = service.update("raichu", PokemonPatch::default().with_name("PIKACHU"));
        assert_eq!(
            result,
            Err(PokemonError::Conflict(
                "Pokemon exists in db {\"name\":\"pikachu\"}".to_string()
            ))
        );
    }

    #[test]
    fn test_update_store_failure_is_internal() {
        let (service, repository) = create_test_service();
        service.create(NewPokemon::new(25, "pikachu")).unwrap();

        repository.fail_on_update("locked");
        let result = service.update("pikachu", PokemonPatch::default().with_no(26));
        assert_eq!(
            result,
            Err(PokemonError::Internal(
                "Can't update Pokemon - Check server logs".to_string()
            ))
        );
    }

    #[test]
    fn test_remove_then_lookup_is_not_found() {
        let (service, _) = create_test_service();
        let created = service.create(NewPokemon::new(25, "pikachu")).unwrap();

        service.remove(&created.id).unwrap();

        assert!(matches!(
            service.find_one(&created.id),
            Err(PokemonError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_nonexistent_is_bad_request() {
        let (service, _) = create_test_service();
        let result = service.remove("65a1b2c3d4e5f60718293a4b");
        assert_eq!(
            result,
            Err(PokemonError::BadRequest(
                "Pokemon with id \"65a1b2c3d4e5f60718293a4b\" not found".to_string()
            ))
        );
    }

    #[test]
    fn test_remove_does_not_resolve_names() {
        let (service, _) = create_test_service();
        service.create(NewPokemon::new(25, "pikachu")).unwrap();

        assert!(matches!(
            service.remove("pikachu"),
            Err(PokemonError::BadRequest(_))
        ));
        assert!(matches!(service.remove("25"), Err(PokemonError::BadRequest(_))));
        assert_eq!(service.count().unwrap(), 1);
    }
}
