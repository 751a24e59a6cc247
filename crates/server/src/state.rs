use std::sync::Arc;

use pokedex_core::{Config, PokemonRepository, PokemonService, PokemonSource, SeedService};

/// Shared application state
pub struct AppState {
    config: Config,
    pokemon: PokemonService,
    seed: SeedService,
}

impl AppState {
    /// Wire the services around an injected store and listing source.
    pub fn new(
        config: Config,
        repository: Arc<dyn PokemonRepository>,
        source: Arc<dyn PokemonSource>,
    ) -> Self {
        let pokemon = PokemonService::new(Arc::clone(&repository));
        let seed = SeedService::new(repository, source, config.seed.limit);
        Self {
            config,
            pokemon,
            seed,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pokemon(&self) -> &PokemonService {
        &self.pokemon
    }

    pub fn seed(&self) -> &SeedService {
        &self.seed
    }

    /// Page size used when a list request has no `limit`.
    pub fn default_page_limit(&self) -> u32 {
        self.config.pagination.default_limit
    }
}
