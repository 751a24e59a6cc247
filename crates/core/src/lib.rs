pub mod config;
pub mod metrics;
pub mod pokeapi;
pub mod pokemon;
pub mod seed;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    PaginationConfig, ServerConfig,
};
pub use pokeapi::{
    ExternalSourceError, PokeApiClient, PokeListing, PokeListingEntry, PokemonSource,
    DEFAULT_POKEAPI_URL,
};
pub use pokemon::{
    ensure_object_id, is_valid_object_id, NewPokemon, Pagination, Pokemon, PokemonError,
    PokemonFilter, PokemonPatch, PokemonRepository, PokemonService, RepositoryError, Resolver,
    SqlitePokemonRepository,
};
pub use seed::{SeedConfig, SeedError, SeedService};
