use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Pagination default limit is at least 1
/// - Seed source URL is set and seed limit is at least 1
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.pagination.default_limit == 0 {
        return Err(ConfigError::ValidationError(
            "pagination.default_limit must be at least 1".to_string(),
        ));
    }

    if config.seed.source_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "seed.source_url cannot be empty".to_string(),
        ));
    }

    if config.seed.limit == 0 {
        return Err(ConfigError::ValidationError(
            "seed.limit must be at least 1".to_string(),
        ));
    }

    Ok(())
}
