use serde::{Deserialize, Serialize};

use crate::pokeapi::DEFAULT_POKEAPI_URL;

/// Seed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Listing endpoint (default: https://pokeapi.co/api/v2/pokemon).
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Page size requested from the source (default: 650).
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// HTTP timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            limit: default_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_POKEAPI_URL.to_string()
}

fn default_limit() -> u32 {
    650
}

fn default_timeout() -> u32 {
    30
}
