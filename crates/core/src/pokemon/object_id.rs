//! Store identifiers: 12 bytes rendered as 24 hex characters.
//!
//! The first 4 bytes are the big-endian unix timestamp of creation, the
//! remaining 8 are random.

use chrono::Utc;
use uuid::Uuid;

use super::PokemonError;

/// Length of a rendered identifier.
pub const OBJECT_ID_LEN: usize = 24;

/// Check whether `value` is a syntactically valid store identifier.
pub fn is_valid_object_id(value: &str) -> bool {
    value.len() == OBJECT_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Guard for inputs that must be a raw identifier.
pub fn ensure_object_id(value: &str) -> Result<&str, PokemonError> {
    if is_valid_object_id(value) {
        Ok(value)
    } else {
        Err(PokemonError::BadRequest(format!(
            "{} is not a valid id",
            value
        )))
    }
}

/// Generate a fresh identifier.
pub fn generate_object_id() -> String {
    let timestamp = Utc::now().timestamp() as u32;
    let random = Uuid::new_v4();

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
    bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
