//! Seed API handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use pokedex_core::SeedError;
use serde::Serialize;
use tracing::{error, info};

use super::pokemon::{ApiError, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Store failures stay in the server log; fetch and listing errors are
/// returned as-is.
fn seed_error_response(e: SeedError) -> ApiError {
    let message = match e {
        SeedError::Repository(ref inner) => {
            error!("Seed store error: {}", inner);
            "Unexpected error - Check server logs".to_string()
        }
        other => other.to_string(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
}

/// GET /api/v1/seed
///
/// Replace the catalog with the configured PokeAPI listing.
pub async fn execute_seed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    info!("Seeding catalog (limit {})", state.seed().limit());

    state
        .seed()
        .execute_seed()
        .await
        .map(|_| {
            Json(SuccessResponse {
                message: "Seed Executed".to_string(),
            })
        })
        .map_err(seed_error_response)
}
