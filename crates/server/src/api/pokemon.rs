//! Pokemon catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use pokedex_core::{ensure_object_id, NewPokemon, Pagination, Pokemon, PokemonError, PokemonPatch};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreatePokemonRequest {
    #[serde(default)]
    pub no: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePokemonRequest {
    #[serde(default)]
    pub no: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a catalog failure to its HTTP status.
pub fn error_response(e: PokemonError) -> ApiError {
    let status = match &e {
        PokemonError::Conflict(_) => StatusCode::CONFLICT,
        PokemonError::NotFound(_) => StatusCode::NOT_FOUND,
        PokemonError::BadRequest(_) => StatusCode::BAD_REQUEST,
        PokemonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.to_string())
}

// ============================================================================
// Validation
// ============================================================================

fn validate_no(no: i64) -> Result<i64, ApiError> {
    if no < 1 {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "no must be a positive integer",
        ));
    }
    Ok(no)
}

fn validate_name(name: String) -> Result<String, ApiError> {
    if name.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "name must not be empty"));
    }
    Ok(name)
}

impl CreatePokemonRequest {
    fn into_new_pokemon(self) -> Result<NewPokemon, ApiError> {
        let no = self
            .no
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "no is required"))
            .and_then(validate_no)?;
        let name = self
            .name
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "name is required"))
            .and_then(validate_name)?;
        Ok(NewPokemon::new(no, name))
    }
}

impl UpdatePokemonRequest {
    fn into_patch(self) -> Result<PokemonPatch, ApiError> {
        let mut patch = PokemonPatch::default();
        if let Some(no) = self.no {
            patch = patch.with_no(validate_no(no)?);
        }
        if let Some(name) = self.name {
            patch = patch.with_name(validate_name(name)?);
        }
        Ok(patch)
    }
}

impl ListQueryParams {
    fn into_pagination(self, default_limit: u32) -> Result<Pagination, ApiError> {
        let limit = match self.limit {
            None => default_limit,
            Some(limit) if limit >= 1 => u32::try_from(limit).map_err(|_| {
                api_error(StatusCode::BAD_REQUEST, "limit is out of range")
            })?,
            Some(_) => {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "limit must be a positive integer",
                ))
            }
        };
        let offset = match self.offset {
            None => 0,
            Some(offset) if offset >= 0 => u32::try_from(offset).map_err(|_| {
                api_error(StatusCode::BAD_REQUEST, "offset is out of range")
            })?,
            Some(_) => {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "offset must not be negative",
                ))
            }
        };
        Ok(Pagination::new(limit, offset))
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| api_error(StatusCode::BAD_REQUEST, rejection.body_text()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/pokemon
pub async fn create_pokemon(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreatePokemonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pokemon>), ApiError> {
    let input = json_body(body)?.into_new_pokemon()?;

    state
        .pokemon()
        .create(input)
        .map(|pokemon| (StatusCode::CREATED, Json(pokemon)))
        .map_err(error_response)
}

/// GET /api/v1/pokemon
///
/// Paginated listing ordered by `no`.
pub async fn list_pokemon(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListQueryParams>, QueryRejection>,
) -> Result<Json<Vec<Pokemon>>, ApiError> {
    let Query(params) =
        params.map_err(|rejection| api_error(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    let pagination = params.into_pagination(state.default_page_limit())?;

    state
        .pokemon()
        .find_all(&pagination)
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/pokemon/{term}
///
/// `term` may be a pokedex number, a store id or a name.
pub async fn get_pokemon(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Result<Json<Pokemon>, ApiError> {
    state
        .pokemon()
        .find_one(&term)
        .map(Json)
        .map_err(error_response)
}

/// PATCH /api/v1/pokemon/{term}
pub async fn update_pokemon(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
    body: Result<Json<UpdatePokemonRequest>, JsonRejection>,
) -> Result<Json<Pokemon>, ApiError> {
    let patch = json_body(body)?.into_patch()?;

    state
        .pokemon()
        .update(&term, patch)
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/v1/pokemon/{id}
///
/// Only store ids are accepted; other keys are rejected before the store is hit.
pub async fn delete_pokemon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ensure_object_id(&id).map_err(error_response)?;

    state
        .pokemon()
        .remove(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let cases = [
            (PokemonError::Conflict("c".into()), StatusCode::CONFLICT),
            (PokemonError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (PokemonError::BadRequest("b".into()), StatusCode::BAD_REQUEST),
            (
                PokemonError::Internal("i".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            let message = error.to_string();
            let (status, Json(body)) = error_response(error);
            assert_eq!(status, expected);
            assert_eq!(body.error, message);
        }
    }

    #[test]
    fn test_create_request_requires_positive_no() {
        let request = CreatePokemonRequest {
            no: Some(0),
            name: Some("pikachu".into()),
        };
        let (status, _) = request.into_new_pokemon().unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = CreatePokemonRequest {
            no: None,
            name: Some("pikachu".into()),
        };
        assert!(request.into_new_pokemon().is_err());
    }

    #[test]
    fn test_create_request_requires_name() {
        let request = CreatePokemonRequest {
            no: Some(25),
            name: Some("   ".into()),
        };
        assert!(request.into_new_pokemon().is_err());

        let request = CreatePokemonRequest {
            no: Some(25),
            name: None,
        };
        assert!(request.into_new_pokemon().is_err());
    }

    #[test]
    fn test_create_request_keeps_name_casing() {
        let request = CreatePokemonRequest {
            no: Some(25),
            name: Some("Pikachu".into()),
        };
        let input = request.into_new_pokemon().unwrap();
        assert_eq!(input, NewPokemon::new(25, "Pikachu"));
    }

    #[test]
    fn test_update_request_builds_partial_patch() {
        let request = UpdatePokemonRequest {
            no: None,
            name: Some("Raichu".into()),
        };
        let patch = request.into_patch().unwrap();
        assert_eq!(patch, PokemonPatch::default().with_name("Raichu"));

        let empty = UpdatePokemonRequest {
            no: None,
            name: None,
        };
        assert!(empty.into_patch().unwrap().is_empty());
    }

    #[test]
    fn test_update_request_rejects_invalid_fields() {
        let request = UpdatePokemonRequest {
            no: Some(-3),
            name: None,
        };
        assert!(request.into_patch().is_err());

        let request = UpdatePokemonRequest {
            no: None,
            name: Some(String::new()),
        };
        assert!(request.into_patch().is_err());
    }

    #[test]
    fn test_list_query_defaults() {
        let params = ListQueryParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.into_pagination(10).unwrap(), Pagination::new(10, 0));
    }

    #[test]
    fn test_list_query_validation() {
        let zero_limit = ListQueryParams {
            limit: Some(0),
            offset: None,
        };
        assert!(zero_limit.into_pagination(10).is_err());

        let negative_offset = ListQueryParams {
            limit: Some(5),
            offset: Some(-1),
        };
        assert!(negative_offset.into_pagination(10).is_err());

        let valid = ListQueryParams {
            limit: Some(2),
            offset: Some(1),
        };
        assert_eq!(valid.into_pagination(10).unwrap(), Pagination::new(2, 1));
    }
}
