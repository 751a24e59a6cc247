use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, pokemon, seed};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog
        .route(
            "/pokemon",
            get(pokemon::list_pokemon).post(pokemon::create_pokemon),
        )
        .route(
            "/pokemon/{term}",
            get(pokemon::get_pokemon)
                .patch(pokemon::update_pokemon)
                .delete(pokemon::delete_pokemon),
        )
        // Seed
        .route("/seed", get(seed::execute_seed))
        .with_state(state.clone());

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
