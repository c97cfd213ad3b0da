//! HTTP API: router assembly

pub mod handlers;
pub mod middleware;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/v1", v1_routes())
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn v1_routes() -> Router<AppState> {
    Router::new()
        // Places
        .route("/places", post(handlers::places::create))
        .route("/places/search", get(handlers::places::search))
        .route("/places/geocode", get(handlers::places::geocode))
        .route("/places/export", get(handlers::places::export))
        .route(
            "/places/bulk-delete",
            delete(handlers::places::bulk_delete_places),
        )
        // Vendors
        .route(
            "/vendors",
            get(handlers::vendors::list).post(handlers::vendors::create),
        )
        .route("/vendors/:public_id", put(handlers::vendors::update))
        .route(
            "/vendors/bulk-delete",
            delete(handlers::vendors::bulk_delete_vendors),
        )
        // Integrated vendors
        .route(
            "/integrated-vendors/supported",
            get(handlers::integrated_vendors::supported),
        )
        .route(
            "/integrated-vendors",
            get(handlers::integrated_vendors::list)
                .post(handlers::integrated_vendors::create),
        )
        .route(
            "/integrated-vendors/bulk-delete",
            delete(handlers::integrated_vendors::bulk_delete_integrated_vendors),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
