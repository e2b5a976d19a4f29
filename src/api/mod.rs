//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::catalog::FilmCatalog;
use crate::repository::PlanetRepository;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Base path of the planets resource
pub const PLANETS_PATH: &str = "/apistarwars/planets";

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            PLANETS_PATH,
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route(
            &format!("{}/", PLANETS_PATH),
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route(
            &format!("{}/:id", PLANETS_PATH),
            get(handlers::get_planet).delete(handlers::delete_planet),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper wiring a repository and catalog into a router
pub fn create_planets_router(
    repository: Arc<dyn PlanetRepository>,
    catalog: Arc<dyn FilmCatalog>,
) -> Router {
    create_router(AppState::new(repository, catalog))
}
