//! API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::types::{CreatePlanetRequest, Planet};
use crate::Error;

/// Health check with store status
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let planets = state.repository.find_all().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        planets: planets.len(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub planets: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
}

/// List all planets, or look one up by `?name=`
pub async fn list_planets(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    match params.name {
        Some(name) => {
            let planet = state
                .repository
                .find_by_name(&name)
                .await?
                .ok_or_else(|| Error::not_found_name(name))?;
            Ok(Json(planet).into_response())
        }
        None => {
            let planets = state.repository.find_all().await?;
            Ok(Json(planets).into_response())
        }
    }
}

pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Planet>, ApiError> {
    let planet = state
        .repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found_id(id))?;

    Ok(Json(planet))
}

/// Create a planet, counting its film appearances through the catalog
///
/// Nothing is stored unless the catalog lookup succeeds.
pub async fn create_planet(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanetRequest>,
) -> Result<(StatusCode, Json<Planet>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(Error::InvalidRequest("name must not be empty".to_string()).into());
    }

    // Skip the upstream call for names we already know are taken
    if state
        .repository
        .find_by_name(&payload.name)
        .await?
        .is_some()
    {
        return Err(Error::PlanetAlreadyExists(payload.name).into());
    }

    let in_movies = state
        .catalog
        .count_films(&payload.name)
        .await
        .map_err(Error::from)?;

    let planet = state
        .repository
        .insert_if_absent(Planet::new(payload, in_movies))
        .await?;

    tracing::info!(id = %planet.id, name = %planet.name, in_movies, "Planet created");

    Ok((StatusCode::CREATED, Json(planet)))
}

pub async fn delete_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let planet = state
        .repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found_id(id))?;

    state.repository.delete(&planet).await?;
    tracing::info!(id = %planet.id, name = %planet.name, "Planet deleted");

    Ok(StatusCode::OK)
}
