//! Core types for planets-api

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Planet identifier type
pub type PlanetId = String;

/// A stored planet record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub climate: String,
    pub terrain: String,
    /// Number of films the planet appears in, fixed at creation
    pub in_movies: u32,
}

impl Planet {
    /// Build a new record with a freshly generated identifier
    pub fn new(request: CreatePlanetRequest, in_movies: u32) -> Self {
        Self {
            id: generate_id(),
            name: request.name,
            climate: request.climate,
            terrain: request.terrain,
            in_movies,
        }
    }
}

/// Payload accepted when creating a planet.
///
/// `id` and `inMovies` may be present in the body but are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePlanetRequest {
    pub name: String,
    pub climate: String,
    pub terrain: String,
}

impl CreatePlanetRequest {
    pub fn new(
        name: impl Into<String>,
        climate: impl Into<String>,
        terrain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            climate: climate.into(),
            terrain: terrain.into(),
        }
    }
}

/// Generate a new opaque planet identifier
pub fn generate_id() -> PlanetId {
    Uuid::new_v4().simple().to_string()
}

/// Whether `id` is shaped like an identifier this service could have stored
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
