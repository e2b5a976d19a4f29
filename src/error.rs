//! Error types for planets-api

use std::fmt;

use thiserror::Error;

use crate::catalog::CatalogError;

pub type Result<T> = std::result::Result<T, Error>;

/// Lookup key used when a planet cannot be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanetKey {
    Id(String),
    Name(String),
}

impl fmt::Display for PlanetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanetKey::Id(id) => write!(f, "id-{}", id),
            PlanetKey::Name(name) => write!(f, "name-{}", name),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Planet not found: {0}")]
    PlanetNotFound(PlanetKey),

    #[error("Planet already exists: {0}")]
    PlanetAlreadyExists(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found_id(id: impl Into<String>) -> Self {
        Error::PlanetNotFound(PlanetKey::Id(id.into()))
    }

    pub fn not_found_name(name: impl Into<String>) -> Self {
        Error::PlanetNotFound(PlanetKey::Name(name.into()))
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}
