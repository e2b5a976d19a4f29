//! API server state

use std::sync::Arc;

use crate::catalog::FilmCatalog;
use crate::repository::PlanetRepository;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Planet store gateway
    pub repository: Arc<dyn PlanetRepository>,

    /// Film-appearance lookup used when creating planets
    pub catalog: Arc<dyn FilmCatalog>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PlanetRepository>, catalog: Arc<dyn FilmCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }
}
