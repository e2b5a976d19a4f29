//! Film catalog client
//!
//! Looks up how many films a planet appears in by searching the public
//! SWAPI planets catalog. One request is issued per lookup; there is no
//! retry and no caching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Default SWAPI planets endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://swapi.dev/api/planets/";

/// Reasons a catalog lookup produced no usable count
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request to film catalog failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("film catalog returned status {0}")]
    Status(StatusCode),

    #[error("film catalog returned an unparseable payload")]
    MalformedPayload,

    #[error("no catalog entry with films found for '{0}'")]
    NoMatch(String),
}

/// Source of film-appearance counts for planets
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    /// Number of films the named planet appears in
    async fn count_films(&self, planet_name: &str) -> Result<u32, CatalogError>;
}

/// Catalog client configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("planets-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for the SWAPI planets search endpoint
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }
}

#[async_trait]
impl FilmCatalog for SwapiClient {
    async fn count_films(&self, planet_name: &str) -> Result<u32, CatalogError> {
        let term = search_term(planet_name);
        tracing::debug!(%term, "Querying film catalog");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("format", "json"), ("search", term.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;
        let count = count_films_in_body(&body, &term)?;
        tracing::debug!(%term, films = count, "Film catalog lookup succeeded");

        Ok(count)
    }
}

/// Search term sent to the catalog: the first word of the name, lower-cased
pub fn search_term(planet_name: &str) -> String {
    planet_name
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Scan a newline-delimited JSON body for the first result carrying `films`.
///
/// Lines that are not JSON and results without a `films` array are skipped.
pub fn count_films_in_body(body: &str, term: &str) -> Result<u32, CatalogError> {
    let mut parsed_any = false;

    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let page: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unparseable catalog line");
                continue;
            }
        };
        parsed_any = true;

        let Some(results) = page.get("results").and_then(Value::as_array) else {
            tracing::debug!("Catalog line has no results array");
            continue;
        };

        for result in results {
            match result.get("films").and_then(Value::as_array) {
                Some(films) => return Ok(films.len() as u32),
                None => tracing::debug!("Skipping catalog result without films"),
            }
        }
    }

    if parsed_any {
        Err(CatalogError::NoMatch(term.to_string()))
    } else {
        Err(CatalogError::MalformedPayload)
    }
}
