//! planets-api - Star Wars planet records over HTTP
//!
//! The service keeps planets as JSON documents in object storage and provides:
//! - A small REST API under `/apistarwars/planets`
//! - Local filesystem or S3 storage backends
//! - Film-appearance enrichment from the public SWAPI catalog at creation time

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod repository;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
