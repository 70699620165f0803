//! HTTP API handlers

pub mod auth;
pub mod board;
pub mod budget;
pub mod health;
pub mod scouting;

use axum::http::Uri;
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

pub use health::health_routes;

/// Body of every successful mutation
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Json<Ack> {
        Json(Ack { success: true })
    }
}

/// Unmatched paths answer with the JSON error body
pub async fn not_found(uri: Uri) -> DomainError {
    DomainError::NotFound(uri.path().to_string())
}
