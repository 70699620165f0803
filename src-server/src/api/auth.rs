//! Shared-password login
//!
//! There are no sessions: the client only learns whether the password is
//! right and keeps that answer locally.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/auth/login
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    if request.password == *state.password {
        info!("login accepted");
        Json(LoginResponse {
            success: true,
            error: None,
        })
        .into_response()
    } else {
        warn!("login rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                error: Some("Invalid password".to_string()),
            }),
        )
            .into_response()
    }
}
