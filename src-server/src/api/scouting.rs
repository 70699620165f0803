//! Scouting media routes
//!
//! Payloads carry the media inline as base64, hence the raised body limit
//! on the router.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use shootboard_core::models::ScoutingMedia;
use tracing::info;

use super::Ack;
use crate::domain::DomainResult;
use crate::repository::{MutableRepository, Repository};
use crate::AppState;

pub async fn list_media(State(state): State<AppState>) -> DomainResult<Json<Vec<ScoutingMedia>>> {
    Ok(Json(state.scouting.list().await?))
}

pub async fn create_media(
    State(state): State<AppState>,
    Json(media): Json<ScoutingMedia>,
) -> DomainResult<Json<Ack>> {
    state.scouting.create(&media).await?;
    info!(
        id = %media.id,
        media_type = media.media_type.as_str(),
        category = %media.category,
        bytes = media.image_data.len(),
        "scouting media uploaded"
    );
    Ok(Ack::ok())
}

pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(media): Json<ScoutingMedia>,
) -> DomainResult<Json<Ack>> {
    state.scouting.update(&id, &media).await?;
    Ok(Ack::ok())
}

pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DomainResult<Json<Ack>> {
    state.scouting.delete(&id).await?;
    Ok(Ack::ok())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub photo_ids: Vec<String>,
}

pub async fn reorder_media(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> DomainResult<Json<Ack>> {
    state.scouting.reorder(&request.photo_ids).await?;
    Ok(Ack::ok())
}
