//! Board routes: cards, needs, todos and settings.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shootboard_core::models::{Card, Need, Todo};
use tracing::{debug, info};

use super::Ack;
use crate::domain::DomainResult;
use crate::repository::{MutableRepository, Repository};
use crate::AppState;

pub async fn list_cards(State(state): State<AppState>) -> DomainResult<Json<Vec<Card>>> {
    Ok(Json(state.cards.list().await?))
}

pub async fn create_card(
    State(state): State<AppState>,
    Json(card): Json<Card>,
) -> DomainResult<Json<Ack>> {
    state.cards.create(&card).await?;
    info!(id = %card.id, date = %card.date, "card created");
    Ok(Ack::ok())
}

/// Replaces every field; the id comes from the path
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(card): Json<Card>,
) -> DomainResult<Json<Ack>> {
    state.cards.update(&id, &card).await?;
    debug!(%id, date = %card.date, "card updated");
    Ok(Ack::ok())
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DomainResult<Json<Ack>> {
    state.cards.delete(&id).await?;
    info!(%id, "card deleted");
    Ok(Ack::ok())
}

pub async fn list_needs(State(state): State<AppState>) -> DomainResult<Json<Vec<Need>>> {
    Ok(Json(state.needs.list().await?))
}

pub async fn create_need(
    State(state): State<AppState>,
    Json(need): Json<Need>,
) -> DomainResult<Json<Ack>> {
    state.needs.create(&need).await?;
    Ok(Ack::ok())
}

pub async fn delete_need(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DomainResult<Json<Ack>> {
    state.needs.delete(&id).await?;
    Ok(Ack::ok())
}

pub async fn list_todos(State(state): State<AppState>) -> DomainResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list().await?))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(todo): Json<Todo>,
) -> DomainResult<Json<Ack>> {
    state.todos.create(&todo).await?;
    Ok(Ack::ok())
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(todo): Json<Todo>,
) -> DomainResult<Json<Ack>> {
    state.todos.update(&id, &todo).await?;
    Ok(Ack::ok())
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DomainResult<Json<Ack>> {
    state.todos.delete(&id).await?;
    Ok(Ack::ok())
}

#[derive(Debug, Serialize)]
pub struct SettingValue {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingUpdate {
    pub value: String,
}

/// Unknown keys answer `{"value": null}`
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> DomainResult<Json<SettingValue>> {
    let value = state.settings.get(&key).await?;
    Ok(Json(SettingValue { value }))
}

pub async fn set_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(update): Json<SettingUpdate>,
) -> DomainResult<Json<Ack>> {
    state.settings.set(&key, &update.value).await?;
    info!(%key, value = %update.value, "setting saved");
    Ok(Ack::ok())
}
