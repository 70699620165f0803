//! Budget expense routes

use axum::extract::{Path, State};
use axum::Json;
use shootboard_core::models::Expense;
use tracing::info;

use super::Ack;
use crate::domain::DomainResult;
use crate::repository::{MutableRepository, Repository};
use crate::AppState;

pub async fn list_expenses(State(state): State<AppState>) -> DomainResult<Json<Vec<Expense>>> {
    Ok(Json(state.expenses.list().await?))
}

/// Negative amounts answer 400
pub async fn create_expense(
    State(state): State<AppState>,
    Json(expense): Json<Expense>,
) -> DomainResult<Json<Ack>> {
    state.expenses.create(&expense).await?;
    info!(id = %expense.id, amount = expense.amount, category = expense.category.as_str(), "expense recorded");
    Ok(Ack::ok())
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(expense): Json<Expense>,
) -> DomainResult<Json<Ack>> {
    state.expenses.update(&id, &expense).await?;
    Ok(Ack::ok())
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DomainResult<Json<Ack>> {
    state.expenses.delete(&id).await?;
    Ok(Ack::ok())
}
