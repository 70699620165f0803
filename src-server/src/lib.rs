//! Persistence service for the shoot planning dashboard
//!
//! A thin REST layer over SQLite. Each route maps to one repository call;
//! the clients own all board logic.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod domain;
pub mod repository;

use repository::{
    CardRepository, Db, ExpenseRepository, NeedRepository, ScoutingRepository,
    SettingsRepository, TodoRepository,
};

/// Request bodies carry base64 media
pub const MAX_BODY_BYTES: usize = 500 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<CardRepository>,
    pub needs: Arc<NeedRepository>,
    pub todos: Arc<TodoRepository>,
    pub expenses: Arc<ExpenseRepository>,
    pub scouting: Arc<ScoutingRepository>,
    pub settings: Arc<SettingsRepository>,
    /// Shared login password
    pub password: Arc<String>,
}

impl AppState {
    pub fn new(db: Db, password: impl Into<String>) -> Self {
        Self {
            cards: Arc::new(CardRepository::new(db.clone())),
            needs: Arc::new(NeedRepository::new(db.clone())),
            todos: Arc::new(TodoRepository::new(db.clone())),
            expenses: Arc::new(ExpenseRepository::new(db.clone())),
            scouting: Arc::new(ScoutingRepository::new(db.clone())),
            settings: Arc::new(SettingsRepository::new(db)),
            password: Arc::new(password.into()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use crate::api::{auth, board, budget, scouting};

    let routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/cards", get(board::list_cards).post(board::create_card))
        .route(
            "/api/cards/:id",
            put(board::update_card).delete(board::delete_card),
        )
        .route("/api/needs", get(board::list_needs).post(board::create_need))
        .route("/api/needs/:id", delete(board::delete_need))
        .route("/api/todos", get(board::list_todos).post(board::create_todo))
        .route(
            "/api/todos/:id",
            put(board::update_todo).delete(board::delete_todo),
        )
        .route(
            "/api/settings/:key",
            get(board::get_setting).post(board::set_setting),
        )
        .route(
            "/api/budget/expenses",
            get(budget::list_expenses).post(budget::create_expense),
        )
        .route(
            "/api/budget/expenses/:id",
            put(budget::update_expense).delete(budget::delete_expense),
        )
        .route(
            "/api/scouting/photos",
            get(scouting::list_media).post(scouting::create_media),
        )
        .route("/api/scouting/photos/reorder", post(scouting::reorder_media))
        .route(
            "/api/scouting/photos/:id",
            put(scouting::update_media).delete(scouting::delete_media),
        );

    Router::new()
        .merge(routes)
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
