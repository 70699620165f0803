//! Board View State
//!
//! Leptos reactive_stores mirror of the core board snapshot, for
//! field-level reactivity. Only the core `BoardStore` writes it.

use chrono::NaiveDate;
use leptos::prelude::*;
use reactive_stores::Store;
use shootboard_core::{BoardSnapshot, DayColumn, Need, Todo};

/// What the dashboard renders
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// One entry per day in range, cards in store order
    pub columns: Vec<DayColumn>,
    pub needs: Vec<Need>,
    pub todos: Vec<Todo>,
    pub start_date: NaiveDate,
    pub num_days: u32,
    /// Initial load finished
    pub loaded: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::from_snapshot(&BoardSnapshot::default())
    }

    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            columns: snapshot.columns(),
            needs: snapshot.needs.clone(),
            todos: snapshot.todos.clone(),
            start_date: snapshot.start_date,
            num_days: snapshot.num_days,
            loaded: snapshot.loaded,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Copy a core snapshot into the view store.
///
/// Only fields that differ are written, so an input bound to an unchanged
/// field is left alone while the user edits it. Returns `false` once the
/// store has been disposed (the dashboard was unmounted).
pub fn store_apply_snapshot(store: &AppStore, snapshot: &BoardSnapshot) -> bool {
    if store.is_disposed() {
        return false;
    }
    let next = AppState::from_snapshot(snapshot);
    if store.columns().with_untracked(|cur| *cur != next.columns) {
        *store.columns().write() = next.columns;
    }
    if store.needs().with_untracked(|cur| *cur != next.needs) {
        *store.needs().write() = next.needs;
    }
    if store.todos().with_untracked(|cur| *cur != next.todos) {
        *store.todos().write() = next.todos;
    }
    if store.start_date().get_untracked() != next.start_date {
        *store.start_date().write() = next.start_date;
    }
    if store.num_days().get_untracked() != next.num_days {
        *store.num_days().write() = next.num_days;
    }
    if store.loaded().get_untracked() != next.loaded {
        *store.loaded().write() = next.loaded;
    }
    true
}

/// Mirror of a whole core snapshot (budget ledger, scouting gallery).
pub fn signal_apply_snapshot<T>(signal: RwSignal<T>, next: &T) -> bool
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    if signal.is_disposed() {
        return false;
    }
    if signal.with_untracked(|cur| cur != next) {
        signal.set(next.clone());
    }
    true
}
