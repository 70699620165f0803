//! Repository Layer
//!
//! SQLite data access behind a single shared connection.

mod card_repo;
mod db;
mod expense_repo;
mod list_repo;
mod scouting_repo;
mod settings_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use card_repo::CardRepository;
pub use db::{init_db, init_memory_db, Db};
pub use expense_repo::ExpenseRepository;
pub use list_repo::{NeedRepository, TodoRepository};
pub use scouting_repo::ScoutingRepository;
pub use settings_repo::SettingsRepository;
pub use traits::{MutableRepository, Repository};
