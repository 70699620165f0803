//! Persistence Layer
//!
//! The CRUD contract of the external persistence service.
//! Implementations can use HTTP, in-memory, etc.

mod http;
mod memory;

use async_trait::async_trait;

use crate::error::PersistenceResult;
use crate::models::{Card, Expense, Need, ScoutingMedia, Todo};

pub use http::HttpPersistence;
pub use memory::{Call, MemoryPersistence};

/// CRUD operations per entity type.
///
/// One call maps to one statement on the service side. Futures are not
/// `Send`: the client runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait PersistenceService {
    // Cards
    async fn list_cards(&self) -> PersistenceResult<Vec<Card>>;
    async fn create_card(&self, card: &Card) -> PersistenceResult<()>;
    /// Replaces every field of the stored card.
    async fn update_card(&self, id: &str, card: &Card) -> PersistenceResult<()>;
    async fn delete_card(&self, id: &str) -> PersistenceResult<()>;

    // Needs
    async fn list_needs(&self) -> PersistenceResult<Vec<Need>>;
    async fn create_need(&self, need: &Need) -> PersistenceResult<()>;
    async fn delete_need(&self, id: &str) -> PersistenceResult<()>;

    // Todos
    async fn list_todos(&self) -> PersistenceResult<Vec<Todo>>;
    async fn create_todo(&self, todo: &Todo) -> PersistenceResult<()>;
    async fn update_todo(&self, id: &str, todo: &Todo) -> PersistenceResult<()>;
    async fn delete_todo(&self, id: &str) -> PersistenceResult<()>;

    // Settings
    async fn get_setting(&self, key: &str) -> PersistenceResult<Option<String>>;
    /// Upsert.
    async fn set_setting(&self, key: &str, value: &str) -> PersistenceResult<()>;

    // Budget
    async fn list_expenses(&self) -> PersistenceResult<Vec<Expense>>;
    async fn create_expense(&self, expense: &Expense) -> PersistenceResult<()>;
    async fn update_expense(&self, id: &str, expense: &Expense) -> PersistenceResult<()>;
    async fn delete_expense(&self, id: &str) -> PersistenceResult<()>;

    // Scouting
    async fn list_media(&self) -> PersistenceResult<Vec<ScoutingMedia>>;
    async fn create_media(&self, media: &ScoutingMedia) -> PersistenceResult<()>;
    async fn update_media(&self, id: &str, media: &ScoutingMedia) -> PersistenceResult<()>;
    async fn delete_media(&self, id: &str) -> PersistenceResult<()>;
    /// Assigns `displayOrder = index` to each listed id.
    async fn reorder_photos(&self, ordered_ids: &[String]) -> PersistenceResult<()>;
}
