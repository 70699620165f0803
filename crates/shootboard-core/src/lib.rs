//! Shootboard Core
//!
//! Client-side state for the shoot planning dashboard:
//! - models: cards, needs, todos, expenses, scouting media, settings keys
//! - persistence: the CRUD contract plus HTTP and in-memory implementations
//! - board: the board state store and the drag-reorder controller
//! - budget / scouting: ledger and gallery stores built on the same pattern
//! - poll: the periodic full-refresh loop
//!
//! Everything here is single-threaded: state lives in `RefCell`s, remote
//! writes are handed to an injected local spawner and never awaited by the
//! caller, and the next poll is the only reconciliation step.

pub mod board;
pub mod budget;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod persistence;
pub mod poll;
pub mod scouting;
pub mod sync;

pub use board::{
    drop_zone_id, BoardSnapshot, BoardStore, DayColumn, DragController, DragState, DropOutcome,
};
pub use budget::{BudgetLedger, BudgetSnapshot};
pub use config::BoardConfig;
pub use error::{PersistenceError, PersistenceResult, ValidationError};
pub use models::{
    Card, CardCategory, Expense, ExpenseCategory, MediaType, Need, NewExpense, NewMedia,
    ScoutingMedia, Todo,
};
pub use persistence::{Call, HttpPersistence, MemoryPersistence, PersistenceService};
pub use poll::{refresh_all, run_polling, PollHandle, Refresh};
pub use scouting::{GallerySnapshot, ScoutingGallery};
pub use sync::{Spawner, Task, TaskQueue};
