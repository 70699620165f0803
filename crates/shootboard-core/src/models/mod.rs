//! Data Models
//!
//! Wire-compatible records exchanged with the persistence service.
//! Field names are camelCase on the wire.

mod budget;
mod card;
mod fields;
mod lists;
mod scouting;
pub mod settings;

pub use budget::{validate_amount, Expense, ExpenseCategory, NewExpense};
pub use card::{Card, CardCategory, NEW_CARD_TITLE};
pub use lists::{Need, Todo};
pub use scouting::{MediaType, NewMedia, ScoutingMedia, DEFAULT_SCOUTING_CATEGORY};
