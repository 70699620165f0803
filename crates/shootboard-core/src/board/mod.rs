//! Planning Board
//!
//! - store: cards, needs, todos and the day range, with optimistic mutations
//! - drag: turns a finished drag gesture into at most one card move

mod drag;
mod store;

#[cfg(test)]
mod tests;

pub use drag::{
    drop_zone_date, drop_zone_id, resolve, DragController, DragState, DropOutcome, DROP_ZONE_PREFIX,
};
pub use store::{BoardSnapshot, BoardStore, DayColumn};
