//! Core Entity Trait

use shootboard_core::models::{Card, Expense, Need, ScoutingMedia, Todo};

/// A stored record with a client-assigned string id
pub trait Entity: Sized + Send + Sync + Clone {
    /// Table holding this entity
    const TABLE: &'static str;

    fn id(&self) -> &str;
}

impl Entity for Card {
    const TABLE: &'static str = "cards";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Need {
    const TABLE: &'static str = "needs";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Todo {
    const TABLE: &'static str = "todos";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Expense {
    const TABLE: &'static str = "budget_expenses";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for ScoutingMedia {
    const TABLE: &'static str = "scouting_photos";

    fn id(&self) -> &str {
        &self.id
    }
}
