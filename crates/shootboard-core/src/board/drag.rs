//! Drag-Reorder Controller
//!
//! Drop targets are either a card id or a day-column zone id of the form
//! `droppable-YYYY-MM-DD`. The zone shape is checked before any card lookup,
//! so a card can never shadow a day column.

use std::cell::RefCell;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::store::BoardStore;
use crate::models::settings::{format_date, parse_start_date};
use crate::models::Card;
use crate::persistence::PersistenceService;

pub const DROP_ZONE_PREFIX: &str = "droppable-";

/// Drop zone id of the day column for `date`.
pub fn drop_zone_id(date: NaiveDate) -> String {
    format!("{}{}", DROP_ZONE_PREFIX, format_date(date))
}

/// Date of a well-formed zone id.
pub fn drop_zone_date(id: &str) -> Option<NaiveDate> {
    id.strip_prefix(DROP_ZONE_PREFIX).and_then(parse_start_date)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { active_id: String },
}

/// What a finished drag resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released outside any target.
    NoTarget,
    /// Released on its own day or on itself.
    Unchanged,
    /// The dragged card is no longer in the store.
    UnknownCard,
    /// Target id is neither a known card nor a valid day zone.
    UnknownTarget(String),
    /// A drop arrived with no drag in progress.
    NotDragging,
    Moved {
        card_id: String,
        from: NaiveDate,
        to: NaiveDate,
    },
}

impl DropOutcome {
    pub fn is_move(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }
}

/// Resolve a drop of `active` onto `over` against the current cards.
///
/// Pure: nothing is mutated. Only [`DropOutcome::Moved`] implies a commit.
pub fn resolve(active: &str, over: Option<&str>, cards: &[Card]) -> DropOutcome {
    let Some(over) = over else {
        return DropOutcome::NoTarget;
    };
    let Some(card) = cards.iter().find(|c| c.id == active) else {
        return DropOutcome::UnknownCard;
    };

    let target_date = if let Some(raw) = over.strip_prefix(DROP_ZONE_PREFIX) {
        match parse_start_date(raw) {
            Some(date) => date,
            None => return DropOutcome::UnknownTarget(over.to_string()),
        }
    } else if over == active {
        return DropOutcome::Unchanged;
    } else {
        match cards.iter().find(|c| c.id == over) {
            Some(target) => target.date,
            None => return DropOutcome::UnknownTarget(over.to_string()),
        }
    };

    if target_date == card.date {
        DropOutcome::Unchanged
    } else {
        DropOutcome::Moved {
            card_id: card.id.clone(),
            from: card.date,
            to: target_date,
        }
    }
}

/// Tracks the gesture in progress and commits drops through the store.
#[derive(Debug, Default)]
pub struct DragController {
    state: RefCell<DragState>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state.borrow().clone()
    }

    pub fn active_id(&self) -> Option<String> {
        match &*self.state.borrow() {
            DragState::Dragging { active_id } => Some(active_id.clone()),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(*self.state.borrow(), DragState::Dragging { .. })
    }

    /// Begin dragging `card_id`. Refused while another drag is in progress.
    pub fn start(&self, card_id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if let DragState::Dragging { active_id } = &*state {
            warn!(active = %active_id, requested = card_id, "drag already in progress");
            return false;
        }
        debug!(card_id, "drag started");
        *state = DragState::Dragging {
            active_id: card_id.to_string(),
        };
        true
    }

    /// Abandon the gesture. Nothing is committed.
    pub fn cancel(&self) {
        if self.state.replace(DragState::Idle) != DragState::Idle {
            debug!("drag cancelled");
        }
    }

    /// Finish the gesture over `over` and commit a cross-day move if any.
    ///
    /// Always returns the controller to idle.
    pub fn drop_on<P: PersistenceService + 'static>(
        &self,
        over: Option<&str>,
        store: &BoardStore<P>,
    ) -> DropOutcome {
        let active_id = match self.state.replace(DragState::Idle) {
            DragState::Dragging { active_id } => active_id,
            DragState::Idle => return DropOutcome::NotDragging,
        };

        let outcome = resolve(&active_id, over, &store.snapshot().cards);
        match &outcome {
            DropOutcome::Moved { card_id, from, to } => {
                info!(card_id = %card_id, %from, %to, "drop reassigns card");
                store.move_card(card_id, *to);
            }
            DropOutcome::UnknownTarget(target) => {
                warn!(active = %active_id, target = %target, "drop on unknown target ignored");
            }
            other => debug!(active = %active_id, outcome = ?other, "drop without change"),
        }
        outcome
    }
}
