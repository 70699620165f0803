//! Application Context
//!
//! The core stores and drag controller, provided via Leptos Context API.
//! They hold `Rc`s, so they live in local (non-`Send`) stored values.
//! The budget and gallery snapshots are mirrored into plain signals.

use std::rc::Rc;

use leptos::prelude::*;
use shootboard_core::{
    BoardStore, BudgetLedger, BudgetSnapshot, DragController, GallerySnapshot, HttpPersistence,
    ScoutingGallery,
};

pub type Board = BoardStore<HttpPersistence>;
pub type Ledger = BudgetLedger<HttpPersistence>;
pub type Gallery = ScoutingGallery<HttpPersistence>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    board: StoredValue<Rc<Board>, LocalStorage>,
    drag: StoredValue<Rc<DragController>, LocalStorage>,
    ledger: StoredValue<Rc<Ledger>, LocalStorage>,
    gallery: StoredValue<Rc<Gallery>, LocalStorage>,
    /// Latest ledger snapshot, written only when it changes
    pub budget: RwSignal<BudgetSnapshot>,
    /// Latest gallery snapshot, written only when it changes
    pub scouting: RwSignal<GallerySnapshot>,
}

impl BoardContext {
    pub fn new(board: Rc<Board>, ledger: Rc<Ledger>, gallery: Rc<Gallery>) -> Self {
        Self {
            board: StoredValue::new_local(board),
            drag: StoredValue::new_local(Rc::new(DragController::new())),
            budget: RwSignal::new(ledger.snapshot()),
            scouting: RwSignal::new(gallery.snapshot()),
            ledger: StoredValue::new_local(ledger),
            gallery: StoredValue::new_local(gallery),
        }
    }

    /// The store every mutation goes through
    pub fn board(&self) -> Rc<Board> {
        self.board.get_value()
    }

    pub fn drag(&self) -> Rc<DragController> {
        self.drag.get_value()
    }

    pub fn ledger(&self) -> Rc<Ledger> {
        self.ledger.get_value()
    }

    pub fn gallery(&self) -> Rc<Gallery> {
        self.gallery.get_value()
    }
}

pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}
