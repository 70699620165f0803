//! Day Column Component
//!
//! One day of the board; the whole column is a drop zone.

use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_zone_mouseenter, DndSignals, DropTarget};
use shootboard_core::drop_zone_id;

use crate::components::CardView;
use crate::context::use_board;
use crate::store::{use_app_store, AppStateStoreFields};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn column_title(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.format("%a"),
        date.day(),
        MONTHS[date.month0() as usize]
    )
}

#[component]
pub fn DayColumnView(date: NaiveDate) -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();
    let dnd = expect_context::<DndSignals>();
    let zone_id = drop_zone_id(date);
    let zone = DropTarget::Zone(zone_id.clone());

    // Ids only: each card reads its own fields, so edits in progress
    // survive a refresh of the column
    let card_ids = Memo::new(move |_| {
        store.columns().with(|cols| {
            cols.iter()
                .find(|c| c.date == date)
                .map(|c| c.cards.iter().map(|card| card.id.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    let column_class = move || {
        if dnd.is_over(&zone) {
            "day-column drop-over"
        } else {
            "day-column"
        }
    };

    let zone_for_cards = zone_id.clone();

    view! {
        <section
            class=column_class
            id=zone_id.clone()
            on:mouseenter=make_on_zone_mouseenter(dnd, zone_id.clone())
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <header class="day-header">
                <h2>{column_title(date)}</h2>
                <span class="card-count">{move || card_ids.with(Vec::len)}</span>
            </header>
            <For
                each=move || card_ids.get()
                key=|id| id.clone()
                children=move |id| view! { <CardView card_id=id zone_id=zone_for_cards.clone() /> }
            />
            <button class="add-card-btn" on:click=move |_| {
                ctx.board().add_card(date);
            }>
                "+ Add card"
            </button>
        </section>
    }
}
