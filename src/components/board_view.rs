//! Board View Component
//!
//! Day columns side by side. Owns the drag-and-drop surface: gestures are
//! tracked by leptos-dragdrop and resolved by the core drag controller.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_handlers, create_dnd_signals, DndHandlers, DropTarget};
use shootboard_core::DropOutcome;

use crate::components::DayColumnView;
use crate::context::use_board;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();
    let dnd = create_dnd_signals();
    provide_context(dnd);

    bind_global_handlers(
        dnd,
        DndHandlers {
            on_start: move |card_id: String| {
                ctx.drag().start(&card_id);
            },
            on_drop: move |card_id: String, target: Option<DropTarget>| {
                let over = target.as_ref().map(DropTarget::over_id);
                let outcome = ctx.drag().drop_on(over, &ctx.board());
                if let DropOutcome::Moved { from, to, .. } = &outcome {
                    web_sys::console::log_1(
                        &format!("[DND] {} moved {} -> {}", card_id, from, to).into(),
                    );
                }
            },
            on_cancel: move || ctx.drag().cancel(),
        },
    );

    let days = Memo::new(move |_| {
        store
            .columns()
            .with(|cols| cols.iter().map(|c| c.date).collect::<Vec<_>>())
    });

    view! {
        <div class="board">
            <Show when=move || !store.loaded().get()>
                <p class="board-loading">"Loading..."</p>
            </Show>
            <For
                each=move || days.get()
                key=|date| *date
                children=move |date| view! { <DayColumnView date=date /> }
            />
        </div>
    }
}
