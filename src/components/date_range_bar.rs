//! Date Range Bar Component
//!
//! First day and number of days shown on the board.

use leptos::prelude::*;
use shootboard_core::models::settings::{format_date, parse_start_date, MAX_NUM_DAYS};

use crate::context::use_board;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DateRangeBar() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();

    let on_start_change = move |ev: web_sys::Event| {
        match parse_start_date(&event_target_value(&ev)) {
            Some(date) => ctx.board().set_start_date(date),
            None => web_sys::console::warn_1(&"[RANGE] Ignoring invalid start date".into()),
        }
    };

    let on_days_change = move |ev: web_sys::Event| {
        if let Ok(n) = event_target_value(&ev).trim().parse::<u32>() {
            ctx.board().set_num_days(n);
        }
    };

    view! {
        <div class="date-range-bar">
            <label>
                "Start "
                <input
                    type="date"
                    prop:value=move || format_date(store.start_date().get())
                    on:change=on_start_change
                />
            </label>
            <label>
                "Days "
                <input
                    type="number"
                    min="1"
                    max=MAX_NUM_DAYS.to_string()
                    prop:value=move || store.num_days().get().to_string()
                    on:change=on_days_change
                />
            </label>
        </div>
    }
}
