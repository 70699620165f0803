//! Delete Confirm Button Component
//!
//! Two-step delete used by cards, needs and todos.

use leptos::prelude::*;

/// A × button that asks `prompt` before running `on_confirm`.
///
/// Clicks are stopped here so a card underneath does not open its editor.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into, default = "Delete?".to_string())] prompt: String,
) -> impl IntoView {
    let armed = RwSignal::new(false);

    let arm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        armed.set(true);
    };
    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        armed.set(false);
        on_confirm.run(());
    };
    let disarm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        armed.set(false);
    };

    view! {
        <Show
            when=move || armed.get()
            fallback=move || view! {
                <button class=button_class.clone() title="Delete" on:click=arm>"×"</button>
            }
        >
            <span class="delete-confirm" on:mousedown=|ev| ev.stop_propagation()>
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button class="confirm-btn" on:click=confirm>"✓"</button>
                <button class="cancel-btn" on:click=disarm>"✗"</button>
            </span>
        </Show>
    }
}
