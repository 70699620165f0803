//! Needs and Todo Sidebar Components

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_board;
use crate::store::{use_app_store, AppStateStoreFields};

/// Text input plus "Add" button; clears itself after submit.
#[component]
fn AddTextForm(
    #[prop(into)] placeholder: String,
    #[prop(into)] on_add: Callback<String>,
) -> impl IntoView {
    let (text, set_text) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = text.get_untracked();
        if value.trim().is_empty() {
            return;
        }
        on_add.run(value);
        set_text.set(String::new());
    };

    view! {
        <form class="add-text-form" on:submit=on_submit>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}

#[component]
pub fn NeedsList() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();

    let on_add = Callback::new(move |text: String| {
        ctx.board().add_need(&text);
    });

    view! {
        <section class="side-list needs">
            <h2>"Needs"</h2>
            <AddTextForm placeholder="Add a need..." on_add=on_add />
            <ul>
                <For
                    each=move || store.needs().get()
                    key=|need| need.id.clone()
                    children=move |need| {
                        let id = need.id.clone();
                        let on_delete = Callback::new(move |_: ()| ctx.board().delete_need(&id));
                        view! {
                            <li class="need-row">
                                <span>{need.text}</span>
                                <DeleteConfirmButton button_class="delete-btn" prompt="Remove?" on_confirm=on_delete />
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();

    let on_add = Callback::new(move |text: String| {
        ctx.board().add_todo(&text);
    });

    let remaining = move || store.todos().with(|todos| todos.iter().filter(|t| !t.completed).count());

    view! {
        <section class="side-list todos">
            <h2>"To do " <span class="todo-count">{remaining}</span></h2>
            <AddTextForm placeholder="Add a task..." on_add=on_add />
            <ul>
                // Keyed on completion too, so a toggle re-renders the row
                <For
                    each=move || store.todos().get()
                    key=|todo| (todo.id.clone(), todo.completed)
                    children=move |todo| {
                        let toggle_id = todo.id.clone();
                        let delete_id = todo.id.clone();
                        let on_delete = Callback::new(move |_: ()| ctx.board().delete_todo(&delete_id));
                        let row_class = if todo.completed { "todo-row done" } else { "todo-row" };
                        view! {
                            <li class=row_class>
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=todo.completed
                                        on:change=move |_| ctx.board().toggle_todo(&toggle_id)
                                    />
                                    <span>{todo.text}</span>
                                </label>
                                <DeleteConfirmButton button_class="delete-btn" prompt="Remove?" on_confirm=on_delete />
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
