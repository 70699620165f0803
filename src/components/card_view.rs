//! Card View Component
//!
//! A draggable card. Click opens an inline editor; the edit is committed
//! through the board store as a full-card update.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_item_mouseenter, make_on_mousedown, make_on_zone_mouseenter, DndSignals};
use shootboard_core::{Card, CardCategory};

use crate::components::DeleteConfirmButton;
use crate::context::use_board;
use crate::store::{use_app_store, AppStateStoreFields};

/// Descriptions longer than this are folded
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

fn category_label(category: CardCategory) -> &'static str {
    match category {
        CardCategory::Shooting => "Shooting",
        CardCategory::Catering => "Catering",
        CardCategory::Travel => "Travel",
        CardCategory::Meeting => "Meeting",
        CardCategory::Red => "Red",
        CardCategory::Orange => "Orange",
        CardCategory::Pink => "Pink",
        CardCategory::Indigo => "Indigo",
        CardCategory::Teal => "Teal",
        CardCategory::Other => "Other",
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn preview(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        description.to_string()
    } else {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

/// Form fields while editing
#[derive(Clone, Copy)]
struct Draft {
    title: RwSignal<String>,
    description: RwSignal<String>,
    time: RwSignal<String>,
    map_url: RwSignal<String>,
    category: RwSignal<String>,
}

impl Draft {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            time: RwSignal::new(String::new()),
            map_url: RwSignal::new(String::new()),
            category: RwSignal::new(CardCategory::Other.as_str().to_string()),
        }
    }

    fn fill(&self, card: &Card) {
        self.title.set(card.title.clone());
        self.description.set(card.description.clone());
        self.time.set(card.time.clone().unwrap_or_default());
        self.map_url.set(card.map_url.clone().unwrap_or_default());
        self.category.set(card.category.as_str().to_string());
    }

    /// The edited card; id and date come from `card`.
    fn apply(&self, card: &Card) -> Card {
        Card {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            time: optional(self.time.get_untracked()),
            map_url: optional(self.map_url.get_untracked()),
            category: CardCategory::from_str(&self.category.get_untracked()),
            ..card.clone()
        }
    }
}

#[component]
pub fn CardView(card_id: String, zone_id: String) -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();
    let dnd = expect_context::<DndSignals>();

    let lookup_id = card_id.clone();
    let card = Memo::new(move |_| {
        store.columns().with(|cols| {
            cols.iter()
                .flat_map(|c| c.cards.iter())
                .find(|c| c.id == lookup_id)
                .cloned()
        })
    });

    let (editing, set_editing) = signal(false);
    let (expanded, set_expanded) = signal(false);
    let draft = Draft::new();

    let open_editor = move |_| {
        if dnd.drag_just_ended_read.get_untracked() || editing.get_untracked() {
            return;
        }
        if let Some(current) = card.get_untracked() {
            draft.fill(&current);
            set_editing.set(true);
        }
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(current) = card.get_untracked() {
            ctx.board().edit_card(draft.apply(&current));
        }
        set_editing.set(false);
    };

    let drag_id = card_id.clone();
    let card_class = move || {
        let category = card.with(|c| c.as_ref().map(|c| c.category).unwrap_or_default());
        let dragging = if dnd.is_dragging(&drag_id) { " dragging" } else { "" };
        format!("card card-{}{}", category.as_str(), dragging)
    };

    let delete_id = card_id.clone();
    let on_delete = Callback::new(move |_: ()| ctx.board().delete_card(&delete_id));

    view! {
        <article
            class=card_class
            on:mousedown=make_on_mousedown(dnd, card_id.clone())
            on:mouseenter=make_on_item_mouseenter(dnd, card_id.clone())
            on:mouseleave=make_on_zone_mouseenter(dnd, zone_id)
            on:click=open_editor
        >
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="card-body">
                        <h3 class="card-title">{move || card.with(|c| c.as_ref().map(|c| c.title.clone()))}</h3>
                        {move || card.with(|c| c.as_ref().map(|c| c.description.clone())).filter(|d| !d.is_empty()).map(|d| {
                            let long = d.chars().count() > DESCRIPTION_PREVIEW_CHARS;
                            let short = preview(&d);
                            view! {
                                <p class="card-description">
                                    {move || if expanded.get() { d.clone() } else { short.clone() }}
                                </p>
                                <Show when=move || long>
                                    <button class="more-btn" on:click=move |ev| {
                                        ev.stop_propagation();
                                        set_expanded.update(|v| *v = !*v);
                                    }>
                                        {move || if expanded.get() { "Less" } else { "More..." }}
                                    </button>
                                </Show>
                            }
                        })}
                        {move || card.with(|c| c.as_ref().and_then(|c| c.time.clone())).map(|time| view! {
                            <span class="card-time">{time}</span>
                        })}
                        {move || card.with(|c| c.as_ref().and_then(|c| c.map_url.clone())).map(|url| view! {
                            <a
                                class="card-map"
                                href=url
                                target="_blank"
                                rel="noopener noreferrer"
                                on:click=|ev| ev.stop_propagation()
                            >
                                "Open location"
                            </a>
                        })}
                        <DeleteConfirmButton button_class="card-delete-btn" prompt="Delete card?" on_confirm=on_delete />
                    </div>
                }
            >
                <form class="card-editor" on:submit=save on:click=|ev| ev.stop_propagation()>
                    <input
                        type="text"
                        placeholder="Title"
                        prop:value=move || draft.title.get()
                        on:input=move |ev| draft.title.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description"
                        prop:value=move || draft.description.get()
                        on:input=move |ev| draft.description.set(event_target_value(&ev))
                    />
                    <input
                        type="time"
                        prop:value=move || draft.time.get()
                        on:input=move |ev| draft.time.set(event_target_value(&ev))
                    />
                    <input
                        type="url"
                        placeholder="Map URL (optional)"
                        prop:value=move || draft.map_url.get()
                        on:input=move |ev| draft.map_url.set(event_target_value(&ev))
                    />
                    <select
                        prop:value=move || draft.category.get()
                        on:change=move |ev| draft.category.set(event_target_value(&ev))
                    >
                        {CardCategory::ALL
                            .into_iter()
                            .map(|category| view! {
                                <option value=category.as_str()>{category_label(category)}</option>
                            })
                            .collect_view()}
                    </select>
                    <div class="card-editor-actions">
                        <button type="submit">"Save"</button>
                        <button type="button" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                    </div>
                </form>
            </Show>
        </article>
    }
}
