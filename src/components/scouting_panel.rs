//! Scouting Panel Component
//!
//! Location photos and clips grouped by category, with upload, delete and
//! manual ordering.

use leptos::prelude::*;
use shootboard_core::models::DEFAULT_SCOUTING_CATEGORY;
use shootboard_core::{MediaType, NewMedia, ScoutingMedia};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::DeleteConfirmButton;
use crate::context::use_board;

/// Read `file` as a data URL and pass it to `on_load`.
fn read_as_data_url(file: &web_sys::File, on_load: impl FnOnce(String) + 'static) -> Result<(), JsValue> {
    let reader = web_sys::FileReader::new()?;
    let done = reader.clone();
    let onload = Closure::once_into_js(move || match done.result().ok().and_then(|r| r.as_string()) {
        Some(url) => on_load(url),
        None => web_sys::console::warn_1(&"[SCOUTING] File could not be read".into()),
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    reader.read_as_data_url(file)
}

#[component]
pub fn ScoutingPanel() -> impl IntoView {
    let ctx = use_board();
    let gallery = ctx.scouting;

    view! {
        <section class="scouting-panel">
            <UploadForm />
            {move || {
                gallery
                    .with(|g| g.by_category())
                    .into_iter()
                    .map(|(category, items)| view! { <CategoryGroup category=category items=items /> })
                    .collect_view()
            }}
        </section>
    }
}

#[component]
fn CategoryGroup(category: String, items: Vec<ScoutingMedia>) -> impl IntoView {
    let ids: Vec<String> = items.iter().map(|m| m.id.clone()).collect();
    let count = items.len();

    view! {
        <div class="scouting-group">
            <h2>{category} " " <span class="count">{count}</span></h2>
            <div class="scouting-grid">
                {items
                    .into_iter()
                    .enumerate()
                    .map(|(index, media)| {
                        let previous = index.checked_sub(1).and_then(|i| ids.get(i).cloned());
                        let next = ids.get(index + 1).cloned();
                        view! { <MediaTile media=media previous=previous next=next /> }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// One photo or clip. `previous` / `next` are its neighbours in the group.
#[component]
fn MediaTile(media: ScoutingMedia, previous: Option<String>, next: Option<String>) -> impl IntoView {
    let ctx = use_board();

    let at_top = previous.is_none();
    let at_bottom = next.is_none();
    let up_id = media.id.clone();
    let on_up = move |_: web_sys::MouseEvent| {
        if let Some(before) = &previous {
            ctx.gallery().move_media(&up_id, Some(before.as_str()));
        }
    };
    // Moving down is moving the next item in front of this one
    let down_id = media.id.clone();
    let on_down = move |_: web_sys::MouseEvent| {
        if let Some(after) = &next {
            ctx.gallery().move_media(after, Some(down_id.as_str()));
        }
    };
    let delete_id = media.id.clone();
    let on_delete = Callback::new(move |_: ()| ctx.gallery().delete_media(&delete_id));

    let preview = match media.media_type {
        MediaType::Video => view! { <video src=media.image_data.clone() controls=true></video> }.into_any(),
        MediaType::Image => view! { <img src=media.image_data.clone() alt=media.location.clone().unwrap_or_default() /> }.into_any(),
    };

    view! {
        <figure class="media-tile">
            {preview}
            <figcaption>
                {media.scene_number.map(|scene| view! { <span class="scene">"Scene " {scene}</span> })}
                {media.location.map(|location| view! { <span class="location">{location}</span> })}
                {media.description.map(|text| view! { <p class="description">{text}</p> })}
            </figcaption>
            <div class="tile-actions">
                <button disabled=at_top on:click=on_up>"↑"</button>
                <button disabled=at_bottom on:click=on_down>"↓"</button>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
        </figure>
    }
}

/// File picker plus category and caption fields.
#[component]
fn UploadForm() -> impl IntoView {
    let ctx = use_board();
    let gallery = ctx.scouting;

    let (category, set_category) = signal(String::new());
    let (location, set_location) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let optional = |text: String| Some(text.trim().to_string()).filter(|t| !t.is_empty());

    let on_file = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let media_type = if file.type_().starts_with("video/") {
            MediaType::Video
        } else {
            MediaType::Image
        };
        let template = NewMedia {
            image_data: String::new(),
            location: optional(location.get_untracked()),
            description: optional(description.get_untracked()),
            scene_number: None,
            category: optional(category.get_untracked()),
            media_type,
        };
        let loaded = read_as_data_url(&file, move |image_data| {
            ctx.gallery().add_media(NewMedia { image_data, ..template });
        });
        if let Err(err) = loaded {
            web_sys::console::warn_1(&format!("[SCOUTING] Upload failed: {:?}", err).into());
        }
        input.set_value("");
        set_location.set(String::new());
        set_description.set(String::new());
    };

    view! {
        <form class="upload-form" on:submit=|ev: web_sys::SubmitEvent| ev.prevent_default()>
            <input
                type="text"
                placeholder=DEFAULT_SCOUTING_CATEGORY
                list="scouting-categories"
                prop:value=move || category.get()
                on:input=move |ev| set_category.set(event_target_value(&ev))
            />
            <datalist id="scouting-categories">
                {move || gallery.with(|g| g.categories()).into_iter().map(|c| view! { <option value=c /> }).collect_view()}
            </datalist>
            <input
                type="text"
                placeholder="Location"
                prop:value=move || location.get()
                on:input=move |ev| set_location.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <input type="file" accept="image/*,video/*" on:change=on_file />
        </form>
    }
}
