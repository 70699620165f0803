//! Login Form Component
//!
//! Shared-password gate in front of the dashboard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shootboard_core::{BoardConfig, HttpPersistence};

#[component]
pub fn LoginForm(config: BoardConfig, #[prop(into)] on_success: Callback<()>) -> impl IntoView {
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (checking, set_checking) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if checking.get_untracked() {
            return;
        }
        let attempt = password.get_untracked();
        let service = HttpPersistence::from_config(&config);
        set_checking.set(true);
        set_error.set(None);

        spawn_local(async move {
            match service.login(&attempt).await {
                Ok(true) => on_success.run(()),
                Ok(false) => {
                    set_password.set(String::new());
                    set_error.set(Some("Wrong password".to_string()));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[LOGIN] {}", e).into());
                    set_error.set(Some("Connection error".to_string()));
                }
            }
            set_checking.set(false);
        });
    };

    view! {
        <div class="login-screen">
            <form class="login-form" on:submit=on_submit>
                <h1>"Shootboard"</h1>
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <p class="login-error">{msg}</p> })}
                <button type="submit" disabled=move || checking.get()>
                    {move || if checking.get() { "Checking..." } else { "Enter" }}
                </button>
            </form>
        </div>
    }
}
