//! Shootboard Frontend App
//!
//! Login gate, then the dashboard: date range bar, day columns, and the
//! needs / todo sidebar, plus the budget and scouting pages.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use shootboard_core::{
    run_polling, BoardConfig, BoardStore, BudgetLedger, HttpPersistence, PersistenceService,
    PollHandle, Refresh, ScoutingGallery, Spawner, Task,
};

use crate::components::{
    BoardView, BudgetPanel, DateRangeBar, LoginForm, NeedsList, ScoutingPanel, TodoList,
};
use crate::context::BoardContext;
use crate::store::{signal_apply_snapshot, store_apply_snapshot, AppState, AppStore};

const AUTH_KEY: &str = "shootboard-auth";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

fn remembered_login() -> bool {
    local_storage()
        .and_then(|storage| storage.get_item(AUTH_KEY).ok().flatten())
        .is_some_and(|v| v == "true")
}

fn remember_login(on: bool) {
    if let Some(storage) = local_storage() {
        let saved = if on {
            storage.set_item(AUTH_KEY, "true")
        } else {
            storage.remove_item(AUTH_KEY)
        };
        if let Some(msg) = storage_warning(saved) {
            web_sys::console::warn_1(&msg.into());
        }
    }
}

/// Console message for a failed login-flag write (quota, private mode).
fn storage_warning<E: std::fmt::Debug>(result: Result<(), E>) -> Option<String> {
    result
        .err()
        .map(|err| format!("[AUTH] Could not store login flag: {:?}", err))
}

/// Everything the dashboard refreshes on each poll tick.
fn poll_targets<P: PersistenceService + 'static>(
    board: Rc<BoardStore<P>>,
    ledger: Rc<BudgetLedger<P>>,
    gallery: Rc<ScoutingGallery<P>>,
) -> Vec<Rc<dyn Refresh>> {
    vec![
        board as Rc<dyn Refresh>,
        ledger as Rc<dyn Refresh>,
        gallery as Rc<dyn Refresh>,
    ]
}

/// REST service origin. `SHOOTBOARD_API_URL` at build time wins; otherwise
/// requests go to the page's own origin (the backend, or the dev-server
/// proxy in Trunk.toml).
fn service_config() -> BoardConfig {
    let config = match option_env!("SHOOTBOARD_API_URL") {
        Some(url) => BoardConfig::with_base_url(url),
        None => BoardConfig::default(),
    };
    let origin = web_sys::window()
        .and_then(|win| win.location().origin().ok())
        .filter(|origin| origin != "null")
        .unwrap_or_default();
    BoardConfig::with_base_url(config.resolve_base_url(&origin))
}

/// Dashboard pages
#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Board,
    Budget,
    Scouting,
}

#[component]
pub fn App() -> impl IntoView {
    let (authenticated, set_authenticated) = signal(remembered_login());
    let config = service_config();
    let login_config = config.clone();

    let on_login = Callback::new(move |_: ()| {
        remember_login(true);
        set_authenticated.set(true);
    });
    let on_logout = Callback::new(move |_: ()| {
        remember_login(false);
        set_authenticated.set(false);
    });

    view! {
        <Show
            when=move || authenticated.get()
            fallback=move || view! { <LoginForm config=login_config.clone() on_success=on_login /> }
        >
            <Dashboard config=config.clone() on_logout=on_logout />
        </Show>
    }
}

/// Everything behind the login gate.
#[component]
fn Dashboard(config: BoardConfig, on_logout: Callback<()>) -> impl IntoView {
    let service = Rc::new(HttpPersistence::from_config(&config));
    let spawner: Spawner = Rc::new(|task: Task| spawn_local(task));
    let board = Rc::new(BoardStore::new(Rc::clone(&service), Rc::clone(&spawner)));
    let ledger = Rc::new(BudgetLedger::new(Rc::clone(&service), Rc::clone(&spawner)));
    let gallery = Rc::new(ScoutingGallery::new(service, spawner));

    let store: AppStore = Store::new(AppState::new());
    let ctx = BoardContext::new(Rc::clone(&board), Rc::clone(&ledger), Rc::clone(&gallery));
    let budget = ctx.budget;
    let scouting = ctx.scouting;

    // A load still in flight after logout finds the views disposed
    let handle = PollHandle::new();
    let live = handle.clone();
    board.on_change(move |snapshot| {
        if !live.is_stopped() {
            store_apply_snapshot(&store, snapshot);
        }
    });
    let live = handle.clone();
    ledger.on_change(move |snapshot| {
        if !live.is_stopped() {
            signal_apply_snapshot(budget, snapshot);
        }
    });
    let live = handle.clone();
    gallery.on_change(move |snapshot| {
        if !live.is_stopped() {
            signal_apply_snapshot(scouting, snapshot);
        }
    });

    provide_context(store);
    provide_context(ctx);

    // Full refresh now and every poll interval until unmounted
    let targets = poll_targets(board, ledger, gallery);
    let interval = config.poll_interval();
    let poll = handle.clone();
    spawn_local(async move {
        run_polling(targets, interval, poll, gloo_timers::future::sleep).await;
    });
    on_cleanup(move || handle.stop());

    tracing::info!(base_url = %config.api_base_url, ?interval, "polling");

    let (page, set_page) = signal(Page::Board);
    let tab = move |target: Page, label: &'static str| {
        view! {
            <button
                class=move || if page.get() == target { "tab active" } else { "tab" }
                on:click=move |_| set_page.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <main class="main-content">
                <header class="board-header">
                    <h1>"Shootboard"</h1>
                    <nav class="tabs">
                        {tab(Page::Board, "Board")}
                        {tab(Page::Budget, "Budget")}
                        {tab(Page::Scouting, "Scouting")}
                    </nav>
                    <Show when=move || page.get() == Page::Board>
                        <DateRangeBar />
                    </Show>
                    <button class="logout-btn" on:click=move |_| on_logout.run(())>
                        "Log out"
                    </button>
                </header>
                {move || match page.get() {
                    Page::Board => view! { <BoardView /> }.into_any(),
                    Page::Budget => view! { <BudgetPanel /> }.into_any(),
                    Page::Scouting => view! { <ScoutingPanel /> }.into_any(),
                }}
            </main>
            <Show when=move || page.get() == Page::Board>
                <aside class="sidebar">
                    <NeedsList />
                    <TodoList />
                </aside>
            </Show>
        </div>
    }
}
