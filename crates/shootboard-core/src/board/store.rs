use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::error::PersistenceResult;
use crate::models::settings::{
    self, clamp_num_days, default_start_date, format_date, parse_num_days, parse_start_date,
};
use crate::models::{Card, Need, Todo};
use crate::persistence::PersistenceService;
use crate::poll::Refresh;
use crate::sync::{Listeners, Remote, Spawner};

/// Everything the board shows, as of the last local change.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub cards: Vec<Card>,
    pub needs: Vec<Need>,
    pub todos: Vec<Todo>,
    pub start_date: NaiveDate,
    pub num_days: u32,
    /// Set by the first successful load. Settings are only pushed after it.
    pub loaded: bool,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            needs: Vec::new(),
            todos: Vec::new(),
            start_date: default_start_date(),
            num_days: settings::DEFAULT_NUM_DAYS,
            loaded: false,
        }
    }
}

/// One day of the board and the cards scheduled on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub cards: Vec<Card>,
}

impl BoardSnapshot {
    /// `num_days` consecutive days from `start_date`.
    pub fn days(&self) -> Vec<NaiveDate> {
        (0..u64::from(self.num_days))
            .filter_map(|offset| self.start_date.checked_add_days(Days::new(offset)))
            .collect()
    }

    /// Cards on `date`, in store order.
    pub fn cards_on(&self, date: NaiveDate) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.date == date)
            .cloned()
            .collect()
    }

    /// Cards dated outside the range are held but not shown.
    pub fn columns(&self) -> Vec<DayColumn> {
        self.days()
            .into_iter()
            .map(|date| DayColumn {
                date,
                cards: self.cards_on(date),
            })
            .collect()
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }
}

/// Board State Store
///
/// Single owner of the board's cards, needs, todos and day range. Every
/// mutation changes local state first, notifies listeners, then dispatches
/// the matching remote write without waiting for it. A later [`load`]
/// replaces everything with what the service returns.
///
/// [`load`]: BoardStore::load
pub struct BoardStore<P> {
    remote: Remote<P>,
    state: RefCell<BoardSnapshot>,
    listeners: Listeners<BoardSnapshot>,
}

impl<P: PersistenceService + 'static> BoardStore<P> {
    pub fn new(service: Rc<P>, spawner: Spawner) -> Self {
        Self {
            remote: Remote::new(service, spawner),
            state: RefCell::new(BoardSnapshot::default()),
            listeners: Listeners::default(),
        }
    }

    /// Register a callback run with the new snapshot after every local change.
    pub fn on_change(&self, callback: impl Fn(&BoardSnapshot) + 'static) {
        self.listeners.add(callback);
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.state.borrow().days()
    }

    pub fn cards_on(&self, date: NaiveDate) -> Vec<Card> {
        self.state.borrow().cards_on(date)
    }

    pub fn columns(&self) -> Vec<DayColumn> {
        self.state.borrow().columns()
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }

    /// Fetch every collection and the day range, then replace local state.
    ///
    /// All five reads must succeed. On failure nothing changes locally and
    /// the error is returned after being logged.
    pub async fn load(&self) -> PersistenceResult<()> {
        let service = self.remote.service();
        let fetched = futures::try_join!(
            service.list_cards(),
            service.list_needs(),
            service.list_todos(),
            service.get_setting(settings::START_DATE),
            service.get_setting(settings::NUM_DAYS),
        );

        let (cards, needs, todos, start_date, num_days) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                error!(error = %err, "board load failed; keeping previous state");
                return Err(err);
            }
        };

        {
            let mut state = self.state.borrow_mut();
            debug!(
                cards = cards.len(),
                needs = needs.len(),
                todos = todos.len(),
                "board loaded"
            );
            state.cards = cards;
            state.needs = needs;
            state.todos = todos;

            if let Some(raw) = start_date {
                match parse_start_date(&raw) {
                    Some(date) => state.start_date = date,
                    None => warn!(value = %raw, "ignoring unparsable start_date setting"),
                }
            }
            if let Some(raw) = num_days {
                match parse_num_days(&raw) {
                    Some(n) => state.num_days = n,
                    None => warn!(value = %raw, "ignoring unparsable num_days setting"),
                }
            }
            state.loaded = true;
        }

        self.notify();
        Ok(())
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// Append a default card on `date` and create it remotely.
    pub fn add_card(&self, date: NaiveDate) -> Card {
        let card = Card::new(date);
        self.state.borrow_mut().cards.push(card.clone());
        self.notify();

        let created = card.clone();
        self.remote.dispatch("create_card", move |service| async move {
            service.create_card(&created).await
        });
        card
    }

    /// Replace the card with the same id, then send the full card.
    ///
    /// An unknown id changes nothing locally; the update is still sent.
    pub fn edit_card(&self, card: Card) {
        let replaced = {
            let mut state = self.state.borrow_mut();
            match state.cards.iter_mut().find(|c| c.id == card.id) {
                Some(slot) => {
                    *slot = card.clone();
                    true
                }
                None => false,
            }
        };

        if replaced {
            self.notify();
        } else {
            warn!(id = %card.id, "editing a card missing from local state");
        }

        let id = card.id.clone();
        self.remote.dispatch("update_card", move |service| async move {
            service.update_card(&id, &card).await
        });
    }

    pub fn delete_card(&self, id: &str) {
        let removed = {
            let mut state = self.state.borrow_mut();
            let before = state.cards.len();
            state.cards.retain(|c| c.id != id);
            state.cards.len() != before
        };
        if removed {
            self.notify();
        }

        let id = id.to_string();
        self.remote.dispatch("delete_card", move |service| async move {
            service.delete_card(&id).await
        });
    }

    /// Reassign a card to another day.
    ///
    /// Returns `false` without any change or remote call when the card is
    /// unknown or already on `date`.
    pub fn move_card(&self, id: &str, date: NaiveDate) -> bool {
        let moved = match self.state.borrow().card(id) {
            Some(card) if card.date == date => {
                debug!(id, %date, "card already on target day");
                return false;
            }
            Some(card) => card.moved_to(date),
            None => {
                warn!(id, "cannot move unknown card");
                return false;
            }
        };

        info!(id, to = %date, "moving card");
        self.edit_card(moved);
        true
    }

    // ========================================================================
    // Needs
    // ========================================================================

    /// Blank text is ignored.
    pub fn add_need(&self, text: &str) -> Option<Need> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let need = Need::new(text);
        self.state.borrow_mut().needs.push(need.clone());
        self.notify();

        let created = need.clone();
        self.remote.dispatch("create_need", move |service| async move {
            service.create_need(&created).await
        });
        Some(need)
    }

    pub fn delete_need(&self, id: &str) {
        self.state.borrow_mut().needs.retain(|n| n.id != id);
        self.notify();

        let id = id.to_string();
        self.remote.dispatch("delete_need", move |service| async move {
            service.delete_need(&id).await
        });
    }

    // ========================================================================
    // Todos
    // ========================================================================

    /// Blank text is ignored.
    pub fn add_todo(&self, text: &str) -> Option<Todo> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let todo = Todo::new(text);
        self.state.borrow_mut().todos.push(todo.clone());
        self.notify();

        let created = todo.clone();
        self.remote.dispatch("create_todo", move |service| async move {
            service.create_todo(&created).await
        });
        Some(todo)
    }

    /// Flip `completed`. Unknown ids are ignored.
    pub fn toggle_todo(&self, id: &str) {
        let toggled = {
            let mut state = self.state.borrow_mut();
            match state.todos.iter_mut().find(|t| t.id == id) {
                Some(slot) => {
                    *slot = slot.toggled();
                    Some(slot.clone())
                }
                None => None,
            }
        };

        let Some(todo) = toggled else {
            debug!(id, "toggle of unknown todo ignored");
            return;
        };
        self.notify();

        self.remote.dispatch("update_todo", move |service| async move {
            service.update_todo(&todo.id, &todo).await
        });
    }

    pub fn delete_todo(&self, id: &str) {
        self.state.borrow_mut().todos.retain(|t| t.id != id);
        self.notify();

        let id = id.to_string();
        self.remote.dispatch("delete_todo", move |service| async move {
            service.delete_todo(&id).await
        });
    }

    // ========================================================================
    // Day range
    // ========================================================================

    pub fn set_start_date(&self, date: NaiveDate) {
        let push = {
            let mut state = self.state.borrow_mut();
            if state.start_date == date {
                return;
            }
            state.start_date = date;
            state.loaded
        };
        self.notify();

        if push {
            let value = format_date(date);
            self.remote.dispatch("set_setting", move |service| async move {
                service.set_setting(settings::START_DATE, &value).await
            });
        }
    }

    /// Clamped to `1..=MAX_NUM_DAYS`.
    pub fn set_num_days(&self, num_days: u32) {
        let num_days = clamp_num_days(num_days);
        let push = {
            let mut state = self.state.borrow_mut();
            if state.num_days == num_days {
                return;
            }
            state.num_days = num_days;
            state.loaded
        };
        self.notify();

        if push {
            let value = num_days.to_string();
            self.remote.dispatch("set_setting", move |service| async move {
                service.set_setting(settings::NUM_DAYS, &value).await
            });
        }
    }
}

#[async_trait(?Send)]
impl<P: PersistenceService + 'static> Refresh for BoardStore<P> {
    fn name(&self) -> &'static str {
        "board"
    }

    async fn refresh(&self) -> PersistenceResult<()> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{Call, MemoryPersistence};
    use crate::sync::TaskQueue;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn store() -> (BoardStore<MemoryPersistence>, Rc<MemoryPersistence>, TaskQueue) {
        let service = Rc::new(MemoryPersistence::new());
        let queue = TaskQueue::new();
        let store = BoardStore::new(Rc::clone(&service), queue.spawner());
        (store, service, queue)
    }

    #[test]
    fn days_follow_the_configured_range() {
        let snapshot = BoardSnapshot {
            start_date: day(30),
            num_days: 3,
            ..BoardSnapshot::default()
        };
        let days = snapshot.days();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0], day(30));
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[tokio::test]
    async fn add_card_is_local_before_remote() {
        let (store, service, queue) = store();
        let card = store.add_card(day(6));

        assert_eq!(store.cards_on(day(6)), vec![card.clone()]);
        assert!(service.writes().is_empty());

        queue.run_all().await;
        assert_eq!(service.writes(), vec![Call::CreateCard(card)]);
    }

    #[tokio::test]
    async fn blank_need_and_todo_are_ignored() {
        let (store, service, queue) = store();
        assert!(store.add_need("   ").is_none());
        assert!(store.add_todo("").is_none());
        let need = store.add_need("  gaffer tape ").unwrap();
        assert_eq!(need.text, "gaffer tape");

        queue.run_all().await;
        assert_eq!(service.writes(), vec![Call::CreateNeed(need)]);
    }

    #[tokio::test]
    async fn toggle_unknown_todo_does_nothing() {
        let (store, service, queue) = store();
        let todo = store.add_todo("Book the van").unwrap();
        store.toggle_todo("missing");
        store.toggle_todo(&todo.id);

        assert!(store.snapshot().todos[0].completed);
        queue.run_all().await;
        let writes = service.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].name(), "update_todo");
    }

    #[tokio::test]
    async fn listeners_see_each_change() {
        let (store, _service, _queue) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.on_change(move |snapshot| sink.borrow_mut().push(snapshot.cards.len()));

        store.add_card(day(5));
        store.add_card(day(5));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn num_days_is_clamped() {
        let (store, _service, _queue) = store();
        store.set_num_days(0);
        assert_eq!(store.snapshot().num_days, 1);
        store.set_num_days(1_000);
        assert_eq!(store.snapshot().num_days, settings::MAX_NUM_DAYS);
    }
}
