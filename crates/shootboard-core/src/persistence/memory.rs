//! In-memory persistence service.
//!
//! Behaves like the SQL-backed service (updates of unknown ids change
//! nothing, lists come back in service order) and records every call.
//! Individual operations can be made to fail.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;

use super::PersistenceService;
use crate::error::{PersistenceError, PersistenceResult};
use crate::models::{Card, Expense, Need, ScoutingMedia, Todo};

/// One recorded call, with the payload it carried.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCards,
    CreateCard(Card),
    UpdateCard(String, Card),
    DeleteCard(String),
    ListNeeds,
    CreateNeed(Need),
    DeleteNeed(String),
    ListTodos,
    CreateTodo(Todo),
    UpdateTodo(String, Todo),
    DeleteTodo(String),
    GetSetting(String),
    SetSetting(String, String),
    ListExpenses,
    CreateExpense(Expense),
    UpdateExpense(String, Expense),
    DeleteExpense(String),
    ListMedia,
    CreateMedia(ScoutingMedia),
    UpdateMedia(String, ScoutingMedia),
    DeleteMedia(String),
    ReorderPhotos(Vec<String>),
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::ListCards => "list_cards",
            Call::CreateCard(_) => "create_card",
            Call::UpdateCard(..) => "update_card",
            Call::DeleteCard(_) => "delete_card",
            Call::ListNeeds => "list_needs",
            Call::CreateNeed(_) => "create_need",
            Call::DeleteNeed(_) => "delete_need",
            Call::ListTodos => "list_todos",
            Call::CreateTodo(_) => "create_todo",
            Call::UpdateTodo(..) => "update_todo",
            Call::DeleteTodo(_) => "delete_todo",
            Call::GetSetting(_) => "get_setting",
            Call::SetSetting(..) => "set_setting",
            Call::ListExpenses => "list_expenses",
            Call::CreateExpense(_) => "create_expense",
            Call::UpdateExpense(..) => "update_expense",
            Call::DeleteExpense(_) => "delete_expense",
            Call::ListMedia => "list_media",
            Call::CreateMedia(_) => "create_media",
            Call::UpdateMedia(..) => "update_media",
            Call::DeleteMedia(_) => "delete_media",
            Call::ReorderPhotos(_) => "reorder_photos",
        }
    }

    /// Anything but a read.
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Call::ListCards
                | Call::ListNeeds
                | Call::ListTodos
                | Call::GetSetting(_)
                | Call::ListExpenses
                | Call::ListMedia
        )
    }
}

#[derive(Debug, Default)]
struct Tables {
    cards: Vec<Card>,
    needs: Vec<Need>,
    todos: Vec<Todo>,
    settings: BTreeMap<String, String>,
    expenses: Vec<Expense>,
    media: Vec<ScoutingMedia>,
}

#[derive(Debug, Default)]
pub struct MemoryPersistence {
    tables: RefCell<Tables>,
    calls: RefCell<Vec<Call>>,
    failing: RefCell<HashSet<&'static str>>,
    fail_all: Cell<bool>,
}

const SERVER_ERROR: PersistenceError = PersistenceError::Server { status: 500 };

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let service = Self::new();
        service.tables.borrow_mut().cards = cards;
        service
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Recorded writes only.
    pub fn writes(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make the named operation (see [`Call::name`]) fail until cleared.
    pub fn fail(&self, operation: &'static str) {
        self.failing.borrow_mut().insert(operation);
    }

    pub fn fail_everything(&self, on: bool) {
        self.fail_all.set(on);
    }

    pub fn recover(&self) {
        self.failing.borrow_mut().clear();
        self.fail_all.set(false);
    }

    pub fn cards(&self) -> Vec<Card> {
        self.tables.borrow().cards.clone()
    }

    pub fn setting(&self, key: &str) -> Option<String> {
        self.tables.borrow().settings.get(key).cloned()
    }

    pub fn put_setting(&self, key: &str, value: &str) {
        self.tables
            .borrow_mut()
            .settings
            .insert(key.to_string(), value.to_string());
    }

    pub fn put_card(&self, card: Card) {
        let mut tables = self.tables.borrow_mut();
        match tables.cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card,
            None => tables.cards.push(card),
        }
    }

    pub fn put_media(&self, media: ScoutingMedia) {
        self.tables.borrow_mut().media.push(media);
    }

    pub fn put_expense(&self, expense: Expense) {
        self.tables.borrow_mut().expenses.push(expense);
    }

    /// Log the call, then fail it if configured to.
    fn record(&self, call: Call) -> PersistenceResult<()> {
        let name = call.name();
        self.calls.borrow_mut().push(call);
        if self.fail_all.get() || self.failing.borrow().contains(name) {
            Err(SERVER_ERROR)
        } else {
            Ok(())
        }
    }
}

fn insert_unique<T, F>(rows: &mut Vec<T>, row: T, id_of: F) -> PersistenceResult<()>
where
    F: Fn(&T) -> &str,
{
    if rows.iter().any(|r| id_of(r) == id_of(&row)) {
        return Err(SERVER_ERROR);
    }
    rows.push(row);
    Ok(())
}

fn replace_by_id<T: Clone, F>(rows: &mut [T], id: &str, row: &T, id_of: F)
where
    F: Fn(&T) -> &str,
{
    if let Some(existing) = rows.iter_mut().find(|r| id_of(r) == id) {
        *existing = row.clone();
    }
}

#[async_trait(?Send)]
impl PersistenceService for MemoryPersistence {
    async fn list_cards(&self) -> PersistenceResult<Vec<Card>> {
        self.record(Call::ListCards)?;
        let mut cards = self.tables.borrow().cards.clone();
        cards.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        Ok(cards)
    }

    async fn create_card(&self, card: &Card) -> PersistenceResult<()> {
        self.record(Call::CreateCard(card.clone()))?;
        insert_unique(&mut self.tables.borrow_mut().cards, card.clone(), |c| c.id.as_str())
    }

    async fn update_card(&self, id: &str, card: &Card) -> PersistenceResult<()> {
        self.record(Call::UpdateCard(id.to_string(), card.clone()))?;
        let mut stored = card.clone();
        stored.id = id.to_string();
        replace_by_id(&mut self.tables.borrow_mut().cards, id, &stored, |c| c.id.as_str());
        Ok(())
    }

    async fn delete_card(&self, id: &str) -> PersistenceResult<()> {
        self.record(Call::DeleteCard(id.to_string()))?;
        self.tables.borrow_mut().cards.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_needs(&self) -> PersistenceResult<Vec<Need>> {
        self.record(Call::ListNeeds)?;
        Ok(self.tables.borrow().needs.clone())
    }

    async fn create_need(&self, need: &Need) -> PersistenceResult<()> {
        self.record(Call::CreateNeed(need.clone()))?;
        insert_unique(&mut self.tables.borrow_mut().needs, need.clone(), |n| n.id.as_str())
    }

    async fn delete_need(&self, id: &str) -> PersistenceResult<()> {
        self.record(Call::DeleteNeed(id.to_string()))?;
        self.tables.borrow_mut().needs.retain(|n| n.id != id);
        Ok(())
    }

    async fn list_todos(&self) -> PersistenceResult<Vec<Todo>> {
        self.record(Call::ListTodos)?;
        Ok(self.tables.borrow().todos.clone())
    }

    async fn create_todo(&self, todo: &Todo) -> PersistenceResult<()> {
        self.record(Call::CreateTodo(todo.clone()))?;
        insert_unique(&mut self.tables.borrow_mut().todos, todo.clone(), |t| t.id.as_str())
    }

    async fn update_todo(&self, id: &str, todo: &Todo) -> PersistenceResult<()> {
        self.record(Call::UpdateTodo(id.to_string(), todo.clone()))?;
        let mut stored = todo.clone();
        stored.id = id.to_string();
        replace_by_id(&mut self.tables.borrow_mut().todos, id, &stored, |t| t.id.as_str());
        Ok(())
    }

    async fn delete_todo(&self, id: &str) -> PersistenceResult<()> {
        self.record(Call::DeleteTodo(id.to_string()))?;
        self.tables.borrow_mut().todos.retain(|t| t.id != id);
        Ok(())
    }

    async fn get_setting(&self, key: &str) -> PersistenceResult<Option<String>> {
        self.record(Call::GetSetting(key.to_string()))?;
        Ok(self.setting(key))
    }

    async fn set_setting(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.record(Call::SetSetting(key.to_string(), value.to_string()))?;
        self.put_setting(key, value);
        Ok(())
    }

    async fn list_expenses(&self) -> PersistenceResult<Vec<Expense>> {
        self.record(Call::ListExpenses)?;
        let mut expenses = self.tables.borrow().expenses.clone();
        // Newest first, insertion order breaking ties
        expenses.reverse();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    async fn create_expense(&self, expense: &Expense) -> PersistenceResult<()> {
        self.record(Call::CreateExpense(expense.clone()))?;
        insert_unique(
            &mut self.tables.borrow_mut().expenses,
            expense.clone(),
            |e| e.id.as_str(),
        )
    }

    async fn update_expense(&self, id: &str, expense: &Expense) -> PersistenceResult<()> {
        self.record(Call::UpdateExpense(id.to_string(), expense.clone()))?;
        let mut stored = expense.clone();
        stored.id = id.to_string();
        replace_by_id(&mut self.tables.borrow_mut().expenses, id, &stored, |e| e.id.as_str());
        Ok(())
    }

    async fn delete_expense(&self, id: &str) -> PersistenceResult<()> {
        self.record(Call::DeleteExpense(id.to_string()))?;
        self.tables.borrow_mut().expenses.retain(|e| e.id != id);
        Ok(())
    }

    async fn list_media(&self) -> PersistenceResult<Vec<ScoutingMedia>> {
        self.record(Call::ListMedia)?;
        let mut media = self.tables.borrow().media.clone();
        media.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| b.upload_date.cmp(&a.upload_date))
        });
        Ok(media)
    }

    async fn create_media(&self, media: &ScoutingMedia) -> PersistenceResult<()> {
        self.record(Call::CreateMedia(media.clone()))?;
        insert_unique(&mut self.tables.borrow_mut().media, media.clone(), |m| m.id.as_str())
    }

    async fn update_media(&self, id: &str, media: &ScoutingMedia) -> PersistenceResult<()> {
        self.record(Call::UpdateMedia(id.to_string(), media.clone()))?;
        let mut stored = media.clone();
        stored.id = id.to_string();
        replace_by_id(&mut self.tables.borrow_mut().media, id, &stored, |m| m.id.as_str());
        Ok(())
    }

    async fn delete_media(&self, id: &str) -> PersistenceResult<()> {
        self.record(Call::DeleteMedia(id.to_string()))?;
        self.tables.borrow_mut().media.retain(|m| m.id != id);
        Ok(())
    }

    async fn reorder_photos(&self, ordered_ids: &[String]) -> PersistenceResult<()> {
        self.record(Call::ReorderPhotos(ordered_ids.to_vec()))?;
        let mut tables = self.tables.borrow_mut();
        for (index, id) in ordered_ids.iter().enumerate() {
            if let Some(media) = tables.media.iter_mut().find(|m| &m.id == id) {
                media.display_order = index as i64;
            }
        }
        Ok(())
    }
}
