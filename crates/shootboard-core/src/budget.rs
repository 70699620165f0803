//! Budget ledger: expenses plus the total budget setting.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::error::{PersistenceResult, ValidationError};
use crate::models::settings::{self, parse_budget_total};
use crate::models::{validate_amount, Expense, ExpenseCategory, NewExpense};
use crate::persistence::PersistenceService;
use crate::poll::Refresh;
use crate::sync::{Listeners, Remote, Spawner};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetSnapshot {
    /// Newest first, as the service lists them.
    pub expenses: Vec<Expense>,
    pub budget_total: f64,
    pub loaded: bool,
}

impl BudgetSnapshot {
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Every category once, in declaration order, zero when unused.
    pub fn totals_by_category(&self) -> Vec<(ExpenseCategory, f64)> {
        ExpenseCategory::ALL
            .into_iter()
            .map(|category| {
                let total = self
                    .expenses
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.amount)
                    .sum::<f64>();
                (category, total)
            })
            .collect()
    }

    /// Negative once spending exceeds the budget.
    pub fn remaining(&self) -> f64 {
        self.budget_total - self.total_spent()
    }
}

/// Expense store with the same local-then-remote contract as the board.
pub struct BudgetLedger<P> {
    remote: Remote<P>,
    state: RefCell<BudgetSnapshot>,
    listeners: Listeners<BudgetSnapshot>,
}

impl<P: PersistenceService + 'static> BudgetLedger<P> {
    pub fn new(service: Rc<P>, spawner: Spawner) -> Self {
        Self {
            remote: Remote::new(service, spawner),
            state: RefCell::new(BudgetSnapshot::default()),
            listeners: Listeners::default(),
        }
    }

    pub fn on_change(&self, callback: impl Fn(&BudgetSnapshot) + 'static) {
        self.listeners.add(callback);
    }

    pub fn snapshot(&self) -> BudgetSnapshot {
        self.state.borrow().clone()
    }

    pub fn total_spent(&self) -> f64 {
        self.state.borrow().total_spent()
    }

    pub fn totals_by_category(&self) -> Vec<(ExpenseCategory, f64)> {
        self.state.borrow().totals_by_category()
    }

    pub fn remaining(&self) -> f64 {
        self.state.borrow().remaining()
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }

    pub async fn load(&self) -> PersistenceResult<()> {
        let service = self.remote.service();
        let (expenses, budget_total) = futures::try_join!(
            service.list_expenses(),
            service.get_setting(settings::BUDGET_TOTAL),
        )
        .map_err(|err| {
            error!(error = %err, "budget load failed; keeping previous state");
            err
        })?;

        {
            let mut state = self.state.borrow_mut();
            state.expenses = expenses;
            if let Some(raw) = budget_total {
                match parse_budget_total(&raw) {
                    Some(total) => state.budget_total = total,
                    None => warn!(value = %raw, "ignoring unparsable budget_total setting"),
                }
            }
            state.loaded = true;
        }
        self.notify();
        Ok(())
    }

    /// Validate, insert at the top, and create remotely.
    pub fn add_expense(&self, input: NewExpense) -> Result<Expense, ValidationError> {
        let expense = Expense::create(input)?;
        self.state.borrow_mut().expenses.insert(0, expense.clone());
        self.notify();

        let created = expense.clone();
        self.remote.dispatch("create_expense", move |service| async move {
            service.create_expense(&created).await
        });
        Ok(expense)
    }

    pub fn edit_expense(&self, expense: Expense) -> Result<(), ValidationError> {
        expense.validate()?;
        let replaced = {
            let mut state = self.state.borrow_mut();
            let slot = state.expenses.iter_mut().find(|e| e.id == expense.id);
            match slot {
                Some(slot) => {
                    *slot = expense.clone();
                    true
                }
                None => false,
            }
        };
        if replaced {
            self.notify();
        } else {
            warn!(id = %expense.id, "editing an expense missing from local state");
        }

        let id = expense.id.clone();
        self.remote.dispatch("update_expense", move |service| async move {
            service.update_expense(&id, &expense).await
        });
        Ok(())
    }

    pub fn delete_expense(&self, id: &str) {
        self.state.borrow_mut().expenses.retain(|e| e.id != id);
        self.notify();

        let id = id.to_string();
        self.remote.dispatch("delete_expense", move |service| async move {
            service.delete_expense(&id).await
        });
    }

    /// Set locally and push the setting.
    pub fn set_budget_total(&self, total: f64) -> Result<(), ValidationError> {
        validate_amount(total)?;
        {
            let mut state = self.state.borrow_mut();
            if state.budget_total == total {
                debug!(total, "budget total unchanged");
                return Ok(());
            }
            state.budget_total = total;
        }
        self.notify();

        let value = total.to_string();
        self.remote.dispatch("set_setting", move |service| async move {
            service.set_setting(settings::BUDGET_TOTAL, &value).await
        });
        Ok(())
    }
}

#[async_trait(?Send)]
impl<P: PersistenceService + 'static> Refresh for BudgetLedger<P> {
    fn name(&self) -> &'static str {
        "budget"
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
    use chrono::NaiveDate;

    fn ledger() -> (BudgetLedger<MemoryPersistence>, Rc<MemoryPersistence>, TaskQueue) {
        let service = Rc::new(MemoryPersistence::new());
        let queue = TaskQueue::new();
        let ledger = BudgetLedger::new(Rc::clone(&service), queue.spawner());
        (ledger, service, queue)
    }

    fn spend(category: ExpenseCategory, amount: f64) -> NewExpense {
        NewExpense {
            category,
            description: String::new(),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn aggregates_by_category() {
        let (ledger, _service, _queue) = ledger();
        ledger.set_budget_total(1000.0).unwrap();
        ledger.add_expense(spend(ExpenseCategory::Crew, 400.0)).unwrap();
        ledger.add_expense(spend(ExpenseCategory::Crew, 250.0)).unwrap();
        ledger.add_expense(spend(ExpenseCategory::Catering, 500.0)).unwrap();

        assert_eq!(ledger.total_spent(), 1150.0);
        assert_eq!(ledger.remaining(), -150.0);

        let totals = ledger.totals_by_category();
        assert_eq!(totals.len(), ExpenseCategory::ALL.len());
        assert_eq!(totals[0], (ExpenseCategory::Equipment, 0.0));
        assert!(totals.contains(&(ExpenseCategory::Crew, 650.0)));
        assert!(totals.contains(&(ExpenseCategory::Catering, 500.0)));
    }

    #[tokio::test]
    async fn invalid_amount_changes_nothing() {
        let (ledger, service, queue) = ledger();
        assert_eq!(
            ledger.add_expense(spend(ExpenseCategory::Other, -5.0)),
            Err(ValidationError::InvalidAmount(-5.0))
        );
        assert!(ledger.set_budget_total(f64::INFINITY).is_err());
        assert!(ledger.snapshot().expenses.is_empty());
        queue.run_all().await;
        assert!(service.writes().is_empty());
    }

    #[tokio::test]
    async fn budget_total_is_pushed_as_a_setting() {
        let (ledger, service, queue) = ledger();
        ledger.set_budget_total(2500.5).unwrap();
        queue.run_all().await;
        assert_eq!(
            service.writes(),
            vec![Call::SetSetting("budget_total".into(), "2500.5".into())]
        );
        assert_eq!(service.setting("budget_total").as_deref(), Some("2500.5"));
    }
}
