//! Budget Panel Component
//!
//! Expense list with add and delete, totals per category, and the overall
//! budget with what remains of it.

use leptos::prelude::*;
use shootboard_core::models::settings::{format_date, parse_budget_total, parse_start_date};
use shootboard_core::{Expense, ExpenseCategory, NewExpense};

use crate::components::DeleteConfirmButton;
use crate::context::use_board;
use crate::store::{use_app_store, AppStateStoreFields};

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[component]
pub fn BudgetPanel() -> impl IntoView {
    let ctx = use_board();
    let budget = ctx.budget;

    let on_total_change = move |ev: web_sys::Event| match parse_budget_total(&event_target_value(&ev)) {
        Some(total) => {
            if let Err(err) = ctx.ledger().set_budget_total(total) {
                web_sys::console::warn_1(&format!("[BUDGET] {}", err).into());
            }
        }
        None => web_sys::console::warn_1(&"[BUDGET] Ignoring invalid budget total".into()),
    };

    let spent = move || budget.with(|b| money(b.total_spent()));
    let remaining = move || budget.with(|b| money(b.remaining()));
    let over = move || budget.with(|b| b.remaining() < 0.0);

    view! {
        <section class="budget-panel">
            <div class="budget-summary">
                <label>
                    "Budget "
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        prop:value=move || budget.with(|b| b.budget_total.to_string())
                        on:change=on_total_change
                    />
                </label>
                <span class="budget-spent">"Spent " {spent}</span>
                <span class="budget-remaining" class:over=over>"Remaining " {remaining}</span>
            </div>
            <ul class="category-totals">
                {move || {
                    budget
                        .with(|b| b.totals_by_category())
                        .into_iter()
                        .filter(|(_, total)| *total > 0.0)
                        .map(|(category, total)| view! {
                            <li>
                                <span class="category">{category.as_str()}</span>
                                <span class="amount">{money(total)}</span>
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
            <AddExpenseForm />
            <ul class="expense-list">
                <For
                    each=move || budget.with(|b| b.expenses.clone())
                    key=|e| (e.id.clone(), e.amount.to_bits(), e.description.clone(), e.category, e.date)
                    children=move |expense| view! { <ExpenseRow expense=expense /> }
                />
            </ul>
        </section>
    }
}

#[component]
fn ExpenseRow(expense: Expense) -> impl IntoView {
    let ctx = use_board();
    let id = expense.id.clone();
    let on_delete = Callback::new(move |_: ()| ctx.ledger().delete_expense(&id));

    view! {
        <li class="expense-row">
            <span class="date">{format_date(expense.date)}</span>
            <span class="category">{expense.category.as_str()}</span>
            <span class="description">{expense.description}</span>
            <span class="amount">{money(expense.amount)}</span>
            <DeleteConfirmButton button_class="delete-btn" prompt="Remove?" on_confirm=on_delete />
        </li>
    }
}

/// Category, description, amount and date; resets after a valid submit.
#[component]
fn AddExpenseForm() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();

    let (category, set_category) = signal(ExpenseCategory::Other);
    let (description, set_description) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (date, set_date) = signal(format_date(store.start_date().get_untracked()));
    let (error, set_error) = signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(parsed_date) = parse_start_date(&date.get_untracked()) else {
            set_error.set(Some("Pick a date".to_string()));
            return;
        };
        let Ok(parsed_amount) = amount.get_untracked().trim().parse::<f64>() else {
            set_error.set(Some("Enter an amount".to_string()));
            return;
        };
        let input = NewExpense {
            category: category.get_untracked(),
            description: description.get_untracked().trim().to_string(),
            amount: parsed_amount,
            date: parsed_date,
        };
        match ctx.ledger().add_expense(input) {
            Ok(_) => {
                set_error.set(None);
                set_description.set(String::new());
                set_amount.set(String::new());
            }
            Err(err) => set_error.set(Some(err.to_string())),
        }
    };

    view! {
        <form class="add-expense-form" on:submit=on_submit>
            <select on:change=move |ev| set_category.set(ExpenseCategory::from_str(&event_target_value(&ev)))>
                {ExpenseCategory::ALL
                    .into_iter()
                    .map(|c| view! {
                        <option value=c.as_str() selected=move || category.get() == c>{c.as_str()}</option>
                    })
                    .collect_view()}
            </select>
            <input
                type="text"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <input
                type="number"
                min="0"
                step="0.01"
                placeholder="Amount"
                prop:value=move || amount.get()
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <input
                type="date"
                prop:value=move || date.get()
                on:input=move |ev| set_date.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
            {move || error.get().map(|msg| view! { <span class="form-error">{msg}</span> })}
        </form>
    }
}
