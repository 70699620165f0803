//! Budget Expense Repository
//!
//! Amounts are validated here as well as on the client: a negative or
//! non-finite amount never reaches the table.

use async_trait::async_trait;
use rusqlite::{params, Row};
use shootboard_core::models::{validate_amount, Expense, ExpenseCategory};

use super::db::{date_column, delete_by_id, now_millis, Db};
use super::traits::{MutableRepository, Repository};
use crate::domain::{DomainError, DomainResult, Entity};

pub struct ExpenseRepository {
    conn: Db,
}

impl ExpenseRepository {
    pub fn new(conn: Db) -> Self {
        Self { conn }
    }
}

fn check_amount(expense: &Expense) -> DomainResult<()> {
    validate_amount(expense.amount).map_err(|e| DomainError::InvalidInput(e.to_string()))
}

#[async_trait]
impl Repository<Expense> for ExpenseRepository {
    async fn create(&self, expense: &Expense) -> DomainResult<()> {
        check_amount(expense)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO budget_expenses (id, category, description, amount, date, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                expense.id,
                expense.category.as_str(),
                expense.description,
                expense.amount,
                expense.date.to_string(),
                now_millis()
            ],
        )?;
        Ok(())
    }

    /// Newest first
    async fn list(&self) -> DomainResult<Vec<Expense>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, category, description, amount, date FROM budget_expenses
             ORDER BY date DESC, created_at DESC, rowid DESC",
        )?;
        let expenses = stmt
            .query_map([], row_to_expense)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        delete_by_id(&conn, Expense::TABLE, id)
    }
}

#[async_trait]
impl MutableRepository<Expense> for ExpenseRepository {
    async fn update(&self, id: &str, expense: &Expense) -> DomainResult<()> {
        check_amount(expense)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE budget_expenses SET category = ?, description = ?, amount = ?, date = ? WHERE id = ?",
            params![
                expense.category.as_str(),
                expense.description,
                expense.amount,
                expense.date.to_string(),
                id
            ],
        )?;
        Ok(())
    }
}

fn row_to_expense(row: &Row) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        category: ExpenseCategory::from_str(&row.get::<_, String>(1)?),
        description: row.get(2)?,
        amount: row.get(3)?,
        date: date_column(row, 4)?,
    })
}
