//! Needs and Todos Repositories
//!
//! Both lists are ordered by creation time.

use async_trait::async_trait;
use rusqlite::params;
use shootboard_core::models::{Need, Todo};

use super::db::{delete_by_id, now_millis, Db};
use super::traits::{MutableRepository, Repository};
use crate::domain::{DomainResult, Entity};

pub struct NeedRepository {
    conn: Db,
}

impl NeedRepository {
    pub fn new(conn: Db) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Need> for NeedRepository {
    async fn create(&self, need: &Need) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO needs (id, text, created_at) VALUES (?, ?, ?)",
            params![need.id, need.text, now_millis()],
        )?;
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Need>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, text FROM needs ORDER BY created_at, rowid")?;
        let needs = stmt
            .query_map([], |row| {
                Ok(Need {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(needs)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        delete_by_id(&conn, Need::TABLE, id)
    }
}

pub struct TodoRepository {
    conn: Db,
}

impl TodoRepository {
    pub fn new(conn: Db) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    async fn create(&self, todo: &Todo) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO todos (id, text, completed, created_at) VALUES (?, ?, ?, ?)",
            params![todo.id, todo.text, todo.completed, now_millis()],
        )?;
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT id, text, completed FROM todos ORDER BY created_at, rowid")?;
        let todos = stmt
            .query_map([], |row| {
                Ok(Todo {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    completed: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        delete_by_id(&conn, Todo::TABLE, id)
    }
}

#[async_trait]
impl MutableRepository<Todo> for TodoRepository {
    async fn update(&self, id: &str, todo: &Todo) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE todos SET text = ?, completed = ? WHERE id = ?",
            params![todo.text, todo.completed, id],
        )?;
        Ok(())
    }
}
