//! Settings Repository
//!
//! Flat key/value store; values are opaque strings.

use rusqlite::{params, OptionalExtension};

use super::db::Db;
use crate::domain::DomainResult;

pub struct SettingsRepository {
    conn: Db,
}

impl SettingsRepository {
    pub fn new(conn: Db) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace
    pub async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
