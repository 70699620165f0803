//! Card Repository

use async_trait::async_trait;
use rusqlite::{params, Row};
use shootboard_core::models::{Card, CardCategory};

use super::db::{date_column, delete_by_id, now_millis, optional_text, Db};
use super::traits::{MutableRepository, Repository};
use crate::domain::{DomainResult, Entity};

/// SQLite implementation of the card repository
pub struct CardRepository {
    conn: Db,
}

impl CardRepository {
    pub fn new(conn: Db) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Card> for CardRepository {
    async fn create(&self, card: &Card) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let now = now_millis();
        conn.execute(
            "INSERT INTO cards (id, date, title, description, time, map_url, category, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                card.id,
                card.date.to_string(),
                card.title,
                card.description,
                card.time,
                card.map_url,
                card.category.as_str(),
                now,
                now
            ],
        )?;
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Card>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, date, title, description, time, map_url, category FROM cards ORDER BY date, time",
        )?;
        let cards = stmt
            .query_map([], row_to_card)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        delete_by_id(&conn, Card::TABLE, id)
    }
}

#[async_trait]
impl MutableRepository<Card> for CardRepository {
    async fn update(&self, id: &str, card: &Card) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE cards SET date = ?, title = ?, description = ?, time = ?, map_url = ?, category = ?, updated_at = ?
             WHERE id = ?",
            params![
                card.date.to_string(),
                card.title,
                card.description,
                card.time,
                card.map_url,
                card.category.as_str(),
                now_millis(),
                id
            ],
        )?;
        Ok(())
    }
}

fn row_to_card(row: &Row) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        date: date_column(row, 1)?,
        title: row.get(2)?,
        description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        time: optional_text(row, 4)?,
        map_url: optional_text(row, 5)?,
        category: CardCategory::from_str(&row.get::<_, Option<String>>(6)?.unwrap_or_default()),
    })
}
