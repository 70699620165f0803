//! Scouting Media Repository
//!
//! `display_order` is owned by [`ScoutingRepository::reorder`]: inserts
//! start at 0 and updates leave it alone.

use async_trait::async_trait;
use rusqlite::{params, Row};
use shootboard_core::models::{MediaType, ScoutingMedia, DEFAULT_SCOUTING_CATEGORY};
use tracing::debug;

use super::db::{delete_by_id, now_millis, optional_text, Db};
use super::traits::{MutableRepository, Repository};
use crate::domain::{DomainResult, Entity};

pub struct ScoutingRepository {
    conn: Db,
}

impl ScoutingRepository {
    pub fn new(conn: Db) -> Self {
        Self { conn }
    }

    /// Give each listed id its index as display order, all or nothing.
    /// Unknown ids are skipped.
    pub async fn reorder(&self, ordered_ids: &[String]) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("UPDATE scouting_photos SET display_order = ? WHERE id = ?")?;
            for (index, id) in ordered_ids.iter().enumerate() {
                stmt.execute(params![index as i64, id])?;
            }
        }
        tx.commit()?;
        debug!(count = ordered_ids.len(), "reordered scouting media");
        Ok(())
    }
}

fn category_or_default(category: &str) -> &str {
    if category.trim().is_empty() {
        DEFAULT_SCOUTING_CATEGORY
    } else {
        category
    }
}

#[async_trait]
impl Repository<ScoutingMedia> for ScoutingRepository {
    async fn create(&self, media: &ScoutingMedia) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO scouting_photos
                (id, image_data, location, description, scene_number, category, media_type, upload_date, display_order, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?)",
            params![
                media.id,
                media.image_data,
                media.location,
                media.description,
                media.scene_number,
                category_or_default(&media.category),
                media.media_type.as_str(),
                media.upload_date,
                now_millis()
            ],
        )?;
        debug!(id = %media.id, bytes = media.image_data.len(), "stored scouting media");
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<ScoutingMedia>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, image_data, location, description, scene_number, category, media_type, upload_date, display_order
             FROM scouting_photos
             ORDER BY display_order ASC, upload_date DESC, created_at DESC",
        )?;
        let media = stmt
            .query_map([], row_to_media)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(media)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        delete_by_id(&conn, ScoutingMedia::TABLE, id)
    }
}

#[async_trait]
impl MutableRepository<ScoutingMedia> for ScoutingRepository {
    async fn update(&self, id: &str, media: &ScoutingMedia) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE scouting_photos
             SET image_data = ?, location = ?, description = ?, scene_number = ?, category = ?, media_type = ?, upload_date = ?
             WHERE id = ?",
            params![
                media.image_data,
                media.location,
                media.description,
                media.scene_number,
                category_or_default(&media.category),
                media.media_type.as_str(),
                media.upload_date,
                id
            ],
        )?;
        Ok(())
    }
}

fn row_to_media(row: &Row) -> rusqlite::Result<ScoutingMedia> {
    Ok(ScoutingMedia {
        id: row.get(0)?,
        image_data: row.get(1)?,
        location: optional_text(row, 2)?,
        description: optional_text(row, 3)?,
        scene_number: optional_text(row, 4)?,
        category: optional_text(row, 5)?.unwrap_or_else(|| DEFAULT_SCOUTING_CATEGORY.to_string()),
        media_type: MediaType::from_str(&row.get::<_, Option<String>>(6)?.unwrap_or_default()),
        upload_date: row.get(7)?,
        display_order: row.get::<_, Option<i64>>(8)?.unwrap_or(0),
    })
}
