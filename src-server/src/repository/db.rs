//! Database Connection and Setup
//!
//! Opens the SQLite file and brings its schema up to date.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::DomainResult;

/// Connection shared by every repository
pub type Db = Arc<Mutex<Connection>>;

/// Open (or create) the database at `path` and run migrations
pub fn init_db(path: &Path) -> DomainResult<Db> {
    let conn = Connection::open(path)?;
    run_migrations(&conn)?;
    info!(path = %path.display(), "database ready");
    Ok(Arc::new(Mutex::new(conn)))
}

/// Fresh in-memory database, used by tests
pub fn init_memory_db() -> DomainResult<Db> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Check if a column exists in a table
pub(crate) fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
pub(crate) fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS cards (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            time TEXT,
            map_url TEXT,
            category TEXT DEFAULT 'other',
            created_at INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS needs (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS budget_expenses (
            id TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS scouting_photos (
            id TEXT PRIMARY KEY,
            image_data TEXT NOT NULL,
            location TEXT,
            description TEXT,
            upload_date TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT 0
        );",
    )?;

    // Columns added to scouting_photos after the first release
    let scouting_columns = [
        ("scene_number", "TEXT"),
        ("category", "TEXT DEFAULT 'Autres'"),
        ("media_type", "TEXT DEFAULT 'image'"),
        ("display_order", "INTEGER DEFAULT 0"),
    ];
    for (column, definition) in scouting_columns {
        if !column_exists(conn, "scouting_photos", column)? {
            conn.execute(
                &format!("ALTER TABLE scouting_photos ADD COLUMN {} {}", column, definition),
                [],
            )?;
            info!(column, "migrated scouting_photos");
        }
    }

    Ok(())
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn delete_by_id(conn: &Connection, table: &str, id: &str) -> DomainResult<()> {
    conn.execute(&format!("DELETE FROM {} WHERE id = ?", table), params![id])?;
    Ok(())
}

/// Read a `YYYY-MM-DD` text column
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    text.parse::<NaiveDate>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// NULL and blank text both read as `None`
pub(crate) fn optional_text(row: &Row, idx: usize) -> rusqlite::Result<Option<String>> {
    let value: Option<String> = row.get(idx)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
